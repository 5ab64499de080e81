//! Log configuration
//!
//! Every field has a default, so an empty TOML document is a valid config:
//!
//! ```toml
//! max_streams_per_entry = 10
//! max_data_length = 200
//! payload_schema = "commitment"      # or "data_only"
//! duplicate_streams = "deduplicate"  # or "reject", "repeat"
//! privileged_writers = ["operator"]
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use streamlog_core::{WriterId, MAX_DATA_LENGTH, MAX_STREAMS_PER_LOG};
use thiserror::Error;

/// Which payload fields an entry may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadSchema {
    /// Exactly one of inline data or a data root must be set
    #[default]
    Commitment,
    /// Inline data only; commitments are rejected
    DataOnly,
}

/// How repeated stream ids within one append are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateStreamPolicy {
    /// Keep the first occurrence of each id
    #[default]
    Deduplicate,
    /// Fail the append with `DuplicateStream`
    Reject,
    /// Keep the list verbatim and authorize every occurrence
    ///
    /// Each stream's index still records the entry once.
    Repeat,
}

/// Errors loading or validating a [`LogConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Config text is not valid TOML for [`LogConfig`]
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of range
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Limits and policies of one log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// Maximum stream ids per append
    pub max_streams_per_entry: usize,
    /// Maximum inline payload size in bytes
    pub max_data_length: usize,
    /// Allowed payload fields
    pub payload_schema: PayloadSchema,
    /// Handling of repeated stream ids
    pub duplicate_streams: DuplicateStreamPolicy,
    /// Writers that bypass restricted-stream predicates
    pub privileged_writers: Vec<WriterId>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            max_streams_per_entry: MAX_STREAMS_PER_LOG,
            max_data_length: MAX_DATA_LENGTH,
            payload_schema: PayloadSchema::default(),
            duplicate_streams: DuplicateStreamPolicy::default(),
            privileged_writers: Vec::new(),
        }
    }
}

impl LogConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: LogConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Check value ranges
    ///
    /// Limits may be lowered below [`MAX_STREAMS_PER_LOG`] and
    /// [`MAX_DATA_LENGTH`] but never raised above them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_streams_per_entry == 0 {
            return Err(ConfigError::Invalid(
                "max_streams_per_entry must be at least 1".to_string(),
            ));
        }
        if self.max_data_length == 0 {
            return Err(ConfigError::Invalid(
                "max_data_length must be at least 1".to_string(),
            ));
        }
        if self.max_streams_per_entry > MAX_STREAMS_PER_LOG {
            return Err(ConfigError::Invalid(format!(
                "max_streams_per_entry {} exceeds the limit of {}",
                self.max_streams_per_entry, MAX_STREAMS_PER_LOG
            )));
        }
        if self.max_data_length > MAX_DATA_LENGTH {
            return Err(ConfigError::Invalid(format!(
                "max_data_length {} exceeds the limit of {}",
                self.max_data_length, MAX_DATA_LENGTH
            )));
        }
        Ok(())
    }
}
