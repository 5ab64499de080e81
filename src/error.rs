//! Unified error type for streamlog.
//!
//! Wraps the log's operation errors and configuration errors so callers of
//! the facade handle a single type.

use streamlog_core::LogError;
use streamlog_engine::ConfigError;
use thiserror::Error;

/// All streamlog errors.
#[derive(Debug, Error)]
pub enum Error {
    /// A log operation failed; the log is unchanged
    #[error(transparent)]
    Log(#[from] LogError),

    /// Configuration could not be loaded or is invalid
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for streamlog operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// The underlying log error, if this is one.
    pub fn as_log_error(&self) -> Option<&LogError> {
        match self {
            Error::Log(e) => Some(e),
            Error::Config(_) => None,
        }
    }

    /// Check if the request itself was malformed (limits, payload, duplicates).
    ///
    /// Retrying the same request will fail the same way.
    pub fn is_validation(&self) -> bool {
        self.as_log_error().is_some_and(LogError::is_validation)
    }

    /// Check if a stream or position does not exist.
    pub fn is_not_found(&self) -> bool {
        self.as_log_error().is_some_and(LogError::is_not_found)
    }

    /// Check if an access predicate denied the append.
    ///
    /// The same append may succeed once the predicate's state changes.
    pub fn is_unauthorized(&self) -> bool {
        self.as_log_error().is_some_and(LogError::is_unauthorized)
    }

    /// Check if this is a configuration error.
    pub fn is_config(&self) -> bool {
        matches!(self, Error::Config(_))
    }
}
