//! Append validation and authorization
//!
//! The appender never touches log state. [`Appender::prepare`] checks the
//! request in isolation and [`Appender::authorize`] consults the access gate
//! for one stream; the engine sequences both around its locks so that all
//! checks finish before the commit starts.
//!
//! ## Validation order
//!
//! 1. stream count (`TooManyStreams`)
//! 2. payload size (`PayloadTooLarge`)
//! 3. payload schema (`InvalidPayloadSpec`)
//! 4. duplicate stream policy (`DuplicateStream`)
//! 5. per stream, in listed order: existence, then authorization

use crate::config::{DuplicateStreamPolicy, LogConfig, PayloadSchema};
use crate::request::AppendRequest;
use rustc_hash::FxHashSet;
use streamlog_core::{EntryDraft, LogError, LogResult, StreamId, WriterId};
use streamlog_security::{AccessControl, AccessGate};
use tracing::warn;

/// A request that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PreparedAppend {
    /// Entry to store
    pub draft: EntryDraft,
    /// Streams to authorize, in order; empty on the default path
    pub authorize: Vec<StreamId>,
    /// Streams whose index receives the position, each once
    pub index_into: Vec<StreamId>,
}

/// Validates requests and renders authorization decisions
#[derive(Debug, Clone)]
pub struct Appender {
    config: LogConfig,
    gate: AccessGate,
}

impl Appender {
    /// Appender enforcing `config`
    pub fn new(config: LogConfig) -> Self {
        let gate = AccessGate::with_privileged(config.privileged_writers.iter().cloned());
        Self { config, gate }
    }

    /// Configuration in force
    pub fn config(&self) -> &LogConfig {
        &self.config
    }

    /// Access gate in force
    pub fn gate(&self) -> &AccessGate {
        &self.gate
    }

    pub(crate) fn prepare(&self, request: AppendRequest) -> LogResult<PreparedAppend> {
        let AppendRequest {
            streams,
            data,
            data_root,
            num_chunks,
        } = request;

        if let Some(ids) = &streams {
            if ids.len() > self.config.max_streams_per_entry {
                return Err(LogError::TooManyStreams {
                    count: ids.len(),
                    limit: self.config.max_streams_per_entry,
                });
            }
        }

        if data.len() > self.config.max_data_length {
            return Err(LogError::PayloadTooLarge {
                len: data.len(),
                limit: self.config.max_data_length,
            });
        }

        let has_data = !data.is_empty();
        let has_root = !data_root.is_zero();
        match self.config.payload_schema {
            PayloadSchema::Commitment => {
                if has_data == has_root {
                    return Err(LogError::InvalidPayloadSpec {
                        reason: "exactly one of data or data_root must be set",
                    });
                }
            }
            PayloadSchema::DataOnly => {
                if has_root {
                    return Err(LogError::InvalidPayloadSpec {
                        reason: "data_root is not accepted by the data-only schema",
                    });
                }
            }
        }
        if !has_root && num_chunks != 0 {
            return Err(LogError::InvalidPayloadSpec {
                reason: "num_chunks requires a data_root",
            });
        }

        let Some(listed) = streams else {
            return Ok(PreparedAppend {
                draft: EntryDraft {
                    stream_ids: vec![StreamId::DEFAULT],
                    data,
                    data_root,
                    num_chunks,
                },
                authorize: Vec::new(),
                index_into: vec![StreamId::DEFAULT],
            });
        };

        let distinct = first_occurrences(&listed);
        let (stream_ids, authorize) = match self.config.duplicate_streams {
            DuplicateStreamPolicy::Deduplicate => (distinct.clone(), distinct.clone()),
            DuplicateStreamPolicy::Reject => {
                if let Some(dup) = first_duplicate(&listed) {
                    return Err(LogError::DuplicateStream(dup));
                }
                (listed.clone(), listed)
            }
            DuplicateStreamPolicy::Repeat => (listed.clone(), listed),
        };

        Ok(PreparedAppend {
            draft: EntryDraft {
                stream_ids,
                data,
                data_root,
                num_chunks,
            },
            authorize,
            index_into: distinct,
        })
    }

    /// Decide whether `writer` may append to `stream` under `access`
    pub(crate) fn authorize(
        &self,
        writer: &WriterId,
        stream: StreamId,
        access: &AccessControl,
    ) -> LogResult<()> {
        if self.gate.can_append(access, stream, writer) {
            Ok(())
        } else {
            warn!(%stream, %writer, "append denied by access predicate");
            Err(LogError::Unauthorized {
                stream,
                writer: writer.clone(),
            })
        }
    }
}

impl Default for Appender {
    fn default() -> Self {
        Self::new(LogConfig::default())
    }
}

fn first_occurrences(ids: &[StreamId]) -> Vec<StreamId> {
    let mut seen = FxHashSet::default();
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

fn first_duplicate(ids: &[StreamId]) -> Option<StreamId> {
    let mut seen = FxHashSet::default();
    ids.iter().copied().find(|id| !seen.insert(*id))
}
