//! Error types for log operations
//!
//! Every failure is detected before any state is mutated, so an error from a
//! mutating operation always means "nothing happened".
//!
//! | Error | Raised by |
//! |-------|-----------|
//! | `TooManyStreams` | append: stream list longer than the limit |
//! | `PayloadTooLarge` | append: inline data longer than the limit |
//! | `InvalidPayloadSpec` | append: data/commitment combination not allowed |
//! | `DuplicateStream` | append: repeated stream id under the reject policy |
//! | `Unauthorized` | append: access predicate denied the writer |
//! | `UnknownStream` | append, scans, stream lookups |
//! | `OutOfRange` | single-entry lookup past the end of the log |
//! | `CursorMismatch` | merge scan with unequal stream and cursor counts |
//! | `ReentrantMutation` | mutation attempted from inside an access predicate |

use crate::types::{Position, StreamId, WriterId};
use thiserror::Error;

/// Errors returned by log operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LogError {
    /// Too many stream ids in a single append
    #[error("too many streams: {count} listed, limit is {limit}")]
    TooManyStreams {
        /// Number of ids supplied
        count: usize,
        /// Configured maximum
        limit: usize,
    },

    /// Inline payload exceeds the size limit
    #[error("payload too large: {len} bytes, limit is {limit}")]
    PayloadTooLarge {
        /// Payload length in bytes
        len: usize,
        /// Configured maximum
        limit: usize,
    },

    /// Data and commitment fields are set in a combination the schema rejects
    #[error("invalid payload spec: {reason}")]
    InvalidPayloadSpec {
        /// What was wrong
        reason: &'static str,
    },

    /// The same stream id was listed twice and duplicates are rejected
    #[error("duplicate stream {0} in append")]
    DuplicateStream(StreamId),

    /// The stream's access predicate denied the writer
    #[error("writer {writer} is not authorized to append to stream {stream}")]
    Unauthorized {
        /// Stream that denied the append
        stream: StreamId,
        /// Writer that was denied
        writer: WriterId,
    },

    /// The stream was never created
    #[error("unknown stream {0}")]
    UnknownStream(StreamId),

    /// Entry lookup beyond the stored length
    #[error("position {position} out of range (log has {len} entries)")]
    OutOfRange {
        /// Requested position
        position: Position,
        /// Number of stored entries
        len: u64,
    },

    /// Merge scan called with parallel arrays of different lengths
    #[error("cursor mismatch: {streams} streams but {cursors} cursors")]
    CursorMismatch {
        /// Number of queried streams
        streams: usize,
        /// Number of cursors supplied
        cursors: usize,
    },

    /// A mutation was attempted while an append's access checks were running
    #[error("mutation attempted while an append is authorizing")]
    ReentrantMutation,
}

/// Result type for log operations
pub type LogResult<T> = std::result::Result<T, LogError>;

impl LogError {
    /// Whether the input itself was malformed
    ///
    /// Validation errors will fail again if retried with the same arguments.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            LogError::TooManyStreams { .. }
                | LogError::PayloadTooLarge { .. }
                | LogError::InvalidPayloadSpec { .. }
                | LogError::DuplicateStream(_)
                | LogError::CursorMismatch { .. }
        )
    }

    /// Whether a referenced stream or entry does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, LogError::UnknownStream(_) | LogError::OutOfRange { .. })
    }

    /// Whether an access predicate denied the append
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, LogError::Unauthorized { .. })
    }
}
