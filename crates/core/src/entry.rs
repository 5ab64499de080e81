//! Entry types for the append-only log
//!
//! An [`EntryDraft`] is what the appender commits; the entry store turns it
//! into a [`LogEntry`] by assigning the next position.

use crate::types::{DataRoot, Position, StreamId};
use serde::{Deserialize, Serialize};

/// Entry contents before a position has been assigned
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EntryDraft {
    /// Streams the entry belongs to
    pub stream_ids: Vec<StreamId>,
    /// Inline payload
    pub data: Vec<u8>,
    /// Commitment to an off-log payload
    pub data_root: DataRoot,
    /// Number of off-log chunks covered by `data_root`
    pub num_chunks: u32,
}

/// An entry in the log
///
/// Entries are immutable records. Each entry includes:
/// - Its global position (assigned at append time)
/// - The streams it belongs to
/// - Either an inline payload or a commitment to an off-log payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Position in the global sequence
    pub position: Position,
    /// Streams the entry belongs to, in the order supplied by the writer
    pub stream_ids: Vec<StreamId>,
    /// Inline payload (empty when a commitment is used)
    pub data: Vec<u8>,
    /// Commitment to an off-log payload (zero when data is inline)
    pub data_root: DataRoot,
    /// Number of off-log chunks covered by `data_root`
    pub num_chunks: u32,
}

impl LogEntry {
    /// Materialize a draft at `position`
    pub fn from_draft(position: Position, draft: EntryDraft) -> Self {
        Self {
            position,
            stream_ids: draft.stream_ids,
            data: draft.data,
            data_root: draft.data_root,
            num_chunks: draft.num_chunks,
        }
    }

    /// Whether the entry lists `stream`
    pub fn is_in_stream(&self, stream: StreamId) -> bool {
        self.stream_ids.contains(&stream)
    }

    /// Whether the payload lives off-log
    pub fn has_commitment(&self) -> bool {
        !self.data_root.is_zero()
    }
}
