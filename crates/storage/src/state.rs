//! Combined log state
//!
//! [`LogState::commit`] is the only way an entry enters the log. It checks
//! every stream before touching anything, then stores the entry and indexes
//! it, so a caller holding the state exclusively never leaves an entry
//! without its index updates or the other way around.

use crate::entry_store::EntryStore;
use crate::registry::StreamRegistry;
use streamlog_core::{EntryDraft, LogResult, Position, StreamId};
use streamlog_security::AccessControl;

/// Entry store plus stream registry
#[derive(Debug, Clone, Default)]
pub struct LogState {
    entries: EntryStore,
    streams: StreamRegistry,
}

impl LogState {
    /// Empty log with only the implicit stream
    pub fn new() -> Self {
        Self::default()
    }

    /// Entry sequence
    pub fn entries(&self) -> &EntryStore {
        &self.entries
    }

    /// Stream registry
    pub fn streams(&self) -> &StreamRegistry {
        &self.streams
    }

    /// Register a stream
    pub fn create_stream(&mut self, access: AccessControl) -> StreamId {
        self.streams.create(access)
    }

    /// Store `draft` and add its position to every stream in `index_into`
    ///
    /// `index_into` is usually `draft.stream_ids` and must list each stream
    /// once; the caller may pass a deduplicated view. Fails with
    /// `UnknownStream` before any mutation.
    pub fn commit(&mut self, draft: EntryDraft, index_into: &[StreamId]) -> LogResult<Position> {
        self.streams.ensure_all(index_into)?;
        let position = self.entries.append(draft);
        for id in index_into {
            let indexed = self.streams.index_position(*id, position)?;
            debug_assert!(indexed, "stream {id} indexed position {position} twice");
        }
        Ok(position)
    }
}
