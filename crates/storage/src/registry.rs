//! Stream registry
//!
//! Streams are stored densely: stream `n` lives in slot `n`. Slot 0 holds
//! the implicit open stream, which exists in every log and is never handed
//! out by [`StreamRegistry::create`].

use crate::stream_index::StreamIndex;
use serde::{Deserialize, Serialize};
use streamlog_core::{LogError, LogResult, Position, StreamId, StreamIdAllocator};
use streamlog_security::AccessControl;

/// A registered stream
#[derive(Debug, Clone)]
pub struct Stream {
    id: StreamId,
    access: AccessControl,
    index: StreamIndex,
}

impl Stream {
    fn new(id: StreamId, access: AccessControl) -> Self {
        Self {
            id,
            access,
            index: StreamIndex::new(),
        }
    }

    /// Stream id
    pub fn id(&self) -> StreamId {
        self.id
    }

    /// Access policy
    pub fn access(&self) -> &AccessControl {
        &self.access
    }

    /// Positions of member entries
    pub fn index(&self) -> &StreamIndex {
        &self.index
    }

    /// Summary of the stream's state
    pub fn info(&self) -> StreamInfo {
        StreamInfo {
            id: self.id,
            open: self.access.is_open(),
            count: self.index.len() as u64,
            first_position: self.index.first(),
            last_position: self.index.last(),
        }
    }
}

/// Per-stream statistics, O(1) to compute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamInfo {
    /// Stream id
    pub id: StreamId,
    /// Whether any writer may append
    pub open: bool,
    /// Number of member entries
    pub count: u64,
    /// Position of the first member entry
    pub first_position: Option<Position>,
    /// Position of the last member entry
    pub last_position: Option<Position>,
}

/// Owns every stream of a log
#[derive(Debug, Clone)]
pub struct StreamRegistry {
    streams: Vec<Stream>,
    ids: StreamIdAllocator,
}

impl StreamRegistry {
    /// Registry containing only the implicit open stream
    pub fn new() -> Self {
        Self {
            streams: vec![Stream::new(StreamId::DEFAULT, AccessControl::Open)],
            ids: StreamIdAllocator::new(),
        }
    }

    /// Register a stream and return its id
    ///
    /// Ids are sequential from 1 and never reused.
    pub fn create(&mut self, access: AccessControl) -> StreamId {
        let id = self.ids.allocate();
        debug_assert_eq!(id.as_u64() as usize, self.streams.len());
        self.streams.push(Stream::new(id, access));
        id
    }

    /// Look up a stream
    ///
    /// # Errors
    ///
    /// `UnknownStream` if `id` was never created.
    pub fn get(&self, id: StreamId) -> LogResult<&Stream> {
        usize::try_from(id.as_u64())
            .ok()
            .and_then(|slot| self.streams.get(slot))
            .ok_or(LogError::UnknownStream(id))
    }

    fn get_mut(&mut self, id: StreamId) -> LogResult<&mut Stream> {
        usize::try_from(id.as_u64())
            .ok()
            .and_then(|slot| self.streams.get_mut(slot))
            .ok_or(LogError::UnknownStream(id))
    }

    /// Whether `id` names a registered stream
    pub fn contains(&self, id: StreamId) -> bool {
        self.get(id).is_ok()
    }

    /// Check that every id in `ids` is registered
    pub fn ensure_all(&self, ids: &[StreamId]) -> LogResult<()> {
        ids.iter().try_for_each(|id| self.get(*id).map(|_| ()))
    }

    /// Ascending member positions of stream `id`
    pub fn indices_of(&self, id: StreamId) -> LogResult<&[Position]> {
        Ok(self.get(id)?.index.positions())
    }

    /// Number of streams created through [`create`](Self::create)
    ///
    /// The implicit stream 0 is not counted.
    pub fn len(&self) -> u64 {
        self.ids.last().as_u64()
    }

    /// Whether no stream has been created
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ids of all streams, including stream 0, in ascending order
    pub fn ids(&self) -> impl Iterator<Item = StreamId> + '_ {
        self.streams.iter().map(|s| s.id)
    }

    /// Add `position` to the index of stream `id`
    ///
    /// Returns `false` if the index already ends at or past `position`.
    pub(crate) fn index_position(&mut self, id: StreamId, position: Position) -> LogResult<bool> {
        Ok(self.get_mut(id)?.index.push(position))
    }
}

impl Default for StreamRegistry {
    fn default() -> Self {
        Self::new()
    }
}
