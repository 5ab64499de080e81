//! Per-stream position index

use streamlog_core::Position;

/// Strictly ascending positions of the entries that belong to one stream
///
/// Entries are appended in position order, so pushing keeps the index
/// sorted without any reordering. Positions are never removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamIndex {
    positions: Vec<Position>,
}

impl StreamIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that the entry at `position` belongs to this stream
    ///
    /// Pushing a position that is not greater than the last one is a no-op,
    /// so one entry is indexed at most once.
    pub(crate) fn push(&mut self, position: Position) -> bool {
        if self.positions.last().is_some_and(|last| *last >= position) {
            return false;
        }
        self.positions.push(position);
        true
    }

    /// Member positions in ascending order
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Position at cursor `cursor`, if the cursor has not reached the end
    #[inline]
    pub fn peek(&self, cursor: usize) -> Option<Position> {
        self.positions.get(cursor).copied()
    }

    /// Number of indexed entries
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether no entry has been indexed
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// First indexed position
    pub fn first(&self) -> Option<Position> {
        self.positions.first().copied()
    }

    /// Last indexed position
    pub fn last(&self) -> Option<Position> {
        self.positions.last().copied()
    }
}
