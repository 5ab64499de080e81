//! Append-only entry sequence
//!
//! # Design
//!
//! - Vec<LogEntry>: position equals index, O(1) lookup
//! - No removal or reordering method exists
//! - Range reads clamp to the stored length instead of failing

use streamlog_core::{EntryDraft, LogEntry, LogError, LogResult, Position};

/// Owned, growable sequence of log entries
#[derive(Debug, Clone, Default)]
pub struct EntryStore {
    entries: Vec<LogEntry>,
}

impl EntryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `draft`, returning the position it was stored at
    ///
    /// The position is always the store's length before the call.
    pub fn append(&mut self, draft: EntryDraft) -> Position {
        let position = self.len();
        self.entries.push(LogEntry::from_draft(position, draft));
        position
    }

    /// Entry at `position`
    ///
    /// # Errors
    ///
    /// `OutOfRange` if `position >= len()`.
    pub fn get(&self, position: Position) -> LogResult<&LogEntry> {
        usize::try_from(position)
            .ok()
            .and_then(|idx| self.entries.get(idx))
            .ok_or(LogError::OutOfRange {
                position,
                len: self.len(),
            })
    }

    /// Number of stored entries
    #[inline]
    pub fn len(&self) -> u64 {
        self.entries.len() as u64
    }

    /// Whether no entry has been appended
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries `[offset, min(offset + limit, len))` in ascending order
    ///
    /// Returns an empty slice when `offset >= len()`.
    pub fn range(&self, offset: Position, limit: u64) -> &[LogEntry] {
        let len = self.len();
        if offset >= len {
            return &[];
        }
        let end = offset.saturating_add(limit).min(len);
        &self.entries[offset as usize..end as usize]
    }

    /// Entries from `position` to the end of the log
    pub fn iter_from(&self, position: Position) -> impl Iterator<Item = &LogEntry> {
        self.range(position, u64::MAX).iter()
    }
}
