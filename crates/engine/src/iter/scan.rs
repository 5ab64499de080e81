//! Single-cursor scan
//!
//! Walks the global sequence one position at a time and keeps the entries
//! whose stream list intersects the query. Dense queries are cheap; a query
//! for a rare stream pays for every position it skips.

use rustc_hash::FxHashSet;
use streamlog_core::{LogEntry, LogResult, Position, StreamId};
use streamlog_storage::{EntryStore, StreamRegistry};

/// One page of [`scan`] results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanPage {
    /// Matching entries in ascending position order
    pub entries: Vec<LogEntry>,
    /// Position after the last one examined; pass back to resume
    pub next_position: Position,
}

impl ScanPage {
    /// Number of entries returned
    pub fn count(&self) -> usize {
        self.entries.len()
    }
}

/// Scan from `from_position` for entries in any of `query`'s streams
///
/// Stops after `max_results` matches or at the end of the log.
/// `next_position` is one past the last position examined, matched or not,
/// and equals `from_position` when nothing was examined.
///
/// # Errors
///
/// `UnknownStream` if a queried stream was never created.
pub fn scan(
    entries: &EntryStore,
    streams: &StreamRegistry,
    query: &[StreamId],
    from_position: Position,
    max_results: usize,
) -> LogResult<ScanPage> {
    streams.ensure_all(query)?;

    let mut page = ScanPage {
        entries: Vec::new(),
        next_position: from_position,
    };
    if query.is_empty() || max_results == 0 {
        return Ok(page);
    }

    let wanted: FxHashSet<StreamId> = query.iter().copied().collect();
    for entry in entries.iter_from(from_position) {
        page.next_position = entry.position + 1;
        if entry.stream_ids.iter().any(|id| wanted.contains(id)) {
            page.entries.push(entry.clone());
            if page.entries.len() == max_results {
                break;
            }
        }
    }
    Ok(page)
}
