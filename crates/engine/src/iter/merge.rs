//! Multi-cursor merge
//!
//! Each queried stream contributes one cursor into its own ascending index.
//! Every step peeks all live cursors, emits the entry at the smallest peeked
//! position, and advances every cursor that peeked that position. An entry
//! shared by several queried streams is therefore emitted once while all of
//! their cursors move past it. Positions outside the queried streams are
//! never visited.
//!
//! ```text
//! stream 1 index: [0, 2]      cursors [0, 0] peek (0, 1) -> emit 0
//! stream 2 index: [1, 2]      cursors [1, 0] peek (2, 1) -> emit 1
//!                             cursors [1, 1] peek (2, 2) -> emit 2, advance both
//!                             cursors [2, 2] exhausted
//! ```

use streamlog_core::{LogEntry, LogError, LogResult, StreamId};
use streamlog_storage::{EntryStore, Stream, StreamIndex, StreamRegistry};

/// One page of [`merge_scan`] results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergePage {
    /// Matching entries in ascending position order
    pub entries: Vec<LogEntry>,
    /// Per-stream cursors after this page; pass back to resume
    pub next_cursors: Vec<usize>,
}

impl MergePage {
    /// Number of entries returned
    pub fn count(&self) -> usize {
        self.entries.len()
    }
}

/// Merge the indices of `query`'s streams starting at `from_cursors`
///
/// `from_cursors[i]` is an offset into the index of `query[i]`. A cursor at
/// or past the end of its index is exhausted and comes back unchanged.
///
/// # Errors
///
/// - `CursorMismatch` if `query` and `from_cursors` differ in length
/// - `UnknownStream` if a queried stream was never created
pub fn merge_scan(
    entries: &EntryStore,
    streams: &StreamRegistry,
    query: &[StreamId],
    from_cursors: &[usize],
    max_results: usize,
) -> LogResult<MergePage> {
    if query.len() != from_cursors.len() {
        return Err(LogError::CursorMismatch {
            streams: query.len(),
            cursors: from_cursors.len(),
        });
    }
    let indices = query
        .iter()
        .map(|id| streams.get(*id).map(Stream::index))
        .collect::<LogResult<Vec<&StreamIndex>>>()?;

    let mut cursors = from_cursors.to_vec();
    let mut out = Vec::new();
    while out.len() < max_results {
        let next = indices
            .iter()
            .zip(&cursors)
            .filter_map(|(index, cursor)| index.peek(*cursor))
            .min();
        let Some(position) = next else {
            break;
        };

        for (index, cursor) in indices.iter().zip(cursors.iter_mut()) {
            if index.peek(*cursor) == Some(position) {
                *cursor += 1;
            }
        }
        out.push(entries.get(position)?.clone());
    }

    Ok(MergePage {
        entries: out,
        next_cursors: cursors,
    })
}
