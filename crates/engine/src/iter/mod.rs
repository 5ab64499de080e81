//! Stream-filtered iteration over the log
//!
//! Two strategies over the same read contracts, kept separate because their
//! cost and resumption models differ:
//!
//! | Function | Cursor | Cost | Resume with |
//! |----------|--------|------|-------------|
//! | [`scan`] | one global position | O(positions examined) | `next_position` |
//! | [`merge_scan`] | one index per stream | O(matching entries) | `next_cursors` |
//!
//! Both return entries in ascending position order, each entry once.

mod merge;
mod scan;

pub use merge::{merge_scan, MergePage};
pub use scan::{scan, ScanPage};
