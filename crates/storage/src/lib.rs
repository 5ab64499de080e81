//! Storage layer for streamlog
//!
//! This crate owns the log's in-memory state:
//! - EntryStore: append-only entry sequence, assigns positions
//! - StreamIndex: ascending positions of one stream's members
//! - StreamRegistry: stream identities, access policy and indices
//! - LogState: entry store plus registry, committed together
//!
//! Nothing here locks. The engine wraps [`LogState`] in a lock and is the
//! only writer.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod entry_store;
pub mod registry;
pub mod state;
pub mod stream_index;

pub use entry_store::EntryStore;
pub use registry::{Stream, StreamInfo, StreamRegistry};
pub use state::LogState;
pub use stream_index::StreamIndex;
