//! # streamlog
//!
//! In-memory multi-stream append-only event log.
//!
//! Every entry lands at the next position of one global sequence and is
//! indexed into each stream it names. Streams are either open to every
//! writer or guarded by an access predicate.
//!
//! ## Quick Start
//!
//! ```ignore
//! use streamlog::prelude::*;
//!
//! let log = StreamLog::new();
//! let audit = log.create_stream(AccessControl::restricted(AllowList::with_writers(["auditor"])))?;
//! let orders = log.create_stream(AccessControl::Open)?;
//!
//! let writer = WriterId::from("auditor");
//! let request = AppendRequest::commitment(DataRoot::digest(b"blob"), 4)
//!     .to_streams([orders, audit]);
//! let position = log.append(&writer, request)?;
//!
//! // Walk the global sequence...
//! let page = log.scan(&[orders], 0, 100)?;
//! // ...or merge the per-stream indices, touching only matching entries
//! let page = log.merge_scan(&[orders, audit], &[0, 0], 100)?;
//! ```
//!
//! ## Layers
//!
//! - `streamlog-core` - ids, entries, errors, limits
//! - `streamlog-security` - access predicates and the access gate
//! - `streamlog-storage` - entry store, stream registry, stream indices
//! - `streamlog-concurrency` - the write gate serializing mutations
//! - `streamlog-engine` - validation, iteration, configuration, events

#![warn(missing_docs)]

mod error;
mod log;

pub mod prelude;

// Re-export main entry points
pub use error::{Error, Result};
pub use log::{StreamLog, StreamLogBuilder};

// Re-export engine surface
pub use streamlog_engine::{
    AppendRequest, ConfigError, DuplicateStreamPolicy, EventRecorder, LogConfig, LogObserver,
    MergePage, PayloadSchema, ScanPage,
};

// Re-export core types
pub use streamlog_core::{
    DataRoot, LogEntry, LogError, LogEvent, Position, StreamId, WriterId, MAX_DATA_LENGTH,
    MAX_STREAMS_PER_LOG,
};

// Re-export access control
pub use streamlog_security::{AccessControl, AccessPredicate, AllowList, DenyAll};

pub use streamlog_storage::StreamInfo;
