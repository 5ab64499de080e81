//! Core types for streamlog
//!
//! This crate defines the canonical data structures shared by every layer:
//! - [`StreamId`], [`WriterId`], [`Position`]: identifiers
//! - [`DataRoot`]: fixed-size commitment to off-log payload data
//! - [`LogEntry`] and [`EntryDraft`]: stored entries and their pre-commit form
//! - [`LogError`]: the error taxonomy for every log operation
//! - [`LogEvent`]: notifications delivered to observers
//!
//! ## Design Principle
//!
//! - **streamlog-core** defines semantic types (this crate)
//! - **streamlog-storage** owns the entry sequence and stream indices
//! - **streamlog-engine** orchestrates validation, authorization and commit

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod entry;
pub mod error;
pub mod event;
pub mod limits;
pub mod types;

pub use entry::{EntryDraft, LogEntry};
pub use error::{LogError, LogResult};
pub use event::LogEvent;
pub use limits::{MAX_DATA_LENGTH, MAX_STREAMS_PER_LOG};
pub use types::{DataRoot, Position, StreamId, StreamIdAllocator, WriterId};
