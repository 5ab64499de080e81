//! Convenient imports for streamlog.
//!
//! ```ignore
//! use streamlog::prelude::*;
//!
//! let log = StreamLog::new();
//! log.append(&WriterId::from("w"), AppendRequest::data(b"hello".to_vec()))?;
//! ```

// Main entry point
pub use crate::log::{StreamLog, StreamLogBuilder};

// Error handling
pub use crate::error::{Error, Result};

// Requests and pages
pub use streamlog_engine::{AppendRequest, MergePage, ScanPage};

// Core types
pub use streamlog_core::{DataRoot, LogEntry, Position, StreamId, WriterId};

// Access control
pub use streamlog_security::{AccessControl, AllowList, DenyAll};
