//! Log engine for streamlog
//!
//! This crate ties the storage, security and concurrency layers into a
//! working log:
//! - LogEngine: the log itself, sequencing appends, reads and events
//! - Appender: request validation and per-stream authorization
//! - iter: single-cursor scan and multi-cursor merge
//! - LogConfig: limits and policies, loadable from TOML
//! - LogObserver: post-commit notifications

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod appender;
pub mod config;
pub mod engine;
pub mod iter;
pub mod observer;
pub mod request;

pub use appender::Appender;
pub use config::{ConfigError, DuplicateStreamPolicy, LogConfig, PayloadSchema};
pub use engine::{LogBuilder, LogEngine};
pub use iter::{merge_scan, scan, MergePage, ScanPage};
pub use observer::{EventRecorder, LogObserver};
pub use request::AppendRequest;
