//! Main entry point for streamlog.
//!
//! This module provides the `StreamLog` struct, a cheaply cloneable handle to
//! one in-memory log.

use crate::error::{Error, Result};
use std::path::Path;
use std::sync::Arc;
use streamlog_core::{LogEntry, Position, StreamId, WriterId};
use streamlog_engine::{
    AppendRequest, DuplicateStreamPolicy, LogBuilder, LogConfig, LogEngine, LogObserver,
    MergePage, PayloadSchema, ScanPage,
};
use streamlog_security::AccessControl;
use streamlog_storage::StreamInfo;
use tracing::info;

/// A multi-stream append-only log.
///
/// Create a log with [`StreamLog::new`] or [`StreamLog::builder`]. Clones
/// share the same log.
///
/// # Example
///
/// ```ignore
/// use streamlog::prelude::*;
///
/// let log = StreamLog::new();
/// let orders = log.create_stream(AccessControl::Open)?;
///
/// let writer = WriterId::from("checkout");
/// log.append(&writer, AppendRequest::data(b"order #1".to_vec()).to_streams([orders]))?;
///
/// let page = log.scan(&[orders], 0, 100)?;
/// ```
#[derive(Clone)]
pub struct StreamLog {
    inner: Arc<LogEngine>,
}

impl StreamLog {
    /// Create a log with default limits and policies.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(LogEngine::new()),
        }
    }

    /// Create a log configured from a TOML file.
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::builder().config_file(path)?.build()
    }

    /// Create a builder for log configuration.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let log = StreamLog::builder()
    ///     .max_data_length(64)
    ///     .privileged_writer("operator")
    ///     .build()?;
    /// ```
    pub fn builder() -> StreamLogBuilder {
        StreamLogBuilder::new()
    }

    /// The underlying engine.
    pub fn engine(&self) -> &Arc<LogEngine> {
        &self.inner
    }

    /// Configuration in force.
    pub fn config(&self) -> &LogConfig {
        self.inner.config()
    }

    /// Register an observer for future events.
    pub fn subscribe(&self, observer: Arc<dyn LogObserver>) {
        self.inner.subscribe(observer)
    }

    /// Register a stream governed by `access`.
    ///
    /// Ids are assigned sequentially from 1; stream 0 always exists.
    pub fn create_stream(&self, access: AccessControl) -> Result<StreamId> {
        self.inner.create_stream(access).map_err(Error::from)
    }

    /// Append an entry on behalf of `writer` and return its position.
    ///
    /// A failed append leaves the log unchanged.
    pub fn append(&self, writer: &WriterId, request: AppendRequest) -> Result<Position> {
        self.inner.append(writer, request).map_err(Error::from)
    }

    /// Entry at `position`.
    pub fn get_entry(&self, position: Position) -> Result<LogEntry> {
        self.inner.get_entry(position).map_err(Error::from)
    }

    /// Up to `limit` entries starting at `offset`.
    ///
    /// Clamped to the end of the log; empty when `offset` is past the end.
    pub fn get_range(&self, offset: Position, limit: u64) -> Vec<LogEntry> {
        self.inner.get_range(offset, limit)
    }

    /// Number of entries in the log.
    pub fn num_entries(&self) -> u64 {
        self.inner.num_entries()
    }

    /// Number of streams created, not counting stream 0.
    pub fn num_streams(&self) -> u64 {
        self.inner.num_streams()
    }

    /// Ascending positions of the entries in `stream`.
    pub fn indices_of(&self, stream: StreamId) -> Result<Vec<Position>> {
        self.inner.indices_of(stream).map_err(Error::from)
    }

    /// Statistics for `stream`.
    pub fn stream_info(&self, stream: StreamId) -> Result<StreamInfo> {
        self.inner.stream_info(stream).map_err(Error::from)
    }

    /// Ids of every stream, stream 0 first.
    pub fn streams(&self) -> Vec<StreamId> {
        self.inner.streams()
    }

    /// Entries in any of `streams`, walking positions from `from_position`.
    ///
    /// Resume with the returned `next_position`.
    pub fn scan(
        &self,
        streams: &[StreamId],
        from_position: Position,
        max_results: usize,
    ) -> Result<ScanPage> {
        self.inner
            .scan(streams, from_position, max_results)
            .map_err(Error::from)
    }

    /// Entries in any of `streams`, merging per-stream indices.
    ///
    /// Visits only matching entries. Resume with the returned `next_cursors`.
    pub fn merge_scan(
        &self,
        streams: &[StreamId],
        from_cursors: &[usize],
        max_results: usize,
    ) -> Result<MergePage> {
        self.inner
            .merge_scan(streams, from_cursors, max_results)
            .map_err(Error::from)
    }
}

impl Default for StreamLog {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StreamLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("StreamLog").field(&self.inner).finish()
    }
}

/// Builder for log configuration.
///
/// # Example
///
/// ```ignore
/// // From a config file, with an override
/// let log = StreamLog::builder()
///     .config_file("streamlog.toml")?
///     .duplicate_streams(DuplicateStreamPolicy::Reject)
///     .build()?;
/// ```
#[derive(Debug, Default)]
pub struct StreamLogBuilder {
    inner: LogBuilder,
}

impl StreamLogBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: LogConfig) -> Self {
        self.inner = self.inner.config(config);
        self
    }

    /// Load the configuration from a TOML file.
    ///
    /// Overrides applied earlier are replaced; apply overrides after this.
    pub fn config_file(self, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config = LogConfig::from_file(path)?;
        info!(path = %path.display(), "loaded log config");
        Ok(self.config(config))
    }

    /// Maximum stream ids per append.
    pub fn max_streams_per_entry(mut self, limit: usize) -> Self {
        self.inner = self.inner.max_streams_per_entry(limit);
        self
    }

    /// Maximum inline payload size in bytes.
    pub fn max_data_length(mut self, limit: usize) -> Self {
        self.inner = self.inner.max_data_length(limit);
        self
    }

    /// Which payload fields an entry may carry.
    pub fn payload_schema(mut self, schema: PayloadSchema) -> Self {
        self.inner = self.inner.payload_schema(schema);
        self
    }

    /// How repeated stream ids within one append are handled.
    pub fn duplicate_streams(mut self, policy: DuplicateStreamPolicy) -> Self {
        self.inner = self.inner.duplicate_streams(policy);
        self
    }

    /// Add a writer that bypasses restricted-stream predicates.
    pub fn privileged_writer(mut self, writer: impl Into<WriterId>) -> Self {
        self.inner = self.inner.privileged_writer(writer);
        self
    }

    /// Register an observer from the start.
    pub fn observer(mut self, observer: Arc<dyn LogObserver>) -> Self {
        self.inner = self.inner.observer(observer);
        self
    }

    /// Validate the configuration and create the log.
    pub fn build(self) -> Result<StreamLog> {
        let engine = self.inner.build()?;
        Ok(StreamLog {
            inner: Arc::new(engine),
        })
    }
}
