//! The log engine
//!
//! [`LogEngine`] owns one log's state and sequences every operation over it:
//!
//! ```text
//! append(writer, request)
//!   1. Appender::prepare        validate the request alone
//!   2. WriteGate::enter         serialize with other mutations
//!   3. guard.authorize(..)      per stream: exists? predicate allows?
//!                               (short read locks, none held by predicates)
//!   4. state.write().commit     entry + index pushes under one write lock
//! ```
//!
//! Reads take the state read lock only and never wait on predicates.

use crate::appender::Appender;
use crate::config::{ConfigError, DuplicateStreamPolicy, LogConfig, PayloadSchema};
use crate::iter::{self, MergePage, ScanPage};
use crate::observer::LogObserver;
use crate::request::AppendRequest;
use parking_lot::RwLock;
use std::sync::Arc;
use streamlog_concurrency::WriteGate;
use streamlog_core::{LogEntry, LogError, LogEvent, LogResult, Position, StreamId, WriterId};
use streamlog_security::AccessControl;
use streamlog_storage::{LogState, StreamInfo};
use tracing::{debug, info};

/// An in-memory multi-stream append-only log
///
/// All methods take `&self`; share the engine across threads with `Arc`.
pub struct LogEngine {
    state: RwLock<LogState>,
    gate: WriteGate,
    appender: Appender,
    observers: RwLock<Vec<Arc<dyn LogObserver>>>,
}

impl LogEngine {
    /// Log with the default configuration
    pub fn new() -> Self {
        Self::with_config_unchecked(LogConfig::default())
    }

    /// Start building a log
    pub fn builder() -> LogBuilder {
        LogBuilder::default()
    }

    /// Log with a validated configuration
    pub fn with_config(config: LogConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_config_unchecked(config))
    }

    fn with_config_unchecked(config: LogConfig) -> Self {
        Self {
            state: RwLock::new(LogState::new()),
            gate: WriteGate::new(),
            appender: Appender::new(config),
            observers: RwLock::new(Vec::new()),
        }
    }

    /// Register an observer for future events
    pub fn subscribe(&self, observer: Arc<dyn LogObserver>) {
        self.observers.write().push(observer);
    }

    /// Configuration in force
    pub fn config(&self) -> &LogConfig {
        self.appender.config()
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Register a stream governed by `access`
    ///
    /// Observers receive [`LogEvent::StreamCreated`] once the stream exists.
    ///
    /// # Errors
    ///
    /// `ReentrantMutation` when called from inside an access predicate of
    /// this log.
    pub fn create_stream(&self, access: AccessControl) -> LogResult<StreamId> {
        let open = access.is_open();
        let id = {
            let _guard = self.gate.enter()?;
            self.state.write().create_stream(access)
        };
        info!(stream = %id, open, "stream created");
        self.notify(&LogEvent::StreamCreated { id });
        Ok(id)
    }

    /// Append an entry on behalf of `writer`
    ///
    /// Returns the entry's position, which equals [`num_entries`] before the
    /// call. A failed append leaves the log unchanged.
    ///
    /// # Errors
    ///
    /// In check order: `TooManyStreams`, `PayloadTooLarge`,
    /// `InvalidPayloadSpec`, `DuplicateStream`, then per listed stream
    /// `UnknownStream` or `Unauthorized`. `ReentrantMutation` when called
    /// from inside an access predicate of this log.
    ///
    /// [`num_entries`]: Self::num_entries
    pub fn append(&self, writer: &WriterId, request: AppendRequest) -> LogResult<Position> {
        let prepared = self.appender.prepare(request)?;

        let guard = self.gate.enter()?;
        guard.authorize(|| {
            prepared.authorize.iter().try_for_each(|&stream| {
                let access = self.state.read().streams().get(stream)?.access().clone();
                self.appender.authorize(writer, stream, &access)
            })
        })?;

        let streams = prepared.draft.stream_ids.len();
        let position = self
            .state
            .write()
            .commit(prepared.draft, &prepared.index_into)?;
        drop(guard);

        debug!(position, %writer, streams, "entry appended");
        Ok(position)
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Entry at `position`
    ///
    /// # Errors
    ///
    /// `OutOfRange` if `position >= num_entries()`.
    pub fn get_entry(&self, position: Position) -> LogResult<LogEntry> {
        self.state.read().entries().get(position).cloned()
    }

    /// Up to `limit` entries from `offset`, clamped to the log's end
    pub fn get_range(&self, offset: Position, limit: u64) -> Vec<LogEntry> {
        self.state.read().entries().range(offset, limit).to_vec()
    }

    /// Number of entries
    pub fn num_entries(&self) -> u64 {
        self.state.read().entries().len()
    }

    /// Number of created streams, excluding the implicit stream 0
    pub fn num_streams(&self) -> u64 {
        self.state.read().streams().len()
    }

    /// Ascending positions of the entries in `stream`
    pub fn indices_of(&self, stream: StreamId) -> LogResult<Vec<Position>> {
        Ok(self.state.read().streams().indices_of(stream)?.to_vec())
    }

    /// Summary of `stream`
    pub fn stream_info(&self, stream: StreamId) -> LogResult<StreamInfo> {
        Ok(self.state.read().streams().get(stream)?.info())
    }

    /// Ids of every stream, stream 0 first
    pub fn streams(&self) -> Vec<StreamId> {
        self.state.read().streams().ids().collect()
    }

    /// Position-ordered scan over the union of `streams`
    ///
    /// See [`iter::scan`].
    pub fn scan(
        &self,
        streams: &[StreamId],
        from_position: Position,
        max_results: usize,
    ) -> LogResult<ScanPage> {
        let state = self.state.read();
        let page = iter::scan(
            state.entries(),
            state.streams(),
            streams,
            from_position,
            max_results,
        )?;
        debug!(
            from_position,
            returned = page.count(),
            next_position = page.next_position,
            "scan page"
        );
        Ok(page)
    }

    /// Index merge over `streams`, one cursor per stream
    ///
    /// See [`iter::merge_scan`].
    pub fn merge_scan(
        &self,
        streams: &[StreamId],
        from_cursors: &[usize],
        max_results: usize,
    ) -> LogResult<MergePage> {
        let state = self.state.read();
        let page = iter::merge_scan(
            state.entries(),
            state.streams(),
            streams,
            from_cursors,
            max_results,
        )?;
        debug!(
            streams = streams.len(),
            returned = page.count(),
            next_cursors = ?page.next_cursors,
            "merge page"
        );
        Ok(page)
    }

    fn notify(&self, event: &LogEvent) {
        let observers = self.observers.read().clone();
        for observer in observers {
            observer.on_event(event);
        }
    }
}

impl Default for LogEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LogEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogEngine")
            .field("num_entries", &self.num_entries())
            .field("num_streams", &self.num_streams())
            .field("config", self.config())
            .finish_non_exhaustive()
    }
}

/// Builder for [`LogEngine`]
///
/// ```ignore
/// let engine = LogEngine::builder()
///     .duplicate_streams(DuplicateStreamPolicy::Reject)
///     .privileged_writer("operator")
///     .build()?;
/// ```
#[derive(Default)]
pub struct LogBuilder {
    config: LogConfig,
    observers: Vec<Arc<dyn LogObserver>>,
}

impl LogBuilder {
    /// Replace the whole configuration
    pub fn config(mut self, config: LogConfig) -> Self {
        self.config = config;
        self
    }

    /// Maximum stream ids per append
    pub fn max_streams_per_entry(mut self, limit: usize) -> Self {
        self.config.max_streams_per_entry = limit;
        self
    }

    /// Maximum inline payload size
    pub fn max_data_length(mut self, limit: usize) -> Self {
        self.config.max_data_length = limit;
        self
    }

    /// Allowed payload fields
    pub fn payload_schema(mut self, schema: PayloadSchema) -> Self {
        self.config.payload_schema = schema;
        self
    }

    /// Handling of repeated stream ids
    pub fn duplicate_streams(mut self, policy: DuplicateStreamPolicy) -> Self {
        self.config.duplicate_streams = policy;
        self
    }

    /// Add a writer that bypasses restricted-stream predicates
    pub fn privileged_writer(mut self, writer: impl Into<WriterId>) -> Self {
        self.config.privileged_writers.push(writer.into());
        self
    }

    /// Register an observer from the start
    pub fn observer(mut self, observer: Arc<dyn LogObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Validate the configuration and build the log
    pub fn build(self) -> Result<LogEngine, ConfigError> {
        let engine = LogEngine::with_config(self.config)?;
        *engine.observers.write() = self.observers;
        Ok(engine)
    }
}

impl std::fmt::Debug for LogBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogBuilder")
            .field("config", &self.config)
            .field("observers", &self.observers.len())
            .finish()
    }
}
