//! Authorization predicates
//!
//! A predicate renders the allow/deny decision for a restricted stream.
//! Evaluation is allowed to have side effects: real policies record usage,
//! decrement quotas, and so on. The log evaluates predicates before it
//! mutates anything and without holding storage locks, so a predicate may
//! read the log it guards. It may not mutate it.

use parking_lot::RwLock;
use rustc_hash::FxHashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use streamlog_core::{StreamId, WriterId};

/// External authorization object attached to a restricted stream
///
/// Implementations are shared behind `Arc`, so any bookkeeping they perform
/// goes through interior mutability.
pub trait AccessPredicate: Send + Sync {
    /// Decide whether `writer` may append to `stream`
    fn can_append(&self, writer: &WriterId, stream: StreamId) -> bool;
}

impl<F> AccessPredicate for F
where
    F: Fn(&WriterId, StreamId) -> bool + Send + Sync,
{
    fn can_append(&self, writer: &WriterId, stream: StreamId) -> bool {
        self(writer, stream)
    }
}

/// Predicate that denies every writer
#[derive(Debug, Clone, Copy, Default)]
pub struct DenyAll;

impl AccessPredicate for DenyAll {
    fn can_append(&self, _writer: &WriterId, _stream: StreamId) -> bool {
        false
    }
}

/// Mutable set of writers allowed to append
///
/// Counts every evaluation as its bookkeeping side effect.
#[derive(Debug, Default)]
pub struct AllowList {
    writers: RwLock<FxHashSet<WriterId>>,
    checks: AtomicU64,
}

impl AllowList {
    /// Create an empty allow list (denies everyone)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an allow list with the given writers
    pub fn with_writers<I, W>(writers: I) -> Self
    where
        I: IntoIterator<Item = W>,
        W: Into<WriterId>,
    {
        let list = Self::new();
        list.writers
            .write()
            .extend(writers.into_iter().map(Into::into));
        list
    }

    /// Allow `writer`. Returns `false` if it was already allowed.
    pub fn grant(&self, writer: impl Into<WriterId>) -> bool {
        self.writers.write().insert(writer.into())
    }

    /// Disallow `writer`. Returns `false` if it was not allowed.
    pub fn revoke(&self, writer: &WriterId) -> bool {
        self.writers.write().remove(writer)
    }

    /// Whether `writer` is currently allowed
    pub fn contains(&self, writer: &WriterId) -> bool {
        self.writers.read().contains(writer)
    }

    /// Number of times this predicate has been evaluated
    pub fn checks(&self) -> u64 {
        self.checks.load(Ordering::Relaxed)
    }
}

impl AccessPredicate for AllowList {
    fn can_append(&self, writer: &WriterId, _stream: StreamId) -> bool {
        self.checks.fetch_add(1, Ordering::Relaxed);
        self.contains(writer)
    }
}
