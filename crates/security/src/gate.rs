//! Access policy attached to streams and the gate that evaluates it

use crate::predicate::AccessPredicate;
use rustc_hash::FxHashSet;
use std::fmt;
use std::sync::Arc;
use streamlog_core::{StreamId, WriterId};
use tracing::trace;

/// Access policy of a stream
#[derive(Clone, Default)]
pub enum AccessControl {
    /// Any writer may append
    #[default]
    Open,
    /// Appends are decided by an external predicate
    Restricted(Arc<dyn AccessPredicate>),
}

impl AccessControl {
    /// Restrict a stream with `predicate`
    pub fn restricted(predicate: impl AccessPredicate + 'static) -> Self {
        AccessControl::Restricted(Arc::new(predicate))
    }

    /// Restrict a stream with a predicate the caller keeps a handle to
    pub fn shared(predicate: Arc<dyn AccessPredicate>) -> Self {
        AccessControl::Restricted(predicate)
    }

    /// Whether any writer may append
    pub fn is_open(&self) -> bool {
        matches!(self, AccessControl::Open)
    }
}

impl fmt::Debug for AccessControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessControl::Open => f.write_str("Open"),
            AccessControl::Restricted(_) => f.write_str("Restricted(..)"),
        }
    }
}

/// Decides whether a writer may append to a stream
///
/// Evaluation order:
/// 1. Open stream: allowed, predicate never consulted
/// 2. Privileged writer: allowed, predicate never consulted
/// 3. Otherwise: whatever the predicate returns
#[derive(Debug, Clone, Default)]
pub struct AccessGate {
    privileged: FxHashSet<WriterId>,
}

impl AccessGate {
    /// Gate with no privileged writers
    pub fn new() -> Self {
        Self::default()
    }

    /// Gate where `writers` bypass restricted-stream predicates
    pub fn with_privileged<I, W>(writers: I) -> Self
    where
        I: IntoIterator<Item = W>,
        W: Into<WriterId>,
    {
        Self {
            privileged: writers.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `writer` bypasses predicates
    pub fn is_privileged(&self, writer: &WriterId) -> bool {
        self.privileged.contains(writer)
    }

    /// Whether evaluating `access` for `writer` would call a predicate
    pub fn needs_predicate(&self, access: &AccessControl, writer: &WriterId) -> bool {
        !access.is_open() && !self.is_privileged(writer)
    }

    /// Decide whether `writer` may append to `stream` under `access`
    pub fn can_append(&self, access: &AccessControl, stream: StreamId, writer: &WriterId) -> bool {
        match access {
            AccessControl::Open => true,
            AccessControl::Restricted(_) if self.is_privileged(writer) => {
                trace!(%stream, %writer, "privileged writer bypasses predicate");
                true
            }
            AccessControl::Restricted(predicate) => {
                let allowed = predicate.can_append(writer, stream);
                trace!(%stream, %writer, allowed, "predicate evaluated");
                allowed
            }
        }
    }
}
