//! Write gate for serializing mutations
//!
//! Every mutating operation on a log (stream creation, append) runs while
//! holding the gate. An append runs its access predicates inside
//! [`WriteGuard::authorize`], before any state changes.
//!
//! ## Reentrancy
//!
//! Predicates are external code and may call back into the log. Reads are
//! fine: no storage lock is held while predicates run. A mutation from the
//! same thread would otherwise deadlock or interleave with the append in
//! flight, so the gate is a reentrant mutex that tracks its phase and
//! rejects nested entry with `ReentrantMutation`. Other threads simply
//! wait for the gate.
//!
//! ```text
//! enter()          Idle -> Mutating
//!   authorize(f)   Mutating -> Authorizing -> Mutating
//!   commit         (caller takes the storage write lock)
//! drop guard       Mutating -> Idle
//! ```

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};
use std::cell::Cell;
use streamlog_core::{LogError, LogResult};
use tracing::warn;

/// Phase of the operation currently holding the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatePhase {
    /// No mutation in progress
    Idle,
    /// A mutation holds the gate
    Mutating,
    /// A mutation is running access predicates
    Authorizing,
}

/// Serializes the mutating operations of one log
pub struct WriteGate {
    lock: ReentrantMutex<Cell<GatePhase>>,
}

impl WriteGate {
    /// Create an idle gate
    pub fn new() -> Self {
        Self {
            lock: ReentrantMutex::new(Cell::new(GatePhase::Idle)),
        }
    }

    /// Acquire the gate for a mutation
    ///
    /// Blocks while another thread holds the gate.
    ///
    /// # Errors
    ///
    /// `ReentrantMutation` if the calling thread already holds the gate,
    /// which happens when an access predicate tries to mutate the log.
    pub fn enter(&self) -> LogResult<WriteGuard<'_>> {
        let inner = self.lock.lock();
        let phase = inner.get();
        if phase != GatePhase::Idle {
            warn!(?phase, "rejected nested mutation");
            return Err(LogError::ReentrantMutation);
        }
        inner.set(GatePhase::Mutating);
        Ok(WriteGuard { inner })
    }
}

impl std::fmt::Debug for WriteGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WriteGate").finish_non_exhaustive()
    }
}

impl Default for WriteGate {
    fn default() -> Self {
        Self::new()
    }
}

/// Proof that the current thread holds the gate
///
/// Dropping the guard returns the gate to [`GatePhase::Idle`].
pub struct WriteGuard<'a> {
    inner: ReentrantMutexGuard<'a, Cell<GatePhase>>,
}

impl WriteGuard<'_> {
    /// Run `f` in the authorizing phase
    ///
    /// The phase is restored even if `f` panics.
    pub fn authorize<R>(&self, f: impl FnOnce() -> R) -> R {
        self.inner.set(GatePhase::Authorizing);
        let _restore = PhaseRestore {
            cell: &*self.inner,
            phase: GatePhase::Mutating,
        };
        f()
    }

    /// Current phase
    pub fn phase(&self) -> GatePhase {
        self.inner.get()
    }
}

impl std::fmt::Debug for WriteGuard<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WriteGuard")
            .field("phase", &self.phase())
            .finish()
    }
}

impl Drop for WriteGuard<'_> {
    fn drop(&mut self) {
        self.inner.set(GatePhase::Idle);
    }
}

struct PhaseRestore<'a> {
    cell: &'a Cell<GatePhase>,
    phase: GatePhase,
}

impl Drop for PhaseRestore<'_> {
    fn drop(&mut self) {
        self.cell.set(self.phase);
    }
}
