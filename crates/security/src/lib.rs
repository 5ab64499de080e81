//! Access control for streamlog streams.
//!
//! This crate provides the [`AccessControl`] policy attached to each stream,
//! the [`AccessPredicate`] trait external authorization objects implement,
//! and the [`AccessGate`] that decides whether a writer may append.
//!
//! Open streams never reach a predicate. Restricted streams delegate to
//! their predicate unless the writer is privileged.

pub mod gate;
pub mod predicate;

pub use gate::{AccessControl, AccessGate};
pub use predicate::{AccessPredicate, AllowList, DenyAll};
