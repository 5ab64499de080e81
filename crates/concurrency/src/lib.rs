//! Concurrency layer for streamlog
//!
//! This crate implements mutation serialization with:
//! - WriteGate: one mutating operation at a time per log
//! - Reentrancy detection while access predicates run

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod write_gate;

pub use write_gate::{GatePhase, WriteGate, WriteGuard};
