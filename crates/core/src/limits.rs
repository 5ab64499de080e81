//! Boundary limits enforced by the appender

/// Maximum number of stream ids one append may list
pub const MAX_STREAMS_PER_LOG: usize = 10;

/// Maximum inline payload size in bytes
pub const MAX_DATA_LENGTH: usize = 200;
