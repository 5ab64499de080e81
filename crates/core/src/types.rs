//! Identifier types for the log
//!
//! This module defines the fundamental identifiers used throughout the system:
//! - [`Position`]: global, zero-based sequence number of an entry
//! - [`StreamId`]: identity of a stream (stream 0 is the implicit open stream)
//! - [`WriterId`]: opaque token naming the caller of a mutating operation
//! - [`DataRoot`]: 32-byte commitment standing in for off-log payload data

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Global position of an entry in the log
///
/// Positions are dense and zero-based: the n-th appended entry has
/// position `n - 1`.
pub type Position = u64;

/// Identifier of a stream
///
/// Stream ids are assigned monotonically by the registry starting at 1.
/// [`StreamId::DEFAULT`] (id 0) is reserved for the implicit open stream
/// that exists in every log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StreamId(u64);

impl StreamId {
    /// The implicit open stream targeted by appends without a stream list
    pub const DEFAULT: StreamId = StreamId(0);

    /// Create a stream id from its raw value
    pub const fn new(id: u64) -> Self {
        StreamId(id)
    }

    /// Raw numeric value
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Whether this is the reserved implicit stream
    pub const fn is_default(self) -> bool {
        self.0 == 0
    }

    /// The id following this one
    pub(crate) const fn next(self) -> Self {
        StreamId(self.0 + 1)
    }
}

impl From<u64> for StreamId {
    fn from(id: u64) -> Self {
        StreamId(id)
    }
}

impl fmt::Display for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Allocator for stream ids
///
/// Hands out 1, 2, 3, ... and never reuses an id.
#[derive(Debug, Clone)]
pub struct StreamIdAllocator {
    last: StreamId,
}

impl StreamIdAllocator {
    /// Create an allocator whose first id is 1
    pub fn new() -> Self {
        Self {
            last: StreamId::DEFAULT,
        }
    }

    /// Allocate the next id
    pub fn allocate(&mut self) -> StreamId {
        self.last = self.last.next();
        self.last
    }

    /// Most recently allocated id (`StreamId::DEFAULT` if none)
    pub fn last(&self) -> StreamId {
        self.last
    }
}

impl Default for StreamIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// Opaque identity of a writer
///
/// Supplied by the host's caller-authentication mechanism. The log only
/// compares writer ids; it never interprets them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WriterId(String);

impl WriterId {
    /// Create a writer id from any string-like token
    pub fn new(token: impl Into<String>) -> Self {
        WriterId(token.into())
    }

    /// The underlying token
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WriterId {
    fn from(token: &str) -> Self {
        WriterId::new(token)
    }
}

impl From<String> for WriterId {
    fn from(token: String) -> Self {
        WriterId(token)
    }
}

impl fmt::Display for WriterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fixed-size commitment to payload data stored outside the log
///
/// The all-zero root means "no commitment".
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataRoot([u8; 32]);

impl DataRoot {
    /// The unset (all-zero) root
    pub const ZERO: DataRoot = DataRoot([0u8; 32]);

    /// Wrap raw commitment bytes
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        DataRoot(bytes)
    }

    /// SHA-256 commitment over `data`
    pub fn digest(data: impl AsRef<[u8]>) -> Self {
        DataRoot(Sha256::digest(data.as_ref()).into())
    }

    /// Raw bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Whether this is the unset root
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }
}

impl fmt::Display for DataRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl fmt::Debug for DataRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DataRoot({})", self)
    }
}
