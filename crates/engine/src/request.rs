//! Append requests

use streamlog_core::{DataRoot, StreamId};

/// Arguments of one append
///
/// Build with [`AppendRequest::data`] or [`AppendRequest::commitment`], then
/// name target streams with [`to_streams`](Self::to_streams). A request that
/// never names streams goes to the implicit open stream 0.
///
/// ```ignore
/// let request = AppendRequest::commitment(DataRoot::digest(b"blob"), 3)
///     .to_streams([orders, audit]);
/// let position = log.append(&writer, request)?;
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppendRequest {
    pub(crate) streams: Option<Vec<StreamId>>,
    pub(crate) data: Vec<u8>,
    pub(crate) data_root: DataRoot,
    pub(crate) num_chunks: u32,
}

impl AppendRequest {
    /// Request carrying an inline payload
    pub fn data(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            ..Default::default()
        }
    }

    /// Request carrying a commitment to `num_chunks` off-log chunks
    pub fn commitment(data_root: DataRoot, num_chunks: u32) -> Self {
        Self {
            data_root,
            num_chunks,
            ..Default::default()
        }
    }

    /// Target explicit streams (an empty list indexes the entry nowhere)
    pub fn to_streams<I, S>(mut self, streams: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<StreamId>,
    {
        self.streams = Some(streams.into_iter().map(Into::into).collect());
        self
    }

    /// Target the implicit open stream
    pub fn to_default_stream(mut self) -> Self {
        self.streams = None;
        self
    }

    /// Replace the inline payload
    pub fn with_data(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.data = data.into();
        self
    }

    /// Replace the commitment
    pub fn with_data_root(mut self, data_root: DataRoot) -> Self {
        self.data_root = data_root;
        self
    }

    /// Replace the chunk count
    pub fn with_num_chunks(mut self, num_chunks: u32) -> Self {
        self.num_chunks = num_chunks;
        self
    }

    /// Explicit target streams, `None` for the implicit stream
    pub fn streams(&self) -> Option<&[StreamId]> {
        self.streams.as_deref()
    }
}
