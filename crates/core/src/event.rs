//! Notifications emitted by the log

use crate::types::StreamId;
use serde::{Deserialize, Serialize};

/// Notification delivered to external observers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogEvent {
    /// A new stream was registered
    StreamCreated {
        /// Id assigned to the stream
        id: StreamId,
    },
}
