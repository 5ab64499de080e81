//! Log event observers

use parking_lot::Mutex;
use streamlog_core::LogEvent;

/// Receives [`LogEvent`]s after the mutation that caused them has committed
///
/// Called with no log locks held, so an observer may read the log.
pub trait LogObserver: Send + Sync {
    /// Handle one event
    fn on_event(&self, event: &LogEvent);
}

impl<F> LogObserver for F
where
    F: Fn(&LogEvent) + Send + Sync,
{
    fn on_event(&self, event: &LogEvent) {
        self(event)
    }
}

/// Observer that buffers every event it receives
#[derive(Debug, Default)]
pub struct EventRecorder {
    events: Mutex<Vec<LogEvent>>,
}

impl EventRecorder {
    /// Empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the events received so far
    pub fn events(&self) -> Vec<LogEvent> {
        self.events.lock().clone()
    }

    /// Drain the buffer
    pub fn take(&self) -> Vec<LogEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    /// Number of buffered events
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// Whether nothing is buffered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LogObserver for EventRecorder {
    fn on_event(&self, event: &LogEvent) {
        self.events.lock().push(event.clone());
    }
}
