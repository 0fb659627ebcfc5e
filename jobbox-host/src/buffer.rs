//! In-memory log buffer
//!
//! Collects log entries while a job runs so that the execution service can
//! attach them to the run record once the job returns.

use jobbox_core::domain::log::{LogEntry, LogLevel};
use std::sync::{Arc, Mutex};

use crate::logger::LogSink;

/// Shared, timestamping log sink
///
/// Clones share the same entries: hand one clone to a `Logger` and keep
/// another to drain from.
#[derive(Clone, Default)]
pub struct InMemoryLogBuffer {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl InMemoryLogBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drains all log entries from the buffer
    ///
    /// Returns buffered entries in insertion order and clears the buffer.
    pub fn drain(&self) -> Vec<LogEntry> {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.drain(..).collect()
    }
}

impl LogSink for InMemoryLogBuffer {
    fn write(&mut self, level: LogLevel, message: &str) {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.push(LogEntry::now(level, message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::Logger;

    #[test]
    fn test_drain_preserves_order_and_clears() {
        let mut buffer = InMemoryLogBuffer::new();
        buffer.write(LogLevel::Info, "first");
        buffer.write(LogLevel::Error, "second");

        let entries = buffer.drain();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].message, "first");
        assert_eq!(entries[1].level, LogLevel::Error);
        assert!(buffer.drain().is_empty());
    }

    #[test]
    fn test_clones_share_entries_through_logger() {
        let buffer = InMemoryLogBuffer::new();
        let logger = Logger::new("job", buffer.clone());

        logger.warning("careful");
        logger.critical("on fire");

        let entries = buffer.drain();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].level, LogLevel::Warning);
        assert_eq!(entries[1].level, LogLevel::Critical);
        assert_eq!(entries[1].message, "on fire");
        assert!(entries[0].timestamp <= entries[1].timestamp);
    }
}
