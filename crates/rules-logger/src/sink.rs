//! # Log Sinks
//!
//! Downstream receivers of forwarded records. Any `LogSink` can be
//! registered on a channel; the channel does not validate it.

use parking_lot::Mutex;
use rules_core::Severity;

use crate::error::SinkError;
use crate::record::LogRecord;

pub trait LogSink: Send + Sync {
    /// Accept one forwarded record. An error aborts the channel's `log` call.
    fn log(&self, record: &LogRecord) -> Result<(), SinkError>;
}

/// Forwards records into `tracing` at the closest level.
///
/// Emergency through error map to `ERROR`, warning to `WARN`, notice and
/// info to `INFO`, debug to `DEBUG`. The message is interpolated from the
/// record context.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, record: &LogRecord) -> Result<(), SinkError> {
        let message = record.interpolate();
        let channel = record.channel().unwrap_or_default();
        let severity = record.severity.as_str();
        let (persistent, screen) = (record.persistent(), record.screen());

        match record.severity {
            Severity::Emergency | Severity::Alert | Severity::Critical | Severity::Error => {
                tracing::error!(channel, severity, persistent, screen, "{message}")
            }
            Severity::Warning => tracing::warn!(channel, severity, persistent, screen, "{message}"),
            Severity::Notice | Severity::Info => {
                tracing::info!(channel, severity, persistent, screen, "{message}")
            }
            Severity::Debug => tracing::debug!(channel, severity, persistent, screen, "{message}"),
        }
        Ok(())
    }
}

/// Keeps every forwarded record in memory, e.g. to render screen messages
/// at the end of a request.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<LogRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().clone()
    }

    /// Drain the buffer.
    pub fn take(&self) -> Vec<LogRecord> {
        std::mem::take(&mut *self.records.lock())
    }

    /// Records that passed the screen gate.
    pub fn screen_records(&self) -> Vec<LogRecord> {
        self.records
            .lock()
            .iter()
            .filter(|record| record.screen())
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

impl LogSink for MemorySink {
    fn log(&self, record: &LogRecord) -> Result<(), SinkError> {
        self.records.lock().push(record.clone());
        Ok(())
    }
}
