//! # Rules Logger Channel
//!
//! Gates each record against the persistent and screen thresholds captured
//! at construction, then forwards it to every registered sink.
//!
//! ## Thread Safety
//!
//! The sink list sits behind an `RwLock`. `log` clones the list under the
//! read lock and calls the sinks after releasing it, so a sink may register
//! further sinks without deadlocking; those only see later calls.

use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use parking_lot::RwLock;
use rules_core::{IntoSeverity, Severity};
use serde_json::Value;

use crate::error::LoggerError;
use crate::record::{
    LogContext, LogRecord, CONTEXT_CHANNEL, CONTEXT_PERSISTENT, CONTEXT_SCREEN, CONTEXT_TIMESTAMP,
};
use crate::settings::LoggerSettings;
use crate::sink::LogSink;

/// Channel name used by `RulesLoggerChannel::new`.
pub const DEFAULT_CHANNEL: &str = "rules";

/// What happened to one `log` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogOutcome {
    pub severity: Severity,
    /// Passed the persistent gate.
    pub persistent: bool,
    /// Passed the screen gate.
    pub screen: bool,
    /// Number of sinks the record was forwarded to.
    pub forwarded: usize,
}

impl LogOutcome {
    /// Whether the record passed at least one gate.
    pub fn accepted(&self) -> bool {
        self.persistent || self.screen
    }
}

pub struct RulesLoggerChannel {
    name: String,
    settings: LoggerSettings,
    sinks: RwLock<Vec<Arc<dyn LogSink>>>,
}

impl RulesLoggerChannel {
    pub fn new(settings: LoggerSettings) -> Self {
        Self::with_name(DEFAULT_CHANNEL, settings)
    }

    pub fn with_name(name: impl Into<String>, settings: LoggerSettings) -> Self {
        Self {
            name: name.into(),
            settings,
            sinks: RwLock::new(Vec::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn settings(&self) -> &LoggerSettings {
        &self.settings
    }

    /// Append a sink. Sinks are called in registration order.
    pub fn add_logger(&self, sink: Arc<dyn LogSink>) {
        self.sinks.write().push(sink);
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.read().len()
    }

    /// Gate and forward one record.
    ///
    /// Returns an error if `level` cannot be normalized (no sink is called)
    /// or if a sink fails (sinks after it are not called).
    pub fn log(
        &self,
        level: impl IntoSeverity,
        message: &str,
        context: LogContext,
    ) -> Result<LogOutcome, LoggerError> {
        let severity = level.into_severity()?;
        let persistent = self.settings.stores(severity);
        let screen = self.settings.shows(severity);

        let mut outcome = LogOutcome {
            severity,
            persistent,
            screen,
            forwarded: 0,
        };
        if !outcome.accepted() {
            return Ok(outcome);
        }

        let timestamp = Utc::now();
        let mut context = context;
        context.insert(CONTEXT_PERSISTENT.to_string(), Value::Bool(persistent));
        context.insert(CONTEXT_SCREEN.to_string(), Value::Bool(screen));
        context.insert(CONTEXT_CHANNEL.to_string(), Value::String(self.name.clone()));
        context.insert(
            CONTEXT_TIMESTAMP.to_string(),
            Value::String(timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)),
        );
        let record = LogRecord {
            severity,
            message: message.to_string(),
            context,
            timestamp,
        };

        let sinks: Vec<Arc<dyn LogSink>> = self.sinks.read().clone();
        for (index, sink) in sinks.iter().enumerate() {
            sink.log(&record)
                .map_err(|source| LoggerError::Sink { index, source })?;
            outcome.forwarded += 1;
        }
        Ok(outcome)
    }

    pub fn emergency(&self, message: &str, context: LogContext) -> Result<LogOutcome, LoggerError> {
        self.log(Severity::Emergency, message, context)
    }

    pub fn alert(&self, message: &str, context: LogContext) -> Result<LogOutcome, LoggerError> {
        self.log(Severity::Alert, message, context)
    }

    pub fn critical(&self, message: &str, context: LogContext) -> Result<LogOutcome, LoggerError> {
        self.log(Severity::Critical, message, context)
    }

    pub fn error(&self, message: &str, context: LogContext) -> Result<LogOutcome, LoggerError> {
        self.log(Severity::Error, message, context)
    }

    pub fn warning(&self, message: &str, context: LogContext) -> Result<LogOutcome, LoggerError> {
        self.log(Severity::Warning, message, context)
    }

    pub fn notice(&self, message: &str, context: LogContext) -> Result<LogOutcome, LoggerError> {
        self.log(Severity::Notice, message, context)
    }

    pub fn info(&self, message: &str, context: LogContext) -> Result<LogOutcome, LoggerError> {
        self.log(Severity::Info, message, context)
    }

    pub fn debug(&self, message: &str, context: LogContext) -> Result<LogOutcome, LoggerError> {
        self.log(Severity::Debug, message, context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SinkError;
    use crate::sink::MemorySink;
    use serde_json::json;

    fn channel(settings: LoggerSettings) -> (RulesLoggerChannel, Arc<MemorySink>) {
        let channel = RulesLoggerChannel::new(settings);
        let sink = Arc::new(MemorySink::new());
        channel.add_logger(sink.clone());
        (channel, sink)
    }

    #[test]
    fn test_filtered_record_reaches_no_sink() {
        let (channel, sink) = channel(LoggerSettings::default());
        let outcome = channel.debug("quiet", LogContext::new()).unwrap();
        assert!(!outcome.accepted());
        assert_eq!(outcome.forwarded, 0);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_context_is_augmented() {
        let settings = LoggerSettings::new(true, Severity::Error, false, Severity::Debug);
        let (channel, sink) = channel(settings);
        let context = json!({"rule": "r1", "screen": "caller value"})
            .as_object()
            .cloned()
            .unwrap();
        channel.error("Rule {rule} failed", context).unwrap();

        let records = sink.records();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.severity, Severity::Error);
        assert_eq!(record.message, "Rule {rule} failed");
        assert!(record.persistent());
        assert!(!record.screen());
        assert_eq!(record.context["screen"], json!(false));
        assert_eq!(record.channel(), Some("rules"));
        assert_eq!(record.context["rule"], json!("r1"));
        assert!(record.context[CONTEXT_TIMESTAMP].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn test_screen_gate_alone_forwards() {
        let settings = LoggerSettings::new(false, Severity::Debug, true, Severity::Info);
        let (channel, sink) = channel(settings);
        let outcome = channel.info("visible", LogContext::new()).unwrap();
        assert!(outcome.screen);
        assert!(!outcome.persistent);
        assert_eq!(sink.screen_records().len(), 1);
    }

    #[test]
    fn test_unknown_level_is_rejected_before_sinks() {
        let settings = LoggerSettings::new(true, Severity::Debug, true, Severity::Debug);
        let (channel, sink) = channel(settings);
        let err = channel.log("verbose", "x", LogContext::new()).unwrap_err();
        assert!(matches!(err, LoggerError::Severity(_)));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_named_channel() {
        let channel = RulesLoggerChannel::with_name("rules_debug", LoggerSettings::default());
        assert_eq!(channel.name(), "rules_debug");
        assert_eq!(channel.sink_count(), 0);
    }

    struct RejectingSink;

    impl LogSink for RejectingSink {
        fn log(&self, _record: &LogRecord) -> Result<(), SinkError> {
            Err(SinkError::Rejected("disk full".to_string()))
        }
    }

    #[test]
    fn test_first_sink_error_stops_forwarding() {
        let settings = LoggerSettings::new(true, Severity::Debug, false, Severity::Debug);
        let channel = RulesLoggerChannel::new(settings);
        let before = Arc::new(MemorySink::new());
        let after = Arc::new(MemorySink::new());
        channel.add_logger(before.clone());
        channel.add_logger(Arc::new(RejectingSink));
        channel.add_logger(after.clone());

        let err = channel.notice("n", LogContext::new()).unwrap_err();
        assert!(matches!(err, LoggerError::Sink { index: 1, .. }));
        assert!(err.to_string().contains("disk full"));
        assert_eq!(before.len(), 1);
        assert!(after.is_empty());
    }
}
