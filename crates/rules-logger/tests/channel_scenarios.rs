//! # Logger Channel Scenarios
//!
//! Table-driven gate scenarios, threshold boundaries for both gates, sink
//! ordering and concurrent registration.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use parking_lot::Mutex;
use proptest::prelude::*;
use rules_core::Severity;
use rules_logger::{
    LogContext, LogRecord, LogSink, LoggerSettings, RulesLoggerChannel, SinkError,
};

/// Counts calls matching an expected severity and message.
struct ExpectingSink {
    severity: Severity,
    message: &'static str,
    calls: AtomicUsize,
}

impl LogSink for ExpectingSink {
    fn log(&self, record: &LogRecord) -> Result<(), SinkError> {
        assert_eq!(record.severity, self.severity);
        assert_eq!(record.message, self.message);
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct Scenario {
    level: &'static str,
    rfc_level: Severity,
    log_check: u8,
    threshold: &'static str,
    expected_calls: usize,
    message: &'static str,
}

fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            level: "debug",
            rfc_level: Severity::Debug,
            log_check: 0,
            threshold: "debug",
            expected_calls: 0,
            message: "apple",
        },
        Scenario {
            level: "critical",
            rfc_level: Severity::Critical,
            log_check: 1,
            threshold: "debug",
            expected_calls: 1,
            message: "banana",
        },
        Scenario {
            level: "critical",
            rfc_level: Severity::Critical,
            log_check: 1,
            threshold: "debug",
            expected_calls: 1,
            message: "orange",
        },
        Scenario {
            level: "info",
            rfc_level: Severity::Info,
            log_check: 1,
            threshold: "critical",
            expected_calls: 0,
            message: "cucumber",
        },
    ]
}

#[test]
fn test_log_scenarios() {
    for scenario in scenarios() {
        // The screen flag is absent from the host config, so it stays off.
        let yaml = format!(
            "log_check: {}\nlog_level_system: {}\nlog_level_screen: {}\n",
            scenario.log_check, scenario.threshold, scenario.threshold
        );
        let settings = LoggerSettings::from_yaml_str(&yaml).unwrap();
        let channel = RulesLoggerChannel::new(settings);
        let sink = Arc::new(ExpectingSink {
            severity: scenario.rfc_level,
            message: scenario.message,
            calls: AtomicUsize::new(0),
        });
        channel.add_logger(sink.clone());

        channel
            .log(scenario.level, scenario.message, LogContext::new())
            .unwrap();

        assert_eq!(
            sink.calls.load(Ordering::SeqCst),
            scenario.expected_calls,
            "scenario '{}'",
            scenario.message
        );
    }
}

#[test]
fn test_persistent_gate_boundaries() {
    for threshold in Severity::all() {
        let settings = LoggerSettings::new(true, *threshold, false, Severity::Debug);
        let channel = RulesLoggerChannel::new(settings);

        let at = channel.log(*threshold, "at", LogContext::new()).unwrap();
        assert!(at.persistent, "equal to {threshold} must pass");

        if let Ok(weaker) = Severity::from_ordinal(i64::from(threshold.ordinal()) + 1) {
            let below = channel.log(weaker, "below", LogContext::new()).unwrap();
            assert!(!below.persistent, "{weaker} must fail a {threshold} cutoff");
        }
    }
}

#[test]
fn test_screen_gate_boundaries() {
    for threshold in Severity::all() {
        let settings = LoggerSettings::new(false, Severity::Debug, true, *threshold);
        let channel = RulesLoggerChannel::new(settings);

        assert!(channel.log(*threshold, "at", LogContext::new()).unwrap().screen);
        if let Ok(weaker) = Severity::from_ordinal(i64::from(threshold.ordinal()) + 1) {
            assert!(!channel.log(weaker, "below", LogContext::new()).unwrap().screen);
        }
    }
}

#[test]
fn test_gates_are_independent() {
    let settings = LoggerSettings::new(true, Severity::Critical, true, Severity::Info);
    let channel = RulesLoggerChannel::new(settings);

    let info = channel.log(Severity::Info, "i", LogContext::new()).unwrap();
    assert!(!info.persistent);
    assert!(info.screen);

    let critical = channel.log(Severity::Critical, "c", LogContext::new()).unwrap();
    assert!(critical.persistent);
    assert!(critical.screen);

    let debug = channel.log(Severity::Debug, "d", LogContext::new()).unwrap();
    assert!(!debug.accepted());
}

/// Appends its tag to a shared journal.
struct OrderedSink {
    tag: usize,
    journal: Arc<Mutex<Vec<usize>>>,
}

impl LogSink for OrderedSink {
    fn log(&self, _record: &LogRecord) -> Result<(), SinkError> {
        self.journal.lock().push(self.tag);
        Ok(())
    }
}

#[test]
fn test_sinks_called_once_each_in_registration_order() {
    let settings = LoggerSettings::new(true, Severity::Debug, false, Severity::Debug);
    let channel = RulesLoggerChannel::new(settings);
    let journal = Arc::new(Mutex::new(Vec::new()));
    for tag in 0..4 {
        channel.add_logger(Arc::new(OrderedSink {
            tag,
            journal: journal.clone(),
        }));
    }

    let outcome = channel.log("warning", "w", LogContext::new()).unwrap();
    assert_eq!(outcome.forwarded, 4);
    assert_eq!(*journal.lock(), vec![0, 1, 2, 3]);
}

#[test]
fn test_concurrent_registration_and_logging() {
    let settings = LoggerSettings::new(true, Severity::Debug, false, Severity::Debug);
    let channel = Arc::new(RulesLoggerChannel::new(settings));
    let journal = Arc::new(Mutex::new(Vec::new()));

    let handles: Vec<_> = (0..8)
        .map(|tag| {
            let channel = channel.clone();
            let journal = journal.clone();
            thread::spawn(move || {
                channel.add_logger(Arc::new(OrderedSink { tag, journal }));
                channel.log(Severity::Info, "t", LogContext::new()).unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(channel.sink_count(), 8);
    let after = channel.log(Severity::Info, "final", LogContext::new()).unwrap();
    assert_eq!(after.forwarded, 8);
}

proptest! {
    #[test]
    fn prop_zero_sinks_never_error(
        persistent in any::<bool>(),
        screen in any::<bool>(),
        persistent_cutoff in 0i64..8,
        screen_cutoff in 0i64..8,
        level in 0i64..8,
    ) {
        let settings = LoggerSettings::new(
            persistent,
            Severity::from_ordinal(persistent_cutoff).unwrap(),
            screen,
            Severity::from_ordinal(screen_cutoff).unwrap(),
        );
        let channel = RulesLoggerChannel::new(settings);
        let outcome = channel.log(level, "m", LogContext::new()).unwrap();
        prop_assert_eq!(outcome.forwarded, 0);
        prop_assert_eq!(outcome.persistent, persistent && level <= persistent_cutoff);
        prop_assert_eq!(outcome.screen, screen && level <= screen_cutoff);
    }
}
