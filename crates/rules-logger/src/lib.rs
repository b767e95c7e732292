//! # rules-logger — Rules Logger Channel
//!
//! A logger channel that filters records by two independent severity gates
//! and forwards the survivors to every registered sink.
//!
//! ## Gates
//!
//! - **Persistent**: whether the record should be kept in the system log.
//! - **Screen**: whether the record should be shown to the current user.
//!
//! Each gate passes when it is enabled and the record is at least as severe
//! as the gate's threshold. A record that passes neither gate reaches no
//! sink. A record that passes either one reaches every sink, with the gate
//! outcomes attached so the sink can decide how to render it.
//!
//! ## Failure Semantics
//!
//! Sinks are called synchronously in registration order. The first sink
//! error aborts the call and propagates to the caller; later sinks are not
//! called.

pub mod channel;
pub mod error;
pub mod record;
pub mod settings;
pub mod sink;

// Re-export primary types.
pub use channel::{LogOutcome, RulesLoggerChannel, DEFAULT_CHANNEL};
pub use error::{LoggerError, SettingsError, SinkError};
pub use record::{LogContext, LogRecord};
pub use settings::LoggerSettings;
pub use sink::{LogSink, MemorySink, TracingSink};
