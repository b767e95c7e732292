//! # Log Records
//!
//! What a sink receives: the normalized severity, the raw message template,
//! and the caller's context augmented with the gate outcomes, the channel
//! name and the capture time.

use chrono::{DateTime, Utc};
use rules_core::Severity;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Free-form record context.
pub type LogContext = Map<String, Value>;

/// Context key: whether the record passed the persistent gate.
pub const CONTEXT_PERSISTENT: &str = "persistent";
/// Context key: whether the record passed the screen gate.
pub const CONTEXT_SCREEN: &str = "screen";
/// Context key: the channel that forwarded the record.
pub const CONTEXT_CHANNEL: &str = "channel";
/// Context key: capture time, RFC 3339.
pub const CONTEXT_TIMESTAMP: &str = "timestamp";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    pub severity: Severity,
    pub message: String,
    pub context: LogContext,
    pub timestamp: DateTime<Utc>,
}

impl LogRecord {
    /// Whether the channel routed this record to persistent storage.
    pub fn persistent(&self) -> bool {
        self.flag(CONTEXT_PERSISTENT)
    }

    /// Whether the channel routed this record to the screen.
    pub fn screen(&self) -> bool {
        self.flag(CONTEXT_SCREEN)
    }

    pub fn channel(&self) -> Option<&str> {
        self.context.get(CONTEXT_CHANNEL).and_then(Value::as_str)
    }

    fn flag(&self, key: &str) -> bool {
        self.context
            .get(key)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Render the message, replacing `{key}` with the matching context value.
    ///
    /// Strings are inserted bare, other scalars in their JSON form. Unknown
    /// keys and keys holding arrays or objects are left as written.
    pub fn interpolate(&self) -> String {
        let mut out = String::with_capacity(self.message.len());
        let mut rest = self.message.as_str();

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let Some(close) = after.find('}') else {
                out.push_str(&rest[open..]);
                return out;
            };
            let key = &after[..close];
            match self.context.get(key).and_then(render_scalar) {
                Some(value) => out.push_str(&value),
                None => {
                    out.push('{');
                    out.push_str(key);
                    out.push('}');
                }
            }
            rest = &after[close + 1..];
        }
        out.push_str(rest);
        out
    }
}

fn render_scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(_) | Value::Number(_) | Value::Null => Some(value.to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}
