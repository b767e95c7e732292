//! # Severity — RFC 5424 Ordered Log Levels
//!
//! The single severity scale used by every log gate in the rules engine.
//! Callers may hand in a `Severity`, an RFC 5424 ordinal, or a PSR-3 level
//! name. `IntoSeverity` normalizes all three onto this enum at the boundary.
//!
//! ## Ordering
//!
//! Lower ordinal means more severe: `Emergency = 0` through `Debug = 7`.
//! A record passes a threshold when `record <= threshold`, so a threshold of
//! `Debug` admits everything and a threshold of `Emergency` admits only
//! emergencies.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

use crate::error::SeverityError;

/// RFC 5424 severity levels.
///
/// # Levels
///
/// | # | Level | PSR-3 name |
/// |---|-------|------------|
/// | 0 | Emergency | `emergency` |
/// | 1 | Alert | `alert` |
/// | 2 | Critical | `critical` |
/// | 3 | Error | `error` |
/// | 4 | Warning | `warning` |
/// | 5 | Notice | `notice` |
/// | 6 | Info | `info` |
/// | 7 | Debug | `debug` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "SeverityRepr")]
#[repr(u8)]
pub enum Severity {
    /// System is unusable.
    Emergency = 0,
    /// Action must be taken immediately.
    Alert = 1,
    /// Critical conditions.
    Critical = 2,
    /// Error conditions.
    Error = 3,
    /// Warning conditions.
    Warning = 4,
    /// Normal but significant conditions.
    Notice = 5,
    /// Informational messages.
    Info = 6,
    /// Debug-level messages.
    Debug = 7,
}

impl Severity {
    /// All severities from most to least severe.
    pub fn all() -> &'static [Severity] {
        &[
            Self::Emergency,
            Self::Alert,
            Self::Critical,
            Self::Error,
            Self::Warning,
            Self::Notice,
            Self::Info,
            Self::Debug,
        ]
    }

    /// The RFC 5424 ordinal (0-7).
    pub fn ordinal(&self) -> u8 {
        *self as u8
    }

    /// The PSR-3 level name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Emergency => "emergency",
            Self::Alert => "alert",
            Self::Critical => "critical",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Notice => "notice",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }

    /// Look up a severity by RFC 5424 ordinal.
    pub fn from_ordinal(ordinal: i64) -> Result<Self, SeverityError> {
        match ordinal {
            0 => Ok(Self::Emergency),
            1 => Ok(Self::Alert),
            2 => Ok(Self::Critical),
            3 => Ok(Self::Error),
            4 => Ok(Self::Warning),
            5 => Ok(Self::Notice),
            6 => Ok(Self::Info),
            7 => Ok(Self::Debug),
            other => Err(SeverityError::UnknownOrdinal(other)),
        }
    }

    /// Whether a record at this severity passes a gate with the given cutoff.
    ///
    /// Equal to the cutoff passes; one step less severe does not.
    pub fn is_within(&self, threshold: Severity) -> bool {
        *self <= threshold
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = SeverityError;

    /// Parse a PSR-3 level name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|level| level.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| SeverityError::UnknownName(s.to_string()))
    }
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Wire forms accepted when deserializing a severity: `"critical"` or `2`.
#[derive(Deserialize)]
#[serde(untagged)]
enum SeverityRepr {
    Ordinal(i64),
    Name(String),
}

impl TryFrom<SeverityRepr> for Severity {
    type Error = SeverityError;

    fn try_from(repr: SeverityRepr) -> Result<Self, SeverityError> {
        match repr {
            SeverityRepr::Ordinal(n) => Severity::from_ordinal(n),
            SeverityRepr::Name(name) => name.parse(),
        }
    }
}

// ---------------------------------------------------------------------------
// Boundary normalization
// ---------------------------------------------------------------------------

/// Anything a caller may pass as a log level.
///
/// Implemented for `Severity` (passthrough), RFC ordinals, and PSR-3 names.
pub trait IntoSeverity {
    /// Normalize onto the RFC 5424 scale.
    fn into_severity(self) -> Result<Severity, SeverityError>;
}

impl IntoSeverity for Severity {
    fn into_severity(self) -> Result<Severity, SeverityError> {
        Ok(self)
    }
}

impl IntoSeverity for &str {
    fn into_severity(self) -> Result<Severity, SeverityError> {
        self.parse()
    }
}

impl IntoSeverity for String {
    fn into_severity(self) -> Result<Severity, SeverityError> {
        self.parse()
    }
}

impl IntoSeverity for u8 {
    fn into_severity(self) -> Result<Severity, SeverityError> {
        Severity::from_ordinal(i64::from(self))
    }
}

impl IntoSeverity for i32 {
    fn into_severity(self) -> Result<Severity, SeverityError> {
        Severity::from_ordinal(i64::from(self))
    }
}

impl IntoSeverity for i64 {
    fn into_severity(self) -> Result<Severity, SeverityError> {
        Severity::from_ordinal(self)
    }
}
