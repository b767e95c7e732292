//! # Error Types
//!
//! Errors raised by the foundational types. All errors use `thiserror` for
//! derive-based `Display` and `Error` implementations.

use thiserror::Error;

/// A log level could not be normalized onto the RFC 5424 scale.
///
/// Unknown levels fail fast. Defaulting them to some severity would
/// silently route the message through the wrong gates.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SeverityError {
    /// A named level outside the PSR-3 vocabulary.
    #[error("unknown severity '{0}'; expected one of emergency, alert, critical, error, warning, notice, info, debug")]
    UnknownName(String),

    /// A numeric level outside `0..=7`.
    #[error("unknown severity ordinal {0}; expected 0 (emergency) through 7 (debug)")]
    UnknownOrdinal(i64),
}

/// A translation catalog could not be loaded.
#[derive(Error, Debug)]
pub enum TranslationError {
    /// The catalog document is not a flat map of strings.
    #[error("invalid translation catalog: {0}")]
    InvalidCatalog(#[from] serde_yaml::Error),

    /// The catalog file could not be read.
    #[error("failed to read translation catalog {path}: {source}")]
    Io {
        /// Path of the catalog file.
        path: String,
        /// Underlying IO error.
        source: std::io::Error,
    },
}
