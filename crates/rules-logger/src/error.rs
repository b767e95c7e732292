//! # Error Types

use rules_core::SeverityError;
use thiserror::Error;

/// A `log` call failed.
#[derive(Error, Debug)]
pub enum LoggerError {
    /// The level could not be normalized. No sink was called.
    #[error(transparent)]
    Severity(#[from] SeverityError),

    /// A sink failed. Sinks after it were not called.
    #[error("log sink #{index} failed: {source}")]
    Sink {
        /// Registration index of the failing sink.
        index: usize,
        /// The sink's error.
        source: SinkError,
    },
}

/// A sink could not accept a record.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("{0}")]
    Rejected(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Logger settings could not be loaded.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The settings document is malformed.
    #[error("invalid logger settings: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The settings file could not be read.
    #[error("failed to read logger settings {path}: {source}")]
    Io {
        /// Path of the settings file.
        path: String,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// An environment flag is not a recognizable boolean.
    #[error("invalid value '{value}' for {var}; expected 0/1, true/false or yes/no")]
    InvalidFlag {
        /// Variable name.
        var: String,
        /// Offending value.
        value: String,
    },

    /// An environment severity is not a PSR-3 name or RFC ordinal.
    #[error("invalid severity for {var}: {source}")]
    InvalidSeverity {
        /// Variable name.
        var: String,
        /// Normalization failure.
        source: SeverityError,
    },
}
