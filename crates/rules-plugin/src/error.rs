//! # Error Types
//!
//! Registry failures are fatal for a derivation pass: a deriver never returns
//! a partial mapping, and discovery aborts on the first failing deriver.

use thiserror::Error;

/// The host registries could not answer.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// The registry backend is unreachable.
    #[error("registry unavailable: {0}")]
    Unavailable(String),

    /// Field definitions were requested for a type the registry does not know.
    #[error("unknown entity type '{0}'")]
    UnknownEntityType(String),

    /// A field declared a cardinality that is neither positive nor unlimited.
    #[error("invalid cardinality {0}; expected a positive integer or -1 (unlimited)")]
    InvalidCardinality(i64),

    /// The registry snapshot document is malformed.
    #[error("invalid registry snapshot: {0}")]
    Snapshot(#[from] serde_yaml::Error),

    /// The registry snapshot file could not be read.
    #[error("failed to read registry snapshot {path}: {source}")]
    Io {
        /// Path of the snapshot file.
        path: String,
        /// Underlying IO error.
        source: std::io::Error,
    },
}

/// A deriver could not produce its derivatives.
#[derive(Error, Debug)]
pub enum DeriverError {
    /// A registry lookup failed mid-pass.
    #[error("derivation aborted: {0}")]
    Registry(#[from] RegistryError),
}

/// Plugin discovery could not complete.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    /// The deriver attached to a base plugin failed.
    #[error("deriver for base plugin '{base_id}' failed: {source}")]
    Deriver {
        /// The base plugin whose deriver failed.
        base_id: String,
        /// The deriver failure.
        source: DeriverError,
    },
}
