//! # rules-core — Foundational Types for the Rules Engine
//!
//! Every other crate in the workspace depends on `rules-core`; it depends on
//! nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **One severity scale.** `Severity` is the RFC 5424 ordinal enum. Named
//!    PSR-3 levels and raw ordinals are normalized at the boundary through
//!    `IntoSeverity`, and unknown levels are rejected rather than defaulted.
//!
//! 2. **Immutable plugin definitions.** A `PluginDefinition` can only be
//!    produced by `PluginDefinitionBuilder`, which copies a base template
//!    first and then applies derived values. Derived values always win.
//!
//! 3. **Explicit collaborators.** Label rendering goes through the
//!    `Translator` trait, passed in by the caller.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `rules-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod context;
pub mod definition;
pub mod error;
pub mod severity;
pub mod translation;

// Re-export primary types for ergonomic imports.
pub use context::ContextDefinition;
pub use definition::{PluginDefinition, PluginDefinitionBuilder};
pub use error::{SeverityError, TranslationError};
pub use severity::{IntoSeverity, Severity};
pub use translation::{CatalogTranslator, PassthroughTranslator, TranslationArgs, Translator};
