//! # rules-plugin — Plugin Derivation
//!
//! Generates rules plugin definitions from the host's entity type registry.
//!
//! ## Architecture
//!
//! - **Registry** (`registry.rs`): read-only views of the host's entity type
//!   and base field registries, plus a YAML-backed `StaticRegistry`.
//!
//! - **Deriver** (`deriver.rs`): the contract every deriver fulfils, turning
//!   one base definition into many derivative definitions.
//!
//! - **Entity create** (`entity_create.rs`): one "create a new entity" action
//!   per content entity type, with input contexts for the bundle and other
//!   required base fields.
//!
//! - **Entity update** (`entity_update.rs`): one "after updating" event per
//!   content entity type.
//!
//! - **Discovery** (`discovery.rs`): expands derived base definitions into
//!   `{base}:{derivative}` plugins and caches the full pass.
//!
//! Configuration entity types never produce derivatives.

pub mod deriver;
pub mod discovery;
pub mod entity_create;
pub mod entity_update;
pub mod error;
pub mod registry;

// Re-export primary types.
pub use deriver::Deriver;
pub use discovery::{CachedDiscovery, DerivativeDiscovery, DERIVATIVE_SEPARATOR};
pub use entity_create::EntityCreateDeriver;
pub use entity_update::EntityUpdateDeriver;
pub use error::{DeriverError, DiscoveryError, RegistryError};
pub use registry::{
    Cardinality, EntityTypeDefinition, EntityTypeGroup, EntityTypeRegistry, FieldDefinition,
    FieldRegistry, StaticRegistry,
};
