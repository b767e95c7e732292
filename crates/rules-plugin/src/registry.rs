//! # Entity Type and Field Registries
//!
//! Read-only views of the host's entity type registry and base field
//! registry. Derivers consume snapshots through the `EntityTypeRegistry` and
//! `FieldRegistry` traits; the host supplies the implementation.
//!
//! `StaticRegistry` implements both traits over an in-memory snapshot that can
//! be loaded from YAML:
//!
//! ```yaml
//! entity_types:
//!   node:
//!     label: Content
//!     lowercase_label: content item
//!     group: content
//!     keys: { id: nid, bundle: type }
//!     base_fields:
//!       - { name: type, type: entity_reference, label: Content type, required: true }
//!       - { name: title, type: string, label: Title, required: true }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::RegistryError;

// ─── Entity types ────────────────────────────────────────────────────

/// Whether an entity type stores content or configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityTypeGroup {
    /// Content entities (nodes, users, comments, ...).
    Content,
    /// Configuration entities (views, roles, rule configs, ...).
    Configuration,
}

/// An entity type as reported by the host registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityTypeDefinition {
    /// Machine name, e.g. `node`. Filled from the map key in snapshots.
    #[serde(default)]
    pub id: String,
    /// Human-readable label, e.g. `Content`.
    pub label: String,
    /// Lowercase label for use mid-sentence. Defaults to `label` lowercased.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lowercase_label: Option<String>,
    pub group: EntityTypeGroup,
    /// Entity keys, e.g. `bundle -> type`.
    #[serde(default)]
    pub keys: BTreeMap<String, String>,
}

impl EntityTypeDefinition {
    pub fn new(id: impl Into<String>, label: impl Into<String>, group: EntityTypeGroup) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            lowercase_label: None,
            group,
            keys: BTreeMap::new(),
        }
    }

    pub fn with_lowercase_label(mut self, label: impl Into<String>) -> Self {
        self.lowercase_label = Some(label.into());
        self
    }

    pub fn with_key(mut self, key: impl Into<String>, field: impl Into<String>) -> Self {
        self.keys.insert(key.into(), field.into());
        self
    }

    pub fn is_content(&self) -> bool {
        self.group == EntityTypeGroup::Content
    }

    pub fn lowercase_label(&self) -> String {
        self.lowercase_label
            .clone()
            .unwrap_or_else(|| self.label.to_lowercase())
    }

    /// The field name registered for an entity key. Empty values count as unset.
    pub fn key(&self, key: &str) -> Option<&str> {
        self.keys
            .get(key)
            .map(String::as_str)
            .filter(|field| !field.is_empty())
    }

    pub fn bundle_key(&self) -> Option<&str> {
        self.key("bundle")
    }
}

// ─── Fields ──────────────────────────────────────────────────────────

/// How many values a field holds. `-1` on the wire means unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Cardinality {
    /// At most this many values (always at least 1).
    Limited(u32),
    /// Any number of values.
    Unlimited,
}

impl Cardinality {
    pub const UNLIMITED_WIRE: i64 = -1;

    /// True only for exactly one value.
    pub fn is_single(&self) -> bool {
        matches!(self, Self::Limited(1))
    }
}

impl Default for Cardinality {
    fn default() -> Self {
        Self::Limited(1)
    }
}

impl TryFrom<i64> for Cardinality {
    type Error = RegistryError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value == Self::UNLIMITED_WIRE {
            return Ok(Self::Unlimited);
        }
        match u32::try_from(value) {
            Ok(n) if n >= 1 => Ok(Self::Limited(n)),
            _ => Err(RegistryError::InvalidCardinality(value)),
        }
    }
}

impl From<Cardinality> for i64 {
    fn from(value: Cardinality) -> Self {
        match value {
            Cardinality::Limited(n) => i64::from(n),
            Cardinality::Unlimited => Cardinality::UNLIMITED_WIRE,
        }
    }
}

/// A base field definition of an entity type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    /// Data type id, e.g. `string`, `entity_reference`.
    #[serde(rename = "type")]
    pub field_type: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub cardinality: Cardinality,
}

impl FieldDefinition {
    /// An optional, single-valued field without description.
    pub fn new(
        name: impl Into<String>,
        field_type: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            label: label.into(),
            description: None,
            required: false,
            cardinality: Cardinality::default(),
        }
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_cardinality(mut self, cardinality: Cardinality) -> Self {
        self.cardinality = cardinality;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

// ─── Registry traits ─────────────────────────────────────────────────

/// The host's entity type registry.
pub trait EntityTypeRegistry: Send + Sync {
    /// Every known entity type, keyed by id.
    fn definitions(&self) -> Result<BTreeMap<String, EntityTypeDefinition>, RegistryError>;
}

/// The host's field registry.
pub trait FieldRegistry: Send + Sync {
    /// Base field definitions of one entity type, in declaration order.
    fn base_field_definitions(
        &self,
        entity_type_id: &str,
    ) -> Result<Vec<FieldDefinition>, RegistryError>;
}

// ─── Static snapshot ─────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
struct RegistrySnapshot {
    #[serde(default)]
    entity_types: BTreeMap<String, SnapshotEntry>,
}

#[derive(Debug, Clone, Deserialize)]
struct SnapshotEntry {
    #[serde(flatten)]
    definition: EntityTypeDefinition,
    #[serde(default)]
    base_fields: Vec<FieldDefinition>,
}

/// In-memory entity type and field registry.
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    entity_types: BTreeMap<String, EntityTypeDefinition>,
    base_fields: BTreeMap<String, Vec<FieldDefinition>>,
}

impl StaticRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity type and its base fields. Replaces any existing
    /// entry with the same id.
    pub fn with_entity_type(
        mut self,
        definition: EntityTypeDefinition,
        base_fields: Vec<FieldDefinition>,
    ) -> Self {
        self.base_fields.insert(definition.id.clone(), base_fields);
        self.entity_types.insert(definition.id.clone(), definition);
        self
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, RegistryError> {
        let snapshot: RegistrySnapshot = serde_yaml::from_str(yaml)?;
        let mut registry = Self::new();
        for (id, mut entry) in snapshot.entity_types {
            entry.definition.id = id;
            registry = registry.with_entity_type(entry.definition, entry.base_fields);
        }
        tracing::debug!(
            entity_types = registry.entity_types.len(),
            "loaded registry snapshot"
        );
        Ok(registry)
    }

    pub fn from_path(path: &Path) -> Result<Self, RegistryError> {
        let raw = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&raw)
    }

    pub fn len(&self) -> usize {
        self.entity_types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entity_types.is_empty()
    }
}

impl EntityTypeRegistry for StaticRegistry {
    fn definitions(&self) -> Result<BTreeMap<String, EntityTypeDefinition>, RegistryError> {
        Ok(self.entity_types.clone())
    }
}

impl FieldRegistry for StaticRegistry {
    fn base_field_definitions(
        &self,
        entity_type_id: &str,
    ) -> Result<Vec<FieldDefinition>, RegistryError> {
        self.base_fields
            .get(entity_type_id)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownEntityType(entity_type_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"
entity_types:
  node:
    label: Content
    lowercase_label: content item
    group: content
    keys: { id: nid, bundle: type }
    base_fields:
      - { name: nid, type: integer, label: ID }
      - { name: type, type: entity_reference, label: Content type, required: true }
      - name: tags
        type: entity_reference
        label: Tags
        required: true
        cardinality: -1
  user_role:
    label: Role
    group: configuration
"#;

    #[test]
    fn test_snapshot_loads_ids_from_keys() {
        let registry = StaticRegistry::from_yaml_str(SNAPSHOT).unwrap();
        let types = registry.definitions().unwrap();
        assert_eq!(types.len(), 2);
        assert_eq!(types["node"].id, "node");
        assert_eq!(types["user_role"].id, "user_role");
        assert!(types["node"].is_content());
        assert!(!types["user_role"].is_content());
    }

    #[test]
    fn test_snapshot_preserves_field_order() {
        let registry = StaticRegistry::from_yaml_str(SNAPSHOT).unwrap();
        let fields = registry.base_field_definitions("node").unwrap();
        let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["nid", "type", "tags"]);
        assert_eq!(fields[2].cardinality, Cardinality::Unlimited);
        assert_eq!(fields[0].cardinality, Cardinality::Limited(1));
    }

    #[test]
    fn test_unknown_type_fields_is_an_error() {
        let registry = StaticRegistry::new();
        let err = registry.base_field_definitions("ghost").unwrap_err();
        assert!(matches!(err, RegistryError::UnknownEntityType(ref id) if id == "ghost"));
    }

    #[test]
    fn test_bundle_key_and_lowercase_label() {
        let registry = StaticRegistry::from_yaml_str(SNAPSHOT).unwrap();
        let types = registry.definitions().unwrap();
        assert_eq!(types["node"].bundle_key(), Some("type"));
        assert_eq!(types["node"].lowercase_label(), "content item");
        assert_eq!(types["user_role"].bundle_key(), None);
        assert_eq!(types["user_role"].lowercase_label(), "role");
    }

    #[test]
    fn test_empty_bundle_key_counts_as_unset() {
        let def = EntityTypeDefinition::new("user", "User", EntityTypeGroup::Content)
            .with_key("bundle", "");
        assert_eq!(def.bundle_key(), None);
    }

    #[test]
    fn test_cardinality_wire_values() {
        assert_eq!(Cardinality::try_from(-1).unwrap(), Cardinality::Unlimited);
        assert_eq!(Cardinality::try_from(3).unwrap(), Cardinality::Limited(3));
        assert!(Cardinality::try_from(0).is_err());
        assert!(Cardinality::try_from(-2).is_err());
        assert!(Cardinality::Limited(1).is_single());
        assert!(!Cardinality::Limited(2).is_single());
        assert!(!Cardinality::Unlimited.is_single());
        assert_eq!(i64::from(Cardinality::Unlimited), -1);
    }

    #[test]
    fn test_invalid_cardinality_rejects_snapshot() {
        let yaml = r#"
entity_types:
  node:
    label: Content
    group: content
    base_fields:
      - { name: title, type: string, label: Title, cardinality: 0 }
"#;
        assert!(StaticRegistry::from_yaml_str(yaml).is_err());
    }

    #[test]
    fn test_from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.yaml");
        std::fs::write(&path, SNAPSHOT).unwrap();
        let registry = StaticRegistry::from_path(&path).unwrap();
        assert_eq!(registry.len(), 2);

        let missing = StaticRegistry::from_path(&dir.path().join("missing.yaml"));
        assert!(matches!(missing, Err(RegistryError::Io { .. })));
    }
}
