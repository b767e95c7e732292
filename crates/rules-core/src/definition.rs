//! # Plugin Definitions
//!
//! The record a deriver hands back to plugin discovery: identity, label,
//! category, the entity type it is bound to, its input contexts (`context`)
//! and output contexts (`provides`), plus any free-form keys inherited from
//! the base template (class, provider, deriver, ...).
//!
//! ## Merge Semantics
//!
//! Derived definitions are produced by copying the base template into a
//! `PluginDefinitionBuilder` and then applying derived values. A derived value
//! replaces the base value for the same key wholesale, including the
//! `context` and `provides` maps; nothing is merged key-by-key below the top
//! level.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::context::ContextDefinition;

/// Keys with a typed home on `PluginDefinition`. They never live in `extra`.
const RESERVED_KEYS: &[&str] = &[
    "id",
    "label",
    "category",
    "entity_type_id",
    "context",
    "provides",
];

/// An immutable plugin definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginDefinition {
    id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    entity_type_id: Option<String>,
    #[serde(default)]
    context: BTreeMap<String, ContextDefinition>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    provides: BTreeMap<String, ContextDefinition>,
    #[serde(flatten)]
    extra: BTreeMap<String, Value>,
}

impl PluginDefinition {
    /// Start a definition from scratch.
    pub fn builder(id: impl Into<String>) -> PluginDefinitionBuilder {
        PluginDefinitionBuilder::new(id)
    }

    /// Start a derived definition from this one as the base template.
    pub fn derive(&self) -> PluginDefinitionBuilder {
        PluginDefinitionBuilder::from_base(self)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Entity type this definition was derived for, if any.
    pub fn entity_type_id(&self) -> Option<&str> {
        self.entity_type_id.as_deref()
    }

    /// Input contexts keyed by name.
    pub fn context(&self) -> &BTreeMap<String, ContextDefinition> {
        &self.context
    }

    /// Output contexts keyed by name.
    pub fn provides(&self) -> &BTreeMap<String, ContextDefinition> {
        &self.provides
    }

    /// A free-form key inherited from the base template.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// All free-form keys, sorted by name.
    pub fn extra(&self) -> &BTreeMap<String, Value> {
        &self.extra
    }
}

/// Builder for `PluginDefinition`.
///
/// `from_base` copies every field of the template; each setter then
/// overwrites one field. `build` freezes the result.
#[derive(Debug, Clone)]
pub struct PluginDefinitionBuilder {
    definition: PluginDefinition,
}

impl PluginDefinitionBuilder {
    /// Start an empty definition with no contexts and no extra keys.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            definition: PluginDefinition {
                id: id.into(),
                label: None,
                category: None,
                entity_type_id: None,
                context: BTreeMap::new(),
                provides: BTreeMap::new(),
                extra: BTreeMap::new(),
            },
        }
    }

    /// Start from a full copy of `base`.
    pub fn from_base(base: &PluginDefinition) -> Self {
        Self {
            definition: base.clone(),
        }
    }

    /// Overwrite the plugin id.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.definition.id = id.into();
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.definition.label = Some(label.into());
        self
    }

    /// Category the plugin is grouped under in the UI.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.definition.category = Some(category.into());
        self
    }

    /// Record the entity type the definition targets.
    pub fn entity_type_id(mut self, entity_type_id: impl Into<String>) -> Self {
        self.definition.entity_type_id = Some(entity_type_id.into());
        self
    }

    /// Replace the input contexts.
    pub fn context(mut self, context: BTreeMap<String, ContextDefinition>) -> Self {
        self.definition.context = context;
        self
    }

    /// Replace the output contexts.
    pub fn provides(mut self, provides: BTreeMap<String, ContextDefinition>) -> Self {
        self.definition.provides = provides;
        self
    }

    /// Set a free-form key. Keys with a typed setter are ignored here.
    pub fn extra(mut self, key: impl Into<String>, value: Value) -> Self {
        let key = key.into();
        if RESERVED_KEYS.contains(&key.as_str()) {
            tracing::warn!(key = %key, "ignoring reserved plugin definition key in extra");
            return self;
        }
        self.definition.extra.insert(key, value);
        self
    }

    /// Freeze the definition.
    pub fn build(self) -> PluginDefinition {
        self.definition
    }
}
