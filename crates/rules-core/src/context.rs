//! # Context Definitions
//!
//! Describes one named input or output slot of a plugin: the data type it
//! carries, a label, and whether it is required and/or multi-valued.

use serde::{Deserialize, Serialize};

/// Definition of a single plugin context.
///
/// Built with the consuming `with_*` methods, then attached to a
/// `PluginDefinition`. There are no setters; once attached it does not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextDefinition {
    data_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(default = "default_required")]
    required: bool,
    #[serde(default)]
    multiple: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

fn default_required() -> bool {
    true
}

impl ContextDefinition {
    /// A required, single-valued context of the given data type
    /// (e.g. `"entity:node"`, `"string"`).
    pub fn new(data_type: impl Into<String>) -> Self {
        Self {
            data_type: data_type.into(),
            label: None,
            required: true,
            multiple: false,
            description: None,
        }
    }

    /// Human-readable label shown in the UI.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Override the `true` default. Optional contexts may be left empty by a rule.
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Mark the context as accepting a list of values instead of one.
    pub fn with_multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }

    /// Set the description. `None` clears it.
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    /// Typed-data reference, e.g. `entity:node`.
    pub fn data_type(&self) -> &str {
        &self.data_type
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Whether a rule must supply a value.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Whether the context holds a list of values.
    pub fn is_multiple(&self) -> bool {
        self.multiple
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}
