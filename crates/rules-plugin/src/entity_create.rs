//! # Entity Create Action Deriver
//!
//! Derives one "Create a new {entity type}" action per content entity type.
//!
//! ## Contexts
//!
//! Each action provides a single required output context `entity` typed
//! `entity:{type}`. Its input contexts come from the type's base fields:
//!
//! - the bundle key field becomes a **required**, single-valued context;
//! - every other field flagged required becomes a context with
//!   `required = false`;
//! - all remaining fields are skipped.
//!
//! Only the bundle is force-required because storage-level entity creation
//! enforces nothing else. Required base fields are surfaced so rules can fill
//! them, but rejecting a rule for leaving them empty would be stricter than
//! the storage layer itself.
//!
//! Other contexts are multi-valued unless the field's cardinality is exactly
//! one. Entity types are addressed by their registry key throughout.

use std::collections::BTreeMap;
use std::sync::Arc;

use rules_core::{ContextDefinition, PluginDefinition, TranslationArgs, Translator};

use crate::deriver::Deriver;
use crate::error::DeriverError;
use crate::registry::{EntityTypeDefinition, EntityTypeRegistry, FieldDefinition, FieldRegistry};

const LABEL_TEMPLATE: &str = "Create a new @entity_type";

/// Name of the output context holding the created entity.
pub const PROVIDED_CONTEXT: &str = "entity";

pub struct EntityCreateDeriver {
    entity_types: Arc<dyn EntityTypeRegistry>,
    fields: Arc<dyn FieldRegistry>,
    translator: Arc<dyn Translator>,
}

impl EntityCreateDeriver {
    pub fn new(
        entity_types: Arc<dyn EntityTypeRegistry>,
        fields: Arc<dyn FieldRegistry>,
        translator: Arc<dyn Translator>,
    ) -> Self {
        Self {
            entity_types,
            fields,
            translator,
        }
    }

    /// Derivative id for an entity type, e.g. `entity:node`.
    pub fn derivative_id(entity_type_id: &str) -> String {
        format!("entity:{entity_type_id}")
    }

    fn derive_one(
        &self,
        entity_type_id: &str,
        entity_type: &EntityTypeDefinition,
        base: &PluginDefinition,
    ) -> Result<PluginDefinition, DeriverError> {
        let args = TranslationArgs::new().with("@entity_type", entity_type.lowercase_label());
        let label = self.translator.translate(LABEL_TEMPLATE, &args);

        let mut provides = BTreeMap::new();
        provides.insert(
            PROVIDED_CONTEXT.to_string(),
            ContextDefinition::new(format!("entity:{entity_type_id}"))
                .with_label(entity_type.label.clone())
                .with_required(true),
        );

        let base_fields = self.fields.base_field_definitions(entity_type_id)?;
        let context = input_contexts(entity_type_id, entity_type, &base_fields);

        tracing::debug!(entity_type_id, contexts = context.len(), "derived entity create action");

        Ok(base
            .derive()
            .label(label)
            .category(entity_type.label.clone())
            .entity_type_id(entity_type_id)
            .context(context)
            .provides(provides)
            .build())
    }
}

/// Build the input contexts for one entity type from its base fields.
fn input_contexts(
    entity_type_id: &str,
    entity_type: &EntityTypeDefinition,
    base_fields: &[FieldDefinition],
) -> BTreeMap<String, ContextDefinition> {
    let bundle_key = entity_type.bundle_key();
    let mut contexts = BTreeMap::new();

    for field in base_fields {
        let is_bundle = bundle_key == Some(field.name.as_str());
        if !is_bundle && !field.required {
            continue;
        }

        let context = ContextDefinition::new(field.field_type.clone())
            .with_label(field.label.clone())
            .with_required(is_bundle)
            .with_multiple(!is_bundle && !field.cardinality.is_single())
            .with_description(field.description.clone());
        contexts.insert(field.name.clone(), context);
    }

    if let Some(bundle) = bundle_key {
        if !contexts.contains_key(bundle) {
            tracing::warn!(
                entity_type_id,
                bundle_key = bundle,
                "bundle key has no base field; deriving without a bundle context"
            );
        }
    }

    contexts
}

impl Deriver for EntityCreateDeriver {
    fn derivative_definitions(
        &self,
        base: &PluginDefinition,
    ) -> Result<BTreeMap<String, PluginDefinition>, DeriverError> {
        let mut derivatives = BTreeMap::new();
        for (entity_type_id, entity_type) in self.entity_types.definitions()? {
            // Configuration entities cannot be created by rules.
            if !entity_type.is_content() {
                continue;
            }
            let definition = self.derive_one(&entity_type_id, &entity_type, base)?;
            derivatives.insert(Self::derivative_id(&entity_type_id), definition);
        }
        Ok(derivatives)
    }
}
