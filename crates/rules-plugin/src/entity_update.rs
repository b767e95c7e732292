//! # Entity Update Event Deriver
//!
//! Derives one "After updating {entity type}" event per content entity type.
//! Each event carries exactly one context, named after the entity type id and
//! typed `entity:{type}`, holding the entity that was just updated.

use std::collections::BTreeMap;
use std::sync::Arc;

use rules_core::{ContextDefinition, PluginDefinition, TranslationArgs, Translator};

use crate::deriver::Deriver;
use crate::error::DeriverError;
use crate::registry::EntityTypeRegistry;

const LABEL_TEMPLATE: &str = "After updating @entity_type";

pub struct EntityUpdateDeriver {
    entity_types: Arc<dyn EntityTypeRegistry>,
    translator: Arc<dyn Translator>,
}

impl EntityUpdateDeriver {
    pub fn new(entity_types: Arc<dyn EntityTypeRegistry>, translator: Arc<dyn Translator>) -> Self {
        Self {
            entity_types,
            translator,
        }
    }
}

impl Deriver for EntityUpdateDeriver {
    fn derivative_definitions(
        &self,
        base: &PluginDefinition,
    ) -> Result<BTreeMap<String, PluginDefinition>, DeriverError> {
        let mut derivatives = BTreeMap::new();
        for (entity_type_id, entity_type) in self.entity_types.definitions()? {
            if !entity_type.is_content() {
                continue;
            }

            let args = TranslationArgs::new().with("@entity_type", entity_type.lowercase_label());
            let mut context = BTreeMap::new();
            context.insert(
                entity_type_id.clone(),
                ContextDefinition::new(format!("entity:{entity_type_id}"))
                    .with_label(entity_type.label.clone()),
            );

            let definition = base
                .derive()
                .label(self.translator.translate(LABEL_TEMPLATE, &args))
                .category(entity_type.label.clone())
                .entity_type_id(entity_type_id.clone())
                .context(context)
                .build();
            derivatives.insert(entity_type_id, definition);
        }

        tracing::debug!(events = derivatives.len(), "derived entity update events");
        Ok(derivatives)
    }
}
