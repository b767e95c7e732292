//! # Derivative Discovery
//!
//! Plugin discovery over a set of base definitions, some of which carry a
//! deriver. A derived base contributes one plugin per derivative, with
//! plugin id `{base_id}:{derivative_id}`; the base itself is not exposed.
//! A base without a deriver is exposed as-is.
//!
//! `CachedDiscovery` memoizes the last full pass. Clearing the cache makes the
//! next call run every deriver again from scratch, so entity types removed
//! from the registry disappear on rebuild.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::Mutex;
use rules_core::PluginDefinition;

use crate::deriver::Deriver;
use crate::error::DiscoveryError;

/// Separates base id from derivative id in a plugin id.
pub const DERIVATIVE_SEPARATOR: char = ':';

struct BasePlugin {
    definition: PluginDefinition,
    deriver: Option<Arc<dyn Deriver>>,
}

#[derive(Default)]
pub struct DerivativeDiscovery {
    /// Base plugins keyed by base id, in deterministic order.
    bases: BTreeMap<String, BasePlugin>,
}

impl DerivativeDiscovery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plain base plugin. Replaces any base with the same id.
    pub fn register(&mut self, definition: PluginDefinition) {
        self.insert(definition, None);
    }

    /// Register a base plugin whose derivatives come from `deriver`.
    pub fn register_derived(&mut self, definition: PluginDefinition, deriver: Arc<dyn Deriver>) {
        self.insert(definition, Some(deriver));
    }

    fn insert(&mut self, definition: PluginDefinition, deriver: Option<Arc<dyn Deriver>>) {
        let id = definition.id().to_string();
        if self.bases.contains_key(&id) {
            tracing::warn!(base_id = %id, "replacing previously registered base plugin");
        }
        self.bases.insert(id, BasePlugin { definition, deriver });
    }

    pub fn base_count(&self) -> usize {
        self.bases.len()
    }

    /// Run every deriver and return all plugin definitions keyed by plugin id.
    pub fn definitions(&self) -> Result<BTreeMap<String, PluginDefinition>, DiscoveryError> {
        let mut definitions = BTreeMap::new();
        for (base_id, base) in &self.bases {
            let Some(deriver) = &base.deriver else {
                definitions.insert(base_id.clone(), base.definition.clone());
                continue;
            };

            let derivatives = deriver
                .derivative_definitions(&base.definition)
                .map_err(|source| DiscoveryError::Deriver {
                    base_id: base_id.clone(),
                    source,
                })?;

            tracing::debug!(
                base_id = %base_id,
                derivatives = derivatives.len(),
                "expanded derived base plugin"
            );

            for (derivative_id, derivative) in derivatives {
                let plugin_id = plugin_id(base_id, &derivative_id);
                definitions.insert(plugin_id.clone(), derivative.derive().id(plugin_id).build());
            }
        }
        Ok(definitions)
    }

    /// Look up one plugin by id, running only the deriver it belongs to.
    pub fn definition(&self, plugin_id: &str) -> Result<Option<PluginDefinition>, DiscoveryError> {
        let (base_id, derivative_id) = split_plugin_id(plugin_id);
        let Some(base) = self.bases.get(base_id) else {
            return Ok(None);
        };

        match (&base.deriver, derivative_id) {
            (None, None) => Ok(Some(base.definition.clone())),
            (Some(deriver), Some(derivative_id)) => {
                let derivative = deriver
                    .derivative_definition(derivative_id, &base.definition)
                    .map_err(|source| DiscoveryError::Deriver {
                        base_id: base_id.to_string(),
                        source,
                    })?;
                Ok(derivative.map(|d| d.derive().id(plugin_id).build()))
            }
            _ => Ok(None),
        }
    }
}

/// Join base and derivative ids.
pub fn plugin_id(base_id: &str, derivative_id: &str) -> String {
    format!("{base_id}{DERIVATIVE_SEPARATOR}{derivative_id}")
}

/// Split at the first separator. Derivative ids may themselves contain it
/// (`rules_entity_create:entity:node`).
pub fn split_plugin_id(plugin_id: &str) -> (&str, Option<&str>) {
    match plugin_id.split_once(DERIVATIVE_SEPARATOR) {
        Some((base, derivative)) => (base, Some(derivative)),
        None => (plugin_id, None),
    }
}

/// `DerivativeDiscovery` with a memoized full pass.
pub struct CachedDiscovery {
    inner: DerivativeDiscovery,
    cache: Mutex<Option<Arc<BTreeMap<String, PluginDefinition>>>>,
}

impl CachedDiscovery {
    pub fn new(inner: DerivativeDiscovery) -> Self {
        Self {
            inner,
            cache: Mutex::new(None),
        }
    }

    /// All definitions, building them on first use or after `clear_cache`.
    ///
    /// A failed build leaves the cache empty.
    pub fn definitions(&self) -> Result<Arc<BTreeMap<String, PluginDefinition>>, DiscoveryError> {
        let mut cache = self.cache.lock();
        if let Some(definitions) = cache.as_ref() {
            return Ok(Arc::clone(definitions));
        }
        let definitions = Arc::new(self.inner.definitions()?);
        tracing::info!(plugins = definitions.len(), "rebuilt plugin definition cache");
        *cache = Some(Arc::clone(&definitions));
        Ok(definitions)
    }

    pub fn definition(&self, plugin_id: &str) -> Result<Option<PluginDefinition>, DiscoveryError> {
        Ok(self.definitions()?.get(plugin_id).cloned())
    }

    pub fn clear_cache(&self) {
        *self.cache.lock() = None;
    }

    pub fn is_cached(&self) -> bool {
        self.cache.lock().is_some()
    }
}
