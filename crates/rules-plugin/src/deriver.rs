//! # Deriver Contract
//!
//! A deriver turns one base plugin definition into a family of derivative
//! definitions, keyed by derivative id. Derivers hold no state between
//! passes: every call recomputes the full mapping from the registries, so a
//! type removed from the registry is simply absent from the next result.

use std::collections::BTreeMap;

use rules_core::PluginDefinition;

use crate::error::DeriverError;

pub trait Deriver: Send + Sync {
    /// Derive every derivative of `base`, keyed by derivative id.
    ///
    /// Either the full mapping is returned or the pass fails; there is no
    /// partial result.
    fn derivative_definitions(
        &self,
        base: &PluginDefinition,
    ) -> Result<BTreeMap<String, PluginDefinition>, DeriverError>;

    /// Derive a single derivative by id.
    fn derivative_definition(
        &self,
        derivative_id: &str,
        base: &PluginDefinition,
    ) -> Result<Option<PluginDefinition>, DeriverError> {
        Ok(self.derivative_definitions(base)?.remove(derivative_id))
    }
}
