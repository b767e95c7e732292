//! # Derive Subcommand
//!
//! Loads an entity type registry snapshot, runs the entity create action
//! deriver and/or the entity update event deriver through discovery, and
//! prints the plugin definitions as pretty JSON.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde_json::json;

use rules_core::{CatalogTranslator, PassthroughTranslator, PluginDefinition, Translator};
use rules_plugin::{DerivativeDiscovery, EntityCreateDeriver, EntityUpdateDeriver, StaticRegistry};

/// Base plugin id of the entity create actions.
pub const ENTITY_CREATE_BASE: &str = "rules_entity_create";
/// Base plugin id of the entity update events.
pub const ENTITY_UPDATE_BASE: &str = "rules_entity_update";

/// Which plugin family to derive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DeriveKind {
    /// Entity create actions.
    Actions,
    /// Entity update events.
    Events,
    /// Both families.
    All,
}

/// Arguments for the `rules derive` subcommand.
#[derive(Args, Debug)]
pub struct DeriveArgs {
    /// Plugin family to derive.
    #[arg(value_enum, default_value = "all")]
    pub kind: DeriveKind,

    /// Registry snapshot (YAML) describing entity types and base fields.
    #[arg(long)]
    pub registry: PathBuf,

    /// Translation catalog (YAML map of source string to translation).
    #[arg(long)]
    pub translations: Option<PathBuf>,

    /// Write the JSON here instead of stdout.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Build the discovery for the requested families.
pub fn build_discovery(
    kind: DeriveKind,
    registry: Arc<StaticRegistry>,
    translator: Arc<dyn Translator>,
) -> DerivativeDiscovery {
    let mut discovery = DerivativeDiscovery::new();

    if matches!(kind, DeriveKind::Actions | DeriveKind::All) {
        let base = PluginDefinition::builder(ENTITY_CREATE_BASE)
            .label("Create a new entity")
            .category("Entity")
            .extra("provider", json!("rules"))
            .build();
        let deriver =
            EntityCreateDeriver::new(registry.clone(), registry.clone(), translator.clone());
        discovery.register_derived(base, Arc::new(deriver));
    }

    if matches!(kind, DeriveKind::Events | DeriveKind::All) {
        let base = PluginDefinition::builder(ENTITY_UPDATE_BASE)
            .label("After updating an entity")
            .category("Entity")
            .extra("provider", json!("rules"))
            .build();
        let deriver = EntityUpdateDeriver::new(registry, translator);
        discovery.register_derived(base, Arc::new(deriver));
    }

    discovery
}

/// Load inputs and derive every requested definition.
pub fn derive_definitions(args: &DeriveArgs) -> Result<BTreeMap<String, PluginDefinition>> {
    let registry = StaticRegistry::from_path(&args.registry)
        .with_context(|| format!("failed to load registry {}", args.registry.display()))?;
    tracing::info!(entity_types = registry.len(), "loaded registry snapshot");

    let translator: Arc<dyn Translator> = match &args.translations {
        Some(path) => Arc::new(
            CatalogTranslator::from_path(path)
                .with_context(|| format!("failed to load translations {}", path.display()))?,
        ),
        None => Arc::new(PassthroughTranslator),
    };

    let discovery = build_discovery(args.kind, Arc::new(registry), translator);
    discovery
        .definitions()
        .context("plugin derivation failed")
}

/// Execute the derive subcommand.
///
/// Returns exit code 0 on success.
pub fn run_derive(args: &DeriveArgs) -> Result<u8> {
    let definitions = derive_definitions(args)?;
    let rendered = serde_json::to_string_pretty(&definitions)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, rendered + "\n")
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(
                plugins = definitions.len(),
                path = %path.display(),
                "wrote plugin definitions"
            );
        }
        None => println!("{rendered}"),
    }
    Ok(0)
}
