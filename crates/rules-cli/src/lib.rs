//! # rules-cli — CLI Tool for the Rules Engine
//!
//! ## Subcommands
//!
//! - `rules derive` — Run the entity create/update derivers over a registry
//!   snapshot and print the resulting plugin definitions as JSON.
//! - `rules log` — Route one message through a rules logger channel.
//!
//! ```bash
//! rules derive all --registry registry.yaml
//! rules derive actions --registry registry.yaml --translations de.yaml
//! rules log --settings rules.settings.yml --level critical "Rule {rule} failed" --context rule=notify
//! ```

pub mod derive;
pub mod log;
