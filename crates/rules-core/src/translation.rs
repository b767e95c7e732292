//! # Label Translation
//!
//! Derived plugin labels are templates such as `"Create a new @entity_type"`.
//! A `Translator` looks the template up in its catalog (if any) and then
//! substitutes the placeholder arguments.
//!
//! Placeholders are tokens starting with `@`, `%` or `:` followed by a name.
//! All three render the raw value in plain text. When two placeholder names
//! share a prefix, the longest match wins at each position.

use std::collections::HashMap;
use std::path::Path;

use crate::error::TranslationError;

/// Ordered placeholder → value substitutions for one template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationArgs {
    pairs: Vec<(String, String)>,
}

impl TranslationArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a substitution. `placeholder` includes its sigil, e.g. `@entity_type`.
    pub fn with(mut self, placeholder: impl Into<String>, value: impl Into<String>) -> Self {
        self.pairs.push((placeholder.into(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Substitute every placeholder occurrence in `template`.
    pub fn format(&self, template: &str) -> String {
        if self.pairs.is_empty() {
            return template.to_string();
        }

        let mut by_length: Vec<&(String, String)> = self
            .pairs
            .iter()
            .filter(|(placeholder, _)| !placeholder.is_empty())
            .collect();
        by_length.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

        let mut out = String::with_capacity(template.len());
        let mut rest = template;
        'scan: while let Some(ch) = rest.chars().next() {
            if matches!(ch, '@' | '%' | ':') {
                for (placeholder, value) in &by_length {
                    if let Some(tail) = rest.strip_prefix(placeholder.as_str()) {
                        out.push_str(value);
                        rest = tail;
                        continue 'scan;
                    }
                }
            }
            out.push(ch);
            rest = &rest[ch.len_utf8()..];
        }
        out
    }
}

/// Renders label templates.
pub trait Translator: Send + Sync {
    /// Translate `source` and substitute `args` into the result.
    fn translate(&self, source: &str, args: &TranslationArgs) -> String;
}

/// Formats placeholders without translating.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughTranslator;

impl Translator for PassthroughTranslator {
    fn translate(&self, source: &str, args: &TranslationArgs) -> String {
        args.format(source)
    }
}

/// Looks templates up in a source → translation catalog, falling back to the
/// source string when no entry exists.
#[derive(Debug, Clone, Default)]
pub struct CatalogTranslator {
    catalog: HashMap<String, String>,
}

impl CatalogTranslator {
    pub fn new(catalog: HashMap<String, String>) -> Self {
        Self { catalog }
    }

    /// Load a catalog from a flat YAML map of source string → translation.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, TranslationError> {
        let catalog: HashMap<String, String> = serde_yaml::from_str(yaml)?;
        Ok(Self::new(catalog))
    }

    pub fn from_path(path: &Path) -> Result<Self, TranslationError> {
        let raw = std::fs::read_to_string(path).map_err(|source| TranslationError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&raw)
    }

    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }
}

impl Translator for CatalogTranslator {
    fn translate(&self, source: &str, args: &TranslationArgs) -> String {
        let template = self
            .catalog
            .get(source)
            .map(String::as_str)
            .unwrap_or(source);
        args.format(template)
    }
}
