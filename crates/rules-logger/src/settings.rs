//! # Logger Settings
//!
//! Thresholds for the persistent and screen gates. Loaded once when a
//! channel is constructed and never changed afterwards.
//!
//! Both the descriptive keys and the host's `rules.settings` keys are
//! accepted:
//!
//! | Field | Host key |
//! |-------|----------|
//! | `persistent_log_enabled` | `log_check` |
//! | `persistent_log_threshold` | `log_level_system` |
//! | `screen_log_enabled` | `debug_screen_log_check` |
//! | `screen_log_threshold` | `log_level_screen` |
//!
//! Flags accept booleans or integers (`0` is off); thresholds accept PSR-3
//! names or RFC 5424 ordinals. Missing keys take the defaults below.

use std::path::Path;

use rules_core::{IntoSeverity, Severity};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::SettingsError;

/// Environment variables read by `LoggerSettings::from_env`.
pub const ENV_PERSISTENT_ENABLED: &str = "RULES_LOG_CHECK";
pub const ENV_PERSISTENT_THRESHOLD: &str = "RULES_LOG_LEVEL_SYSTEM";
pub const ENV_SCREEN_ENABLED: &str = "RULES_SCREEN_LOG_CHECK";
pub const ENV_SCREEN_THRESHOLD: &str = "RULES_LOG_LEVEL_SCREEN";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerSettings {
    #[serde(alias = "log_check", deserialize_with = "deserialize_flag")]
    pub persistent_log_enabled: bool,
    #[serde(alias = "log_level_system")]
    pub persistent_log_threshold: Severity,
    #[serde(alias = "debug_screen_log_check", deserialize_with = "deserialize_flag")]
    pub screen_log_enabled: bool,
    #[serde(alias = "log_level_screen")]
    pub screen_log_threshold: Severity,
}

impl Default for LoggerSettings {
    /// Both gates off; persistent at `warning`, screen at `debug`.
    fn default() -> Self {
        Self {
            persistent_log_enabled: false,
            persistent_log_threshold: Severity::Warning,
            screen_log_enabled: false,
            screen_log_threshold: Severity::Debug,
        }
    }
}

impl LoggerSettings {
    pub fn new(
        persistent_log_enabled: bool,
        persistent_log_threshold: Severity,
        screen_log_enabled: bool,
        screen_log_threshold: Severity,
    ) -> Self {
        Self {
            persistent_log_enabled,
            persistent_log_threshold,
            screen_log_enabled,
            screen_log_threshold,
        }
    }

    /// Whether a record at `severity` passes the persistent gate.
    pub fn stores(&self, severity: Severity) -> bool {
        self.persistent_log_enabled && severity.is_within(self.persistent_log_threshold)
    }

    /// Whether a record at `severity` passes the screen gate.
    pub fn shows(&self, severity: Severity) -> bool {
        self.screen_log_enabled && severity.is_within(self.screen_log_threshold)
    }

    /// Parse YAML (or JSON, which is valid YAML).
    pub fn from_yaml_str(yaml: &str) -> Result<Self, SettingsError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, SettingsError> {
        let raw = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&raw)
    }

    /// Read the `RULES_*` environment variables over the defaults.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build settings from an arbitrary variable lookup. Unset variables keep
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();
        if let Some(value) = lookup(ENV_PERSISTENT_ENABLED) {
            settings.persistent_log_enabled = parse_flag(ENV_PERSISTENT_ENABLED, &value)?;
        }
        if let Some(value) = lookup(ENV_PERSISTENT_THRESHOLD) {
            settings.persistent_log_threshold = parse_severity(ENV_PERSISTENT_THRESHOLD, &value)?;
        }
        if let Some(value) = lookup(ENV_SCREEN_ENABLED) {
            settings.screen_log_enabled = parse_flag(ENV_SCREEN_ENABLED, &value)?;
        }
        if let Some(value) = lookup(ENV_SCREEN_THRESHOLD) {
            settings.screen_log_threshold = parse_severity(ENV_SCREEN_THRESHOLD, &value)?;
        }
        Ok(settings)
    }
}

fn parse_flag(var: &str, value: &str) -> Result<bool, SettingsError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(SettingsError::InvalidFlag {
            var: var.to_string(),
            value: value.to_string(),
        }),
    }
}

fn parse_severity(var: &str, value: &str) -> Result<Severity, SettingsError> {
    let value = value.trim();
    let parsed = match value.parse::<i64>() {
        Ok(ordinal) => ordinal.into_severity(),
        Err(_) => value.into_severity(),
    };
    parsed.map_err(|source| SettingsError::InvalidSeverity {
        var: var.to_string(),
        source,
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FlagRepr {
    Bool(bool),
    Int(i64),
}

fn deserialize_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(match Option::<FlagRepr>::deserialize(deserializer)? {
        Some(FlagRepr::Bool(flag)) => flag,
        Some(FlagRepr::Int(n)) => n != 0,
        None => false,
    })
}
