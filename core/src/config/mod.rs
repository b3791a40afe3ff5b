//! Layered key/value configuration
//!
//! Values are always strings. Generators read them through the typed
//! accessors on [`SystemConfig`], which centralize the boolean coercion
//! rules (`1/0`, `true/false`, `enabled/disabled`, `on/off`).

mod defaults;
mod merge;
mod user_settings;


pub use defaults::{DefaultsTable, SystemDefaults};
pub use merge::{ConfigLayer, ConfigSources, resolve_emulator_and_core};
pub use user_settings::UserSettings;

use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::{ConfigGenError, Result};

/// Merged configuration for one launch.
///
/// Lookups are case-sensitive on keys. Iteration order is lexical so
/// anything rendered from the map is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SystemConfig {
    values: BTreeMap<String, String>,
}

/// Coerce a knob value to a boolean. `None` means the value is ambiguous.
pub fn coerce_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "enabled" | "on" => Some(true),
        "0" | "false" | "disabled" | "off" => Some(false),
        _ => None,
    }
}

impl SystemConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw read.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Raw read with a caller-supplied default.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Whether the key is present.
    pub fn is_set(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Typed boolean read. Absent keys are `Ok(None)`.
    pub fn get_bool(&self, key: &str) -> Result<Option<bool>> {
        match self.get(key) {
            None => Ok(None),
            Some(value) => coerce_bool(value).map(Some).ok_or_else(|| {
                ConfigGenError::invalid(key, format!("expected a boolean, got '{}'", value))
            }),
        }
    }

    /// Typed boolean read with a default for absent keys.
    pub fn get_bool_or(&self, key: &str, default: bool) -> Result<bool> {
        Ok(self.get_bool(key)?.unwrap_or(default))
    }

    /// Parse a knob with [`FromStr`]. Absent keys are `Ok(None)`.
    pub fn parse<T: FromStr>(&self, key: &str) -> Result<Option<T>> {
        match self.get(key) {
            None => Ok(None),
            Some(value) => value.trim().parse::<T>().map(Some).map_err(|_| {
                ConfigGenError::invalid(
                    key,
                    format!("cannot parse '{}' as {}", value, std::any::type_name::<T>()),
                )
            }),
        }
    }

    /// Keys under `prefix`, with the prefix stripped.
    pub fn namespaced(&self, prefix: &str) -> SystemConfig {
        let values = self
            .values
            .range(prefix.to_string()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .filter(|(k, _)| k.len() > prefix.len())
            .map(|(k, v)| (k[prefix.len()..].to_string(), v.clone()))
            .collect();
        SystemConfig { values }
    }

    /// Set a single key, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Key-wise replacement with every entry of `other`.
    pub fn merge_from(&mut self, other: &SystemConfig) {
        for (k, v) in &other.values {
            self.values.insert(k.clone(), v.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SystemConfig {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}
