//! System-wide defaults table (`configgen-defaults.toml`)
//!
//! ```toml
//! [default]
//! emulator = "libretro"
//!
//! [default.options]
//! videomode = "default"
//!
//! [nes]
//! core = "fceumm"
//!
//! [nes.options]
//! ratio = "4/3"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use super::SystemConfig;
use crate::error::{ConfigGenError, Result};

/// Table name holding defaults shared by every system.
const DEFAULT_TABLE: &str = "default";

/// Defaults for one system.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SystemDefaults {
    /// Emulator used when nothing else selects one
    #[serde(default)]
    pub emulator: Option<String>,
    /// Core used when nothing else selects one
    #[serde(default)]
    pub core: Option<String>,
    /// Default knob values
    #[serde(default)]
    pub options: BTreeMap<String, toml::Value>,
}

/// Parsed defaults file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct DefaultsTable {
    systems: BTreeMap<String, SystemDefaults>,
}

impl DefaultsTable {
    /// Parse TOML text.
    pub fn parse(text: &str, origin: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| ConfigGenError::invalid(origin, e.to_string()))
    }

    /// Load the table from disk; an absent file is an empty table.
    pub fn load(path: &Path) -> Result<Self> {
        match configgen_shared::fs::read_to_string_opt(path)? {
            Some(text) => Self::parse(&text, &path.display().to_string()),
            None => Ok(Self::default()),
        }
    }

    /// Defaults for `system`, if the table has an entry for it.
    pub fn system(&self, system: &str) -> Option<&SystemDefaults> {
        self.systems.get(system)
    }

    /// Defaults shared by every system.
    pub fn global(&self) -> Option<&SystemDefaults> {
        self.systems.get(DEFAULT_TABLE)
    }

    /// Emulator for `system`: the system entry first, then the shared entry.
    pub fn emulator_for(&self, system: &str) -> Option<&str> {
        self.system(system)
            .and_then(|d| d.emulator.as_deref())
            .or_else(|| self.global().and_then(|d| d.emulator.as_deref()))
    }

    /// Core for `system`: the system entry first, then the shared entry.
    pub fn core_for(&self, system: &str) -> Option<&str> {
        self.system(system)
            .and_then(|d| d.core.as_deref())
            .or_else(|| self.global().and_then(|d| d.core.as_deref()))
    }

    /// Merge layer 2: shared options overlaid with the system's options.
    pub fn options_for(&self, system: &str) -> Result<SystemConfig> {
        let mut config = SystemConfig::new();
        for defaults in [self.global(), self.system(system)].into_iter().flatten() {
            for (key, value) in &defaults.options {
                config.set(key.clone(), stringify(key, value)?);
            }
        }
        Ok(config)
    }
}

/// Render a scalar TOML value the way it appears in the user settings file.
fn stringify(key: &str, value: &toml::Value) -> Result<String> {
    match value {
        toml::Value::String(s) => Ok(s.clone()),
        toml::Value::Boolean(b) => Ok(if *b { "1" } else { "0" }.to_string()),
        toml::Value::Integer(i) => Ok(i.to_string()),
        toml::Value::Float(f) => Ok(f.to_string()),
        _ => Err(ConfigGenError::invalid(key, "default values must be scalars")),
    }
}
