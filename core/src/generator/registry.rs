//! Generator registry
//!
//! Maps `(system, emulator, core)` keys to generator factories. The table is
//! built once and never mutated afterwards.

use std::fmt;

use hashbrown::HashMap;

use super::Generator;
use crate::error::{ConfigGenError, Result};

/// Constructs a fresh generator.
pub type GeneratorFactory = fn() -> Box<dyn Generator>;

/// Registry key. Unset parts are wildcards only in the sense that a key
/// with fewer parts is consulted later during lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegistryKey {
    pub system: Option<String>,
    pub emulator: Option<String>,
    pub core: Option<String>,
}

impl RegistryKey {
    fn from_parts(system: Option<&str>, emulator: Option<&str>, core: Option<&str>) -> Self {
        Self {
            system: system.map(str::to_string),
            emulator: emulator.map(str::to_string),
            core: core.map(str::to_string),
        }
    }

    /// `(emulator)`
    pub fn emulator(emulator: &str) -> Self {
        Self::from_parts(None, Some(emulator), None)
    }

    /// `(system)`
    pub fn system(system: &str) -> Self {
        Self::from_parts(Some(system), None, None)
    }

    /// `(system, emulator)`
    pub fn system_emulator(system: &str, emulator: &str) -> Self {
        Self::from_parts(Some(system), Some(emulator), None)
    }

    /// `(system, emulator, core)`
    pub fn full(system: &str, emulator: &str, core: &str) -> Self {
        Self::from_parts(Some(system), Some(emulator), Some(core))
    }

    /// Candidate keys for a launch, most specific first.
    fn lookup_order(system: &str, emulator: &str, core: &str) -> [RegistryKey; 4] {
        [
            Self::full(system, emulator, core),
            Self::system_emulator(system, emulator),
            Self::emulator(emulator),
            Self::system(system),
        ]
    }
}

impl fmt::Display for RegistryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&str> = [&self.system, &self.emulator, &self.core]
            .into_iter()
            .filter_map(|p| p.as_deref())
            .collect();
        write!(f, "({})", parts.join(", "))
    }
}

/// One row of a static generator table.
pub struct GeneratorEntry {
    pub system: Option<&'static str>,
    pub emulator: Option<&'static str>,
    pub core: Option<&'static str>,
    pub create: GeneratorFactory,
}

impl GeneratorEntry {
    pub const fn emulator(emulator: &'static str, create: GeneratorFactory) -> Self {
        Self {
            system: None,
            emulator: Some(emulator),
            core: None,
            create,
        }
    }

    pub const fn system(system: &'static str, create: GeneratorFactory) -> Self {
        Self {
            system: Some(system),
            emulator: None,
            core: None,
            create,
        }
    }

    pub const fn system_emulator(
        system: &'static str,
        emulator: &'static str,
        create: GeneratorFactory,
    ) -> Self {
        Self {
            system: Some(system),
            emulator: Some(emulator),
            core: None,
            create,
        }
    }

    pub const fn full(
        system: &'static str,
        emulator: &'static str,
        core: &'static str,
        create: GeneratorFactory,
    ) -> Self {
        Self {
            system: Some(system),
            emulator: Some(emulator),
            core: Some(core),
            create,
        }
    }

    pub fn key(&self) -> RegistryKey {
        RegistryKey::from_parts(self.system, self.emulator, self.core)
    }
}

/// Immutable generator registry.
pub struct GeneratorRegistry {
    entries: HashMap<RegistryKey, GeneratorFactory>,
}

impl GeneratorRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Registry holding every built-in generator.
    pub fn builtin() -> Self {
        crate::generators::BUILTIN
            .iter()
            .fold(Self::builder(), |b, entry| b.register(entry.key(), entry.create))
            .build()
    }

    /// Key that would serve a launch, without constructing the generator.
    pub fn resolve(&self, system: &str, emulator: &str, core: &str) -> Option<RegistryKey> {
        RegistryKey::lookup_order(system, emulator, core)
            .into_iter()
            .find(|key| self.entries.contains_key(key))
    }

    /// Construct the generator for a launch.
    ///
    /// Priority: `(system, emulator, core)`, `(system, emulator)`,
    /// `(emulator)`, `(system)`.
    pub fn lookup(&self, system: &str, emulator: &str, core: &str) -> Result<Box<dyn Generator>> {
        let key = self
            .resolve(system, emulator, core)
            .ok_or_else(|| ConfigGenError::UnknownEmulator {
                system: system.to_string(),
                emulator: emulator.to_string(),
            })?;
        let generator = (self.entries[&key])();
        tracing::debug!(key = %key, generator = generator.name(), "generator selected");
        Ok(generator)
    }

    /// Every registered key, sorted.
    pub fn keys(&self) -> Vec<RegistryKey> {
        let mut keys: Vec<RegistryKey> = self.entries.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Construct the generator registered under exactly `key`.
    pub fn create(&self, key: &RegistryKey) -> Option<Box<dyn Generator>> {
        self.entries.get(key).map(|factory| factory())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builder for [`GeneratorRegistry`].
#[derive(Default)]
pub struct RegistryBuilder {
    entries: HashMap<RegistryKey, GeneratorFactory>,
}

impl RegistryBuilder {
    /// Add an entry. A later registration under the same key replaces the
    /// earlier one.
    pub fn register(mut self, key: RegistryKey, create: GeneratorFactory) -> Self {
        if self.entries.insert(key.clone(), create).is_some() {
            tracing::warn!(key = %key, "generator registered twice");
        }
        self
    }

    pub fn build(self) -> GeneratorRegistry {
        GeneratorRegistry {
            entries: self.entries,
        }
    }
}
