//! Config merge pipeline
//!
//! Layers are applied in [`ConfigLayer`] order, later layers replacing
//! earlier ones key by key. Unknown keys pass through untouched.

use std::path::{Path, PathBuf};

use configgen_shared::Paths;
use configgen_shared::constants::ROM_OVERRIDE_SUFFIX;

use super::user_settings::parse_key_values;
use super::{DefaultsTable, SystemConfig, UserSettings};
use crate::error::{ConfigGenError, Result};

/// One layer of the merge, in application order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConfigLayer {
    /// Compiled-in defaults of the selected generator
    GeneratorDefaults,
    /// `configgen-defaults.toml`, shared table then system table
    SystemDefaults,
    /// `global.*` user settings
    UserGlobal,
    /// `<system>.*` user settings
    UserSystem,
    /// `emulator.<emu>.*` user settings
    UserEmulator,
    /// `core.<core>.*` user settings
    UserCore,
    /// `<system>["<rom>"].*` user settings, then the ROM side file
    Rom,
    /// Overrides passed for this launch only
    Transient,
}

impl ConfigLayer {
    /// Every layer, in application order.
    pub const ALL: [ConfigLayer; 8] = [
        ConfigLayer::GeneratorDefaults,
        ConfigLayer::SystemDefaults,
        ConfigLayer::UserGlobal,
        ConfigLayer::UserSystem,
        ConfigLayer::UserEmulator,
        ConfigLayer::UserCore,
        ConfigLayer::Rom,
        ConfigLayer::Transient,
    ];
}

/// Everything the merge reads, loaded once per launch.
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    pub defaults: DefaultsTable,
    pub user: UserSettings,
    pub transient: SystemConfig,
}

/// Side file holding per-ROM overrides (`game.zip` -> `game.zip.conf`).
pub fn rom_override_file(rom: &Path) -> Option<PathBuf> {
    let name = rom.file_name()?.to_string_lossy();
    Some(rom.with_file_name(format!("{}.{}", name, ROM_OVERRIDE_SUFFIX)))
}

fn rom_name(rom: &Path) -> String {
    rom.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

impl ConfigSources {
    /// Load the defaults table and user settings from their well-known paths.
    pub fn load(paths: &Paths, transient: SystemConfig) -> Result<Self> {
        Ok(Self {
            defaults: DefaultsTable::load(&paths.defaults_file())?,
            user: UserSettings::load(&paths.user_settings)?,
            transient,
        })
    }

    /// Contents of a single layer.
    pub fn layer(
        &self,
        layer: ConfigLayer,
        generator_defaults: &[(&str, &str)],
        system: &str,
        emulator: &str,
        core: &str,
        rom: &Path,
    ) -> Result<SystemConfig> {
        Ok(match layer {
            ConfigLayer::GeneratorDefaults => generator_defaults.iter().copied().collect(),
            ConfigLayer::SystemDefaults => self.defaults.options_for(system)?,
            ConfigLayer::UserGlobal => self.user.global(),
            ConfigLayer::UserSystem => self.user.for_system(system),
            ConfigLayer::UserEmulator => self.user.for_emulator(emulator),
            ConfigLayer::UserCore => self.user.for_core(core),
            ConfigLayer::Rom => {
                let mut config = self.user.for_rom(system, &rom_name(rom));
                if let Some(side_file) = rom_override_file(rom)
                    && let Some(text) = configgen_shared::fs::read_to_string_opt(&side_file)?
                {
                    tracing::debug!(file = %side_file.display(), "applying per-ROM overrides");
                    config.merge_from(&parse_key_values(&text).into_iter().collect());
                }
                config
            }
            ConfigLayer::Transient => self.transient.clone(),
        })
    }

    /// Apply every layer in order.
    pub fn merge(
        &self,
        generator_defaults: &[(&str, &str)],
        system: &str,
        emulator: &str,
        core: &str,
        rom: &Path,
    ) -> Result<SystemConfig> {
        let mut config = SystemConfig::new();
        for layer in ConfigLayer::ALL {
            let values = self.layer(layer, generator_defaults, system, emulator, core, rom)?;
            config.merge_from(&values);
        }
        Ok(config)
    }
}

/// Pick the emulator and core for a launch.
///
/// Precedence: explicit request, per-ROM user setting, per-system user
/// setting, global user setting, defaults table. A missing core falls back
/// to the emulator name (standalone emulators have no cores).
pub fn resolve_emulator_and_core(
    sources: &ConfigSources,
    system: &str,
    rom: &Path,
    requested_emulator: Option<&str>,
    requested_core: Option<&str>,
) -> Result<(String, String)> {
    let rom_scope = sources.user.for_rom(system, &rom_name(rom));
    let system_scope = sources.user.for_system(system);
    let global_scope = sources.user.global();

    // An empty value at one layer falls through to the next
    let pick = |key: &str, requested: Option<&str>, table: Option<&str>| -> Option<String> {
        [
            requested,
            rom_scope.get(key),
            system_scope.get(key),
            global_scope.get(key),
            table,
        ]
        .into_iter()
        .flatten()
        .find(|v| !v.is_empty())
        .map(str::to_string)
    };

    let emulator = pick(
        "emulator",
        requested_emulator,
        sources.defaults.emulator_for(system),
    )
    .ok_or_else(|| {
        ConfigGenError::invalid(
            "emulator",
            format!("no emulator configured for system '{}'", system),
        )
    })?;
    let core = pick("core", requested_core, sources.defaults.core_for(system))
        .unwrap_or_else(|| emulator.clone());
    Ok((emulator, core))
}
