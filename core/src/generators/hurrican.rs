//! Hurrican
//!
//! Needs the game data pack under `ROMS/hurrican/data/levels`.

use std::path::PathBuf;

use configgen_shared::Paths;

use super::ASSETS_MISSING;
use crate::command::Command;
use crate::controller::Players;
use crate::emulator::Emulator;
use crate::error::Result;
use crate::generator::Generator;
use crate::helpers::assets::assets_installed;
use crate::helpers::settings::{KeyValueFile, KeyValueStyle};
use crate::services::Services;

#[derive(Debug, Default)]
pub struct HurricanGenerator;

impl HurricanGenerator {
    pub fn data_dir(paths: &Paths) -> PathBuf {
        paths.rom_dir("hurrican")
    }

    pub fn levels_dir(paths: &Paths) -> PathBuf {
        Self::data_dir(paths).join("data").join("levels")
    }

    pub fn config_file(paths: &Paths) -> PathBuf {
        paths.config_dir("hurrican").join("hurrican.cfg")
    }
}

impl Generator for HurricanGenerator {
    fn name(&self) -> &'static str {
        "hurrican"
    }

    fn generate(
        &self,
        emulator: &Emulator,
        players: &Players,
        services: &Services,
    ) -> Result<Command> {
        let paths = &services.paths;
        if !assets_installed(&Self::levels_dir(paths), ASSETS_MISSING) {
            return Ok(Command::nothing());
        }

        let config = &emulator.config;
        let mut cfg = KeyValueFile::load(Self::config_file(paths), KeyValueStyle::Plain)?;
        cfg.set("language", config.get_or("hurrican_language", "english"));
        cfg.set("sound_volume", config.get_or("hurrican_sound_volume", "100"));
        cfg.set("music_volume", config.get_or("hurrican_music_volume", "80"));
        cfg.set("use_joystick", if players.is_empty() { "0" } else { "1" });
        cfg.set(
            "joystick_index",
            players.first().map(|c| c.index).unwrap_or(0).to_string(),
        );
        cfg.save()?;
        tracing::info!(config = %cfg.path().display(), "hurrican configuration written");

        Ok(Command::new(["hurrican", "--pathdata"])
            .path_arg(&Self::data_dir(paths))
            .arg("--pathsave")
            .path_arg(&paths.config_dir("hurrican"))
            .arg("--fullscreen"))
    }

    fn owned_paths(&self, paths: &Paths, _emulator: &Emulator) -> Vec<PathBuf> {
        vec![paths.config_dir("hurrican")]
    }
}
