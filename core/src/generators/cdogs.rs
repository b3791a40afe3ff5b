//! C-Dogs SDL
//!
//! Needs the game data under `ROMS/cdogs/data`. Options are stored as JSON
//! in `options.cnf`; entries written by the game itself are kept.

use std::path::PathBuf;

use configgen_shared::Paths;
use serde_json::{Map, Value, json};

use super::ASSETS_MISSING;
use crate::command::Command;
use crate::controller::Players;
use crate::emulator::Emulator;
use crate::error::{ConfigGenError, Result};
use crate::generator::Generator;
use crate::helpers::assets::assets_installed;
use crate::services::Services;

#[derive(Debug, Default)]
pub struct CdogsGenerator;

impl CdogsGenerator {
    pub fn data_dir(paths: &Paths) -> PathBuf {
        paths.rom_dir("cdogs").join("data")
    }

    pub fn options_file(paths: &Paths) -> PathBuf {
        paths.config_dir("cdogs").join("options.cnf")
    }

    fn load_options(path: &std::path::Path) -> Result<Map<String, Value>> {
        let Some(text) = configgen_shared::fs::read_to_string_opt(path)? else {
            return Ok(Map::new());
        };
        match serde_json::from_str::<Value>(&text) {
            Ok(Value::Object(map)) => Ok(map),
            _ => {
                tracing::warn!(path = %path.display(), "unreadable C-Dogs options, starting fresh");
                Ok(Map::new())
            }
        }
    }
}

/// Remove a JSON object section for editing; non-objects are replaced.
fn take_section(options: &mut Map<String, Value>, name: &str) -> Map<String, Value> {
    match options.remove(name) {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

impl Generator for CdogsGenerator {
    fn name(&self) -> &'static str {
        "cdogs"
    }

    fn generate(
        &self,
        emulator: &Emulator,
        _players: &Players,
        services: &Services,
    ) -> Result<Command> {
        let paths = &services.paths;
        let data = Self::data_dir(paths);
        if !assets_installed(&data, ASSETS_MISSING) {
            return Ok(Command::nothing());
        }

        let config = &emulator.config;
        let path = Self::options_file(paths);
        let mut options = Self::load_options(&path)?;

        let mut graphics = take_section(&mut options, "Graphics");
        graphics.insert("Fullscreen".into(), json!(true));
        graphics.insert("WindowWidth".into(), json!(emulator.resolution.width));
        graphics.insert("WindowHeight".into(), json!(emulator.resolution.height));
        graphics.insert(
            "ScaleFactor".into(),
            json!(config.parse::<u32>("cdogs_scale")?.unwrap_or(2)),
        );

        options.insert("Graphics".into(), Value::Object(graphics));

        let mut game = take_section(&mut options, "Game");
        game.insert("FriendlyFire".into(), json!(config.get_bool_or("cdogs_friendly_fire", false)?));
        game.insert("Difficulty".into(), json!(config.get_or("cdogs_difficulty", "Normal")));
        options.insert("Game".into(), Value::Object(game));

        let text = serde_json::to_string_pretty(&Value::Object(options))
            .map_err(|e| ConfigGenError::Other(e.into()))?;
        configgen_shared::fs::write_atomic(&path, text + "\n")?;
        tracing::info!(options = %path.display(), "C-Dogs options written");

        Ok(Command::new(["cdogs-sdl"])
            .arg(format!("--data-dir={}", paths.rom_dir("cdogs").display()))
            .arg(format!("--config={}", path.display()))
            .cwd(paths.rom_dir("cdogs")))
    }

    fn owned_paths(&self, paths: &Paths, _emulator: &Emulator) -> Vec<PathBuf> {
        vec![paths.config_dir("cdogs")]
    }
}
