//! ScummVM
//!
//! The ROM is a `.scummvm` file inside the game directory. Its first line is
//! the ScummVM game id; an empty file falls back to the file stem.

use std::path::{Path, PathBuf};

use configgen_shared::Paths;

use crate::command::Command;
use crate::config::SystemConfig;
use crate::controller::Players;
use crate::emulator::Emulator;
use crate::error::{ConfigGenError, Result};
use crate::generator::Generator;
use crate::helpers::settings::IniFile;
use crate::services::Services;

#[derive(Debug, Default)]
pub struct ScummVmGenerator;

impl ScummVmGenerator {
    pub fn config_file(paths: &Paths) -> PathBuf {
        paths.config_dir("scummvm").join("scummvmrc")
    }

    /// Game id named by a `.scummvm` file.
    pub fn game_id(rom: &Path) -> Result<String> {
        let from_file = if rom.is_file() {
            configgen_shared::fs::read_file_with_limit(rom, configgen_shared::fs::MAX_SIDE_FILE_BYTES)?
                .lines()
                .map(str::trim)
                .find(|l| !l.is_empty())
                .map(str::to_string)
        } else {
            None
        };
        from_file
            .or_else(|| rom.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ConfigGenError::invalid("rom", format!("no game id in {}", rom.display())))
    }
}

impl Generator for ScummVmGenerator {
    fn name(&self) -> &'static str {
        "scummvm"
    }

    fn generate(
        &self,
        emulator: &Emulator,
        _players: &Players,
        services: &Services,
    ) -> Result<Command> {
        let paths = &services.paths;
        let config = &emulator.config;
        let game_id = Self::game_id(emulator.rom())?;
        let game_dir = super::rom_directory(emulator.rom());

        let mut rc = IniFile::load(Self::config_file(paths))?.with_separator("=");
        rc.set("scummvm", "fullscreen", "true");
        rc.set("scummvm", "gfx_mode", config.get_or("scummvm_scaler", "opengl"));
        rc.set("scummvm", "aspect_ratio", config.get_bool_or("scummvm_aspect_ratio", true)?.to_string());
        rc.set("scummvm", "subtitles", config.get_bool_or("scummvm_subtitles", true)?.to_string());
        rc.set("scummvm", "savepath", paths.save_dir("scummvm").to_string_lossy());
        rc.set("scummvm", "extrapath", paths.bios_dir("scummvm").join("extra").to_string_lossy());
        rc.set("scummvm", "confirm_exit", "false");
        rc.save()?;
        configgen_shared::fs::ensure_dir(&paths.save_dir("scummvm"))?;
        tracing::info!(config = %rc.path().display(), game_id = %game_id, "scummvm configuration written");

        Ok(Command::new(["scummvm", "-f", "--joystick=0", "--config"])
            .path_arg(rc.path())
            .arg(format!("--path={}", game_dir.display()))
            .arg(game_id))
    }

    fn owned_paths(&self, paths: &Paths, _emulator: &Emulator) -> Vec<PathBuf> {
        vec![paths.config_dir("scummvm"), paths.save_dir("scummvm")]
    }

    fn mouse_mode(&self, _config: &SystemConfig, _rom: &Path) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{TestEnv, pads};

    #[test]
    fn test_game_id_from_file() {
        let env = TestEnv::new();
        let rom = env.write(
            &env.paths.rom_dir("scummvm").join("Monkey Island").join("monkey.scummvm"),
            "\nmonkey1\n",
        );
        assert_eq!(ScummVmGenerator::game_id(&rom).unwrap(), "monkey1");

        let emu = env.descriptor(&ScummVmGenerator, "scummvm", "scummvm", "scummvm", &rom, &[]);
        let cmd = ScummVmGenerator.generate(&emu, &pads(1), &env.services()).unwrap();
        assert_eq!(cmd.argv.last().map(String::as_str), Some("monkey1"));
        assert!(cmd.argv.iter().any(|a| a.starts_with("--path=") && a.ends_with("Monkey Island")));
    }

    #[test]
    fn test_empty_file_uses_stem() {
        let env = TestEnv::new();
        let rom = env.write(&env.paths.rom_dir("scummvm").join("sky.scummvm"), "");
        assert_eq!(ScummVmGenerator::game_id(&rom).unwrap(), "sky");
    }
}
