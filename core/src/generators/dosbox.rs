//! DOSBox
//!
//! A DOS game is a directory (`game.pc/`) holding the program and an
//! optional `dosbox.bat` entry point. DOSBox runs from that directory.

use std::path::{Path, PathBuf};

use configgen_shared::Paths;

use crate::command::Command;
use crate::config::SystemConfig;
use crate::controller::Players;
use crate::emulator::Emulator;
use crate::error::Result;
use crate::generator::Generator;
use crate::helpers::settings::IniFile;
use crate::services::Services;

/// Entry point looked up in the game directory.
pub const BATCH_FILE: &str = "dosbox.bat";

#[derive(Debug, Default)]
pub struct DosBoxGenerator;

impl DosBoxGenerator {
    pub fn config_file(paths: &Paths) -> PathBuf {
        paths.config_dir("dosbox").join("dosbox.conf")
    }
}

impl Generator for DosBoxGenerator {
    fn name(&self) -> &'static str {
        "dosbox"
    }

    fn generate(
        &self,
        emulator: &Emulator,
        players: &Players,
        services: &Services,
    ) -> Result<Command> {
        let paths = &services.paths;
        let config = &emulator.config;
        let game_dir = super::rom_directory(emulator.rom());

        let mut conf = IniFile::load(Self::config_file(paths))?.with_separator("=");
        conf.set("sdl", "fullscreen", "true");
        conf.set("sdl", "fullresolution", "desktop");
        conf.set("sdl", "output", config.get_or("dosbox_output", "opengl"));
        conf.set("render", "aspect", config.get_bool_or("dosbox_aspect", true)?.to_string());
        conf.set("cpu", "core", config.get_or("dosbox_cpu_core", "auto"));
        conf.set("cpu", "cycles", config.get_or("dosbox_cpu_cycles", "auto"));
        conf.set("joystick", "joysticktype", if players.is_empty() { "none" } else { "auto" });
        conf.save()?;
        tracing::info!(config = %conf.path().display(), game = %game_dir.display(), "dosbox configuration written");

        let batch = game_dir.join(BATCH_FILE);
        let mut cmd = Command::new(["dosbox", "-fullscreen", "-userconf", "-conf"])
            .path_arg(conf.path())
            .arg("-exit");
        cmd = if batch.is_file() {
            cmd.path_arg(&batch)
        } else {
            cmd.path_arg(&game_dir)
        };
        Ok(cmd)
    }

    fn owned_paths(&self, paths: &Paths, _emulator: &Emulator) -> Vec<PathBuf> {
        vec![paths.config_dir("dosbox")]
    }

    fn mouse_mode(&self, _config: &SystemConfig, _rom: &Path) -> bool {
        true
    }

    fn execution_directory(&self, _config: &SystemConfig, rom: &Path) -> Option<PathBuf> {
        Some(super::rom_directory(rom))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{TestEnv, pads};

    #[test]
    fn test_batch_entry_point() {
        let env = TestEnv::new();
        let game = env.paths.rom_dir("dos").join("doom.pc");
        let batch = env.write(&game.join(BATCH_FILE), "doom.exe\n");
        let emu = env.descriptor(&DosBoxGenerator, "dos", "dosbox", "dosbox", &game, &[]);
        let cmd = DosBoxGenerator.generate(&emu, &pads(1), &env.services()).unwrap();

        assert_eq!(cmd.argv.last().map(String::as_str), batch.to_str());
        assert_eq!(DosBoxGenerator.execution_directory(&emu.config, &game), Some(game.clone()));
        assert!(DosBoxGenerator.mouse_mode(&emu.config, &game));
        let conf = env.read(&DosBoxGenerator::config_file(&env.paths));
        assert!(conf.contains("[sdl]\nfullresolution=desktop\nfullscreen=true\n"));
    }

    #[test]
    fn test_directory_without_batch() {
        let env = TestEnv::new();
        let game = env.paths.rom_dir("dos").join("keen.pc");
        std::fs::create_dir_all(&game).unwrap();
        let emu = env.descriptor(&DosBoxGenerator, "dos", "dosbox", "dosbox", &game, &[]);
        let cmd = DosBoxGenerator.generate(&emu, &pads(0), &env.services()).unwrap();
        assert_eq!(cmd.argv.last().map(String::as_str), game.to_str());
    }
}
