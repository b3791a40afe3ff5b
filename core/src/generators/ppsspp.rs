//! PPSSPP (standalone)
//!
//! Pads are read by SDL from the regenerated controller database, so only
//! the emulator settings go into `ppsspp.ini`.

use std::path::{Path, PathBuf};

use configgen_shared::Paths;
use configgen_shared::constants::CONTROLLER_DB_ENV;

use super::ini_bool;
use crate::command::Command;
use crate::config::SystemConfig;
use crate::controller::Players;
use crate::emulator::{Emulator, Resolution};
use crate::error::Result;
use crate::generator::{AspectRatio, Generator};
use crate::helpers::controller_db::write_controller_db;
use crate::helpers::settings::IniFile;
use crate::services::Services;

#[derive(Debug, Default)]
pub struct PpssppGenerator;

impl PpssppGenerator {
    pub fn ini_file(paths: &Paths) -> PathBuf {
        paths
            .config_dir("ppsspp")
            .join("PSP")
            .join("SYSTEM")
            .join("ppsspp.ini")
    }

    /// `GraphicsBackend` value: 3 is Vulkan, 0 OpenGL.
    fn graphics_backend(config: &SystemConfig, services: &Services) -> &'static str {
        if !config.get_or("gfxbackend", "").eq_ignore_ascii_case("vulkan") {
            return "0 (OPENGL)";
        }
        if services.vulkan.has_vulkan() {
            "3 (VULKAN)"
        } else {
            tracing::warn!("Vulkan requested but not available, using OpenGL");
            "0 (OPENGL)"
        }
    }
}

impl Generator for PpssppGenerator {
    fn name(&self) -> &'static str {
        "ppsspp"
    }

    fn generate(
        &self,
        emulator: &Emulator,
        players: &Players,
        services: &Services,
    ) -> Result<Command> {
        let paths = &services.paths;
        let config = &emulator.config;

        let mut ini = IniFile::load(Self::ini_file(paths))?;
        ini.set("Graphics", "GraphicsBackend", Self::graphics_backend(config, services));
        ini.set("Graphics", "FullScreen", ini_bool(true));
        ini.set("Graphics", "ShowFPSCounter", if config.get_bool_or("showFPS", false)? { "3" } else { "0" });
        ini.set("Graphics", "FrameSkip", config.get_or("ppsspp_frameskip", "0"));
        ini.set("Graphics", "InternalResolution", config.get_or("ppsspp_internal_resolution", "1"));
        ini.set("General", "AutoLoadSaveState", if config.get_bool_or("autosave", false)? { "2" } else { "0" });
        ini.set("General", "CurrentDirectory", paths.rom_dir("psp").to_string_lossy());
        ini.set("SystemParam", "NickName", config.get_or("netplay.nickname", "Batocera"));
        ini.save()?;

        let db = write_controller_db(paths, players)?;
        tracing::info!(ini = %ini.path().display(), db = %db.display(), "ppsspp configuration written");

        Ok(Command::new(["PPSSPP", "--fullscreen"])
            .path_arg(emulator.rom())
            .env(CONTROLLER_DB_ENV, db.to_string_lossy())
            .env("XDG_CONFIG_HOME", paths.configs.to_string_lossy()))
    }

    fn owned_paths(&self, paths: &Paths, _emulator: &Emulator) -> Vec<PathBuf> {
        vec![paths.config_dir("ppsspp"), paths.controller_db()]
    }

    fn in_game_ratio(&self, _config: &SystemConfig, _resolution: Resolution, _rom: &Path) -> AspectRatio {
        AspectRatio::SIXTEEN_NINE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{TestEnv, pads};

    #[test]
    fn test_controller_db_exported() {
        let env = TestEnv::new();
        let rom = env.rom("psp", "game.iso");
        let emu = env.descriptor(&PpssppGenerator, "psp", "ppsspp", "ppsspp", &rom, &[]);
        let cmd = PpssppGenerator.generate(&emu, &pads(2), &env.services()).unwrap();

        let db = env.paths.controller_db();
        assert_eq!(cmd.env.get(CONTROLLER_DB_ENV).map(String::as_str), db.to_str());
        // Two pads sharing one GUID give a single line
        assert_eq!(env.read(&db).lines().count(), 1);

        let ini = IniFile::load(PpssppGenerator::ini_file(&env.paths)).unwrap();
        assert_eq!(ini.get("Graphics", "GraphicsBackend"), Some("0 (OPENGL)"));
    }
}
