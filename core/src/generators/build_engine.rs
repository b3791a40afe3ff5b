//! Build-engine ports: Raze and EDuke32
//!
//! Both take a plain group file or a `.build` argument file as ROM. The
//! argument file is expanded into the port's own flags.

use std::path::{Path, PathBuf};

use configgen_shared::Paths;

use crate::command::Command;
use crate::controller::Players;
use crate::emulator::Emulator;
use crate::error::Result;
use crate::generator::Generator;
use crate::helpers::build_args::{BuildArgs, parse_build_file};
use crate::helpers::settings::IniFile;
use crate::services::Services;

fn is_build_file(rom: &Path) -> bool {
    rom.extension().is_some_and(|e| e.eq_ignore_ascii_case("build"))
}

/// Flags for the ROM: expanded `.build` contents, or `plain_flag <rom>`.
fn rom_args(
    rom: &Path,
    plain_flag: &str,
    expand: impl FnOnce(&BuildArgs, &Path) -> Vec<String>,
) -> Result<Vec<String>> {
    if is_build_file(rom) {
        let args = parse_build_file(rom)?;
        tracing::debug!(file = %rom.display(), ?args, "build file parsed");
        Ok(expand(&args, &BuildArgs::base_dir(rom)))
    } else {
        Ok(vec![plain_flag.to_string(), rom.to_string_lossy().into_owned()])
    }
}

#[derive(Debug, Default)]
pub struct RazeGenerator;

impl RazeGenerator {
    pub fn config_file(paths: &Paths) -> PathBuf {
        paths.config_dir("raze").join("raze.ini")
    }
}

impl Generator for RazeGenerator {
    fn name(&self) -> &'static str {
        "raze"
    }

    fn generate(
        &self,
        emulator: &Emulator,
        _players: &Players,
        services: &Services,
    ) -> Result<Command> {
        let paths = &services.paths;
        let config = &emulator.config;
        let args = rom_args(emulator.rom(), "-iwad", BuildArgs::raze_args)?;

        let mut ini = IniFile::load(Self::config_file(paths))?.with_separator("=");
        ini.set("GlobalSettings", "vid_fullscreen", "true");
        ini.set("GlobalSettings", "vid_preferbackend", config.get_or("raze_api", "0"));
        ini.set("GlobalSettings", "r_vsync", config.get_bool_or("raze_vsync", true)?.to_string());
        ini.set("GlobalSettings", "vid_fps", config.get_bool_or("showFPS", false)?.to_string());
        ini.set(
            "GameSearch.Directories",
            "Path",
            super::rom_directory(emulator.rom()).to_string_lossy(),
        );
        ini.set(
            "FileSearch.Directories",
            "Path",
            paths.bios_dir("raze").to_string_lossy(),
        );
        ini.save()?;
        tracing::info!(config = %ini.path().display(), "raze configuration written");

        Ok(Command::new(["raze", "-config"])
            .path_arg(ini.path())
            .args(args))
    }

    fn owned_paths(&self, paths: &Paths, _emulator: &Emulator) -> Vec<PathBuf> {
        vec![paths.config_dir("raze")]
    }
}

#[derive(Debug, Default)]
pub struct Eduke32Generator;

impl Eduke32Generator {
    pub fn config_file(paths: &Paths) -> PathBuf {
        paths.config_dir("eduke32").join("eduke32.cfg")
    }
}

impl Generator for Eduke32Generator {
    fn name(&self) -> &'static str {
        "eduke32"
    }

    fn generate(
        &self,
        emulator: &Emulator,
        players: &Players,
        services: &Services,
    ) -> Result<Command> {
        let paths = &services.paths;
        let config = &emulator.config;
        let args = rom_args(emulator.rom(), "-gamegrp", BuildArgs::eduke32_args)?;

        let mut cfg = IniFile::load(Self::config_file(paths))?;
        cfg.set("Screen Setup", "ScreenMode", "1");
        cfg.set("Screen Setup", "ScreenWidth", emulator.resolution.width.to_string());
        cfg.set("Screen Setup", "ScreenHeight", emulator.resolution.height.to_string());
        cfg.set("Screen Setup", "ScreenBPP", "32");
        cfg.set("Setup", "ForceSetup", "0");
        cfg.set("Setup", "NoAutoLoad", "1");
        cfg.set("Controls", "UseJoystick", if players.is_empty() { "0" } else { "1" });
        cfg.set("Controls", "UseMouse", "1");
        cfg.set("Misc", "ShowFPS", if config.get_bool_or("showFPS", false)? { "1" } else { "0" });
        cfg.save()?;
        tracing::info!(config = %cfg.path().display(), "eduke32 configuration written");

        Ok(Command::new(["eduke32", "-cfg"])
            .path_arg(cfg.path())
            .arg("-nologo")
            .arg("-nosetup")
            .args(args))
    }

    fn owned_paths(&self, paths: &Paths, _emulator: &Emulator) -> Vec<PathBuf> {
        vec![paths.config_dir("eduke32")]
    }
}
