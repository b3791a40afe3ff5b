//! DevilutionX (Diablo)
//!
//! The ROM is `DIABDAT.MPQ` (retail) or `spawn.mpq` (shareware). When
//! `devilutionx_download_spawn` is on and neither is present, the shareware
//! data is fetched through the download service.

use std::path::{Path, PathBuf};

use configgen_shared::Paths;

use crate::command::Command;
use crate::controller::Players;
use crate::emulator::Emulator;
use crate::error::Result;
use crate::generator::Generator;
use crate::helpers::settings::IniFile;
use crate::services::Services;

/// Shareware data file.
pub const SPAWN_URL: &str =
    "https://github.com/diasurgical/devilutionx-assets/releases/download/v2/spawn.mpq";

#[derive(Debug, Default)]
pub struct DevilutionXGenerator;

impl DevilutionXGenerator {
    pub fn spawn_file(paths: &Paths) -> PathBuf {
        paths.rom_dir("devilutionx").join("spawn.mpq")
    }

    pub fn ini_file(paths: &Paths) -> PathBuf {
        paths.config_dir("devilutionx").join("diablo.ini")
    }

    fn has_retail_data(dir: &Path) -> bool {
        ["DIABDAT.MPQ", "diabdat.mpq"]
            .iter()
            .any(|name| dir.join(name).is_file())
    }

    fn has_spawn_data(dir: &Path) -> bool {
        dir.join("spawn.mpq").is_file()
    }

    /// Shareware mode: only `spawn.mpq` is available in `dir`.
    fn is_spawn(dir: &Path) -> bool {
        !Self::has_retail_data(dir) && Self::has_spawn_data(dir)
    }
}

impl Generator for DevilutionXGenerator {
    fn name(&self) -> &'static str {
        "devilutionx"
    }

    fn generate(
        &self,
        emulator: &Emulator,
        _players: &Players,
        services: &Services,
    ) -> Result<Command> {
        let paths = &services.paths;
        let config = &emulator.config;
        let mut data_dir = super::rom_directory(emulator.rom());

        let has_data = Self::has_retail_data(&data_dir) || Self::has_spawn_data(&data_dir);
        if !has_data && config.get_bool_or("devilutionx_download_spawn", false)? {
            let spawn = Self::spawn_file(paths);
            if !spawn.is_file() {
                services.downloader.fetch(SPAWN_URL, &spawn)?;
            }
            data_dir = super::rom_directory(&spawn);
        }

        let mut ini = IniFile::load(Self::ini_file(paths))?.with_separator("=");
        ini.set("Graphics", "Fullscreen", "1");
        ini.set("Graphics", "Width", emulator.resolution.width.to_string());
        ini.set("Graphics", "Height", emulator.resolution.height.to_string());
        ini.set("Graphics", "Upscale", "1");
        ini.set(
            "Graphics",
            "Show FPS",
            if config.get_bool_or("showFPS", false)? { "1" } else { "0" },
        );
        ini.set(
            "Game",
            "Auto Pickup Gold",
            if config.get_bool_or("devilutionx_autopickup", true)? { "1" } else { "0" },
        );
        ini.set("Game", "Game Speed", config.get_or("devilutionx_speed", "50"));
        ini.save()?;
        tracing::info!(ini = %ini.path().display(), "devilutionx configuration written");

        let save_dir = paths.save_dir("devilutionx");
        configgen_shared::fs::ensure_dir(&save_dir)?;

        let mut cmd = Command::new(["devilutionx", "--data-dir"])
            .path_arg(&data_dir)
            .arg("--config-dir")
            .path_arg(&paths.config_dir("devilutionx"))
            .arg("--save-dir")
            .path_arg(&save_dir);
        if Self::is_spawn(&data_dir) {
            cmd = cmd.arg("--spawn");
        }
        Ok(cmd)
    }

    fn owned_paths(&self, paths: &Paths, _emulator: &Emulator) -> Vec<PathBuf> {
        vec![
            paths.config_dir("devilutionx"),
            paths.save_dir("devilutionx"),
            Self::spawn_file(paths),
        ]
    }
}
