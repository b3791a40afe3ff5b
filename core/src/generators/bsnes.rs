//! bsnes (standalone)
//!
//! `settings.bml` is an indentation based tree; only the nodes set here are
//! written and their order is fixed. MSU-1 bundles arrive as squashfs
//! directories and are resolved to their primary ROM.

use std::path::{Path, PathBuf};

use configgen_shared::Paths;

use crate::command::Command;
use crate::config::SystemConfig;
use crate::controller::Players;
use crate::emulator::{Emulator, LaunchFlags, Resolution};
use crate::error::{ConfigGenError, Result};
use crate::generator::{AspectRatio, Generator};
use crate::helpers::squashfs::select_rom;
use crate::services::Services;

/// Extensions looked up in squashfs bundles, highest priority first.
pub const SQUASHFS_EXTENSIONS: &[&str] = &["sfc", "smc"];

#[derive(Debug, Default)]
pub struct BsnesGenerator;

fn bml(tree: &[(&str, Vec<(&str, String)>)]) -> String {
    let mut out = String::new();
    for (node, children) in tree {
        out.push_str(node);
        out.push('\n');
        for (key, value) in children {
            out.push_str(&format!("  {}: {}\n", key, value));
        }
    }
    out
}

impl BsnesGenerator {
    pub fn settings_file(paths: &Paths) -> PathBuf {
        paths.config_dir("bsnes").join("settings.bml")
    }

    /// The file to load: the ROM itself, or the primary ROM of a bundle.
    pub fn resolve_rom(emulator: &Emulator) -> Result<PathBuf> {
        let rom = emulator.rom();
        if !(emulator.flags.contains(LaunchFlags::SQUASHFS) && rom.is_dir()) {
            return Ok(rom.to_path_buf());
        }
        select_rom(rom, SQUASHFS_EXTENSIONS)?.ok_or_else(|| {
            ConfigGenError::invalid(
                "rom",
                format!("no {} file in {}", SQUASHFS_EXTENSIONS.join("/"), rom.display()),
            )
        })
    }

    fn render_settings(emulator: &Emulator, paths: &Paths) -> Result<String> {
        let config = &emulator.config;
        let flag = |b: bool| b.to_string();
        let tree = vec![
            (
                "Video",
                vec![
                    ("Driver", "OpenGL 3.2".to_string()),
                    ("AspectCorrection", flag(config.get_bool_or("bsnes_aspect_correction", false)?)),
                    ("Filter", config.get_or("bsnes_video_filter", "None").to_string()),
                    ("Blocking", flag(config.get_bool_or("bsnes_vsync", true)?)),
                ],
            ),
            (
                "Audio",
                vec![
                    ("Driver", "SDL".to_string()),
                    ("Latency", config.get_or("bsnes_audio_latency", "40").to_string()),
                ],
            ),
            (
                "Input",
                vec![
                    ("Driver", "SDL".to_string()),
                    ("Defocus", "Block".to_string()),
                ],
            ),
            (
                "Emulator",
                vec![
                    ("AutoSaveMemory/Enable", "true".to_string()),
                    ("Hack/Hotfixes", flag(config.get_bool_or("bsnes_hotfixes", true)?)),
                ],
            ),
            (
                "Path",
                vec![("Saves", format!("{}/", paths.save_dir("snes").display()))],
            ),
        ];
        Ok(bml(&tree))
    }
}

impl Generator for BsnesGenerator {
    fn name(&self) -> &'static str {
        "bsnes"
    }

    fn generate(
        &self,
        emulator: &Emulator,
        _players: &Players,
        services: &Services,
    ) -> Result<Command> {
        let paths = &services.paths;
        let rom = Self::resolve_rom(emulator)?;
        let settings = Self::settings_file(paths);
        configgen_shared::fs::write_atomic(&settings, Self::render_settings(emulator, paths)?)?;
        tracing::info!(settings = %settings.display(), rom = %rom.display(), "bsnes configuration written");

        Ok(Command::new(["bsnes", "--fullscreen"]).path_arg(&rom))
    }

    fn owned_paths(&self, paths: &Paths, _emulator: &Emulator) -> Vec<PathBuf> {
        vec![paths.config_dir("bsnes")]
    }

    fn in_game_ratio(&self, config: &SystemConfig, _resolution: Resolution, _rom: &Path) -> AspectRatio {
        // Unparsable values count as off here
        if config.get_bool_or("bsnes_aspect_correction", false).unwrap_or(false) {
            AspectRatio::FOUR_THREE
        } else {
            AspectRatio::new(8, 7)
        }
    }
}
