//! Sharp X68000 through the px68k libretro core
//!
//! px68k keeps its own state under `BIOS/keropi/`. A stale `sram.dat` makes
//! the core boot the previous game's settings, so it is removed on every
//! launch and `config` is rewritten from a template before RetroArch runs.

use std::path::{Path, PathBuf};

use configgen_shared::Paths;

use super::LibretroGenerator;
use crate::command::Command;
use crate::config::SystemConfig;
use crate::controller::Players;
use crate::emulator::{Emulator, Resolution};
use crate::error::{ConfigGenError, Result};
use crate::generator::{AspectRatio, Generator, HotkeysContext};
use crate::services::Services;

/// Template for `keropi/config`. `{hdd}` and `{fdd}` receive the ROM when
/// it is a hard disk or floppy image.
const CONFIG_TEMPLATE: &str = "\
[WinX68k]
StartDir={start_dir}
HDD0={hdd}
FDD0={fdd}
FDD1=
RamSize={ram}
ClkMHz={clock}
SoundFilter=1
JoySwap=0
JoyKey=0
MenuFontSize=0
";

const HDD_EXTENSIONS: &[&str] = &["hdf", "hds"];

#[derive(Debug, Default)]
pub struct Px68kGenerator {
    libretro: LibretroGenerator,
}

impl Px68kGenerator {
    fn keropi(paths: &Paths) -> PathBuf {
        paths.bios_dir("keropi")
    }

    pub fn sram(paths: &Paths) -> PathBuf {
        Self::keropi(paths).join("sram.dat")
    }

    pub fn config_file(paths: &Paths) -> PathBuf {
        Self::keropi(paths).join("config")
    }

    fn render_config(emulator: &Emulator) -> String {
        let rom = emulator.rom();
        let is_hdd = rom
            .extension()
            .is_some_and(|e| HDD_EXTENSIONS.iter().any(|h| e.eq_ignore_ascii_case(h)));
        let rom_text = rom.to_string_lossy();
        let (hdd, fdd) = if is_hdd {
            (&*rom_text, "")
        } else {
            ("", &*rom_text)
        };
        let start_dir = super::rom_directory(rom);
        let ram = emulator
            .config
            .get_or("px68k_ramsize", "2MB")
            .trim_end_matches("MB")
            .to_string();
        let clock = emulator
            .config
            .get_or("px68k_cpuspeed", "10Mhz")
            .trim_end_matches("Mhz")
            .to_string();

        CONFIG_TEMPLATE
            .replace("{start_dir}", &start_dir.to_string_lossy())
            .replace("{hdd}", hdd)
            .replace("{fdd}", fdd)
            .replace("{ram}", &ram)
            .replace("{clock}", &clock)
    }
}

impl Generator for Px68kGenerator {
    fn name(&self) -> &'static str {
        "px68k"
    }

    fn generate(
        &self,
        emulator: &Emulator,
        players: &Players,
        services: &Services,
    ) -> Result<Command> {
        let paths = &services.paths;
        if !LibretroGenerator::core_library(paths, &emulator.core).is_file() {
            return Err(ConfigGenError::MissingCore(emulator.core.clone()));
        }
        if configgen_shared::fs::remove_if_exists(&Self::sram(paths))? {
            tracing::info!("removed stale px68k sram.dat");
        }
        configgen_shared::fs::write_atomic(&Self::config_file(paths), Self::render_config(emulator))?;
        self.libretro.generate(emulator, players, services)
    }

    fn default_options(&self) -> &'static [(&'static str, &'static str)] {
        self.libretro.default_options()
    }

    fn owned_paths(&self, paths: &Paths, emulator: &Emulator) -> Vec<PathBuf> {
        let mut owned = self.libretro.owned_paths(paths, emulator);
        owned.push(Self::keropi(paths));
        owned
    }

    fn supports_internal_bezels(&self) -> bool {
        self.libretro.supports_internal_bezels()
    }

    fn in_game_ratio(&self, config: &SystemConfig, resolution: Resolution, rom: &Path) -> AspectRatio {
        self.libretro.in_game_ratio(config, resolution, rom)
    }

    fn hotkeys_context(&self) -> HotkeysContext {
        self.libretro.hotkeys_context()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{TestEnv, pads};

    #[test]
    fn test_hdd_image_goes_to_hdd0() {
        let env = TestEnv::new();
        let rom = env.rom("x68000", "game.hdf");
        let generator = Px68kGenerator::default();
        let emu = env.descriptor(&generator, "x68000", "libretro", "px68k", &rom, &[("px68k_ramsize", "4MB")]);
        let config = Px68kGenerator::render_config(&emu);
        assert!(config.contains(&format!("HDD0={}\n", rom.display())));
        assert!(config.contains("FDD0=\n"));
        assert!(config.contains("RamSize=4\n"));
        assert!(config.contains("ClkMHz=10\n"));
    }

    #[test]
    fn test_missing_sram_is_fine() {
        let env = TestEnv::new();
        env.install_core("px68k");
        let rom = env.rom("x68000", "game.dim");
        let generator = Px68kGenerator::default();
        let emu = env.descriptor(&generator, "x68000", "libretro", "px68k", &rom, &[]);
        let cmd = generator.generate(&emu, &pads(1), &env.services()).unwrap();
        assert_eq!(cmd.program(), Some("retroarch"));
        assert!(Px68kGenerator::config_file(&env.paths).is_file());
    }
}
