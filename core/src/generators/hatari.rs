//! Hatari (Atari ST)
//!
//! `hatari.cfg` has one `[JoystickN]` section per port. Player 1 drives
//! port 0, which is also where the ST mouse lives unless a pad is there.

use std::path::PathBuf;

use configgen_shared::Paths;

use super::ini_bool;
use crate::command::Command;
use crate::controller::{Controller, InputKind, Players};
use crate::emulator::Emulator;
use crate::error::Result;
use crate::generator::Generator;
use crate::helpers::settings::IniFile;
use crate::services::Services;

pub const MAX_PORTS: usize = 2;

/// `nJoystickMode` values.
const JOYSTICK_DISABLED: &str = "0";
const JOYSTICK_REAL: &str = "1";

#[derive(Debug, Default)]
pub struct HatariGenerator;

impl HatariGenerator {
    pub fn config_file(paths: &Paths) -> PathBuf {
        paths.config_dir("hatari").join("hatari.cfg")
    }

    fn write_port(ini: &mut IniFile, port: usize, controller: Option<&Controller>) {
        let section = format!("Joystick{}", port);
        match controller {
            Some(controller) => {
                ini.set(&section, "nJoystickMode", JOYSTICK_REAL);
                ini.set(&section, "nJoyId", controller.index.to_string());
                match controller.input("a").filter(|i| i.kind == InputKind::Button) {
                    Some(fire) => ini.set(&section, "nJoyBut1Index", fire.id.to_string()),
                    None => {
                        ini.remove(&section, "nJoyBut1Index");
                    }
                }
                ini.set(&section, "bEnableAutoFire", ini_bool(false));
            }
            None => {
                ini.set(&section, "nJoystickMode", JOYSTICK_DISABLED);
                ini.set(&section, "nJoyId", "-1");
                ini.remove(&section, "nJoyBut1Index");
            }
        }
    }
}

impl Generator for HatariGenerator {
    fn name(&self) -> &'static str {
        "hatari"
    }

    fn generate(
        &self,
        emulator: &Emulator,
        players: &Players,
        services: &Services,
    ) -> Result<Command> {
        let paths = &services.paths;
        let config = &emulator.config;

        let mut ini = IniFile::load(Self::config_file(paths))?;
        ini.set("Screen", "bFullScreen", ini_bool(true));
        ini.set("Screen", "bShowStatusbar", ini_bool(config.get_bool_or("hatari_statusbar", false)?));
        ini.set("Screen", "bShowDriveLed", ini_bool(config.get_bool_or("showFPS", false)?));
        ini.set("System", "nMachineType", config.get_or("hatari_machine", "0"));
        ini.set("Memory", "nMemorySize", config.get_or("hatari_ram", "1024"));
        ini.set("ROM", "szTosImageFileName", paths.bios.join("tos.img").to_string_lossy());
        ini.set("Floppy", "szDiskADir", super::rom_directory(emulator.rom()).to_string_lossy());

        let mut controllers = players.take(MAX_PORTS);
        for port in 0..MAX_PORTS {
            Self::write_port(&mut ini, port, controllers.next());
        }
        ini.save()?;
        tracing::info!(config = %ini.path().display(), "hatari configuration written");

        Ok(Command::new(["hatari", "--configfile"])
            .path_arg(ini.path())
            .arg("--disk-a")
            .path_arg(emulator.rom()))
    }

    fn owned_paths(&self, paths: &Paths, _emulator: &Emulator) -> Vec<PathBuf> {
        vec![paths.config_dir("hatari")]
    }
}
