//! DuckStation
//!
//! Two controller ports, bound to SDL game controllers by index.

use std::path::PathBuf;

use configgen_shared::Paths;
use configgen_shared::constants::CONTROLLER_DB_ENV;

use crate::command::Command;
use crate::controller::{Controller, InputKind, Players};
use crate::emulator::Emulator;
use crate::error::Result;
use crate::generator::{Generator, HotkeysContext};
use crate::helpers::controller_db::write_controller_db;
use crate::helpers::settings::IniFile;
use crate::services::Services;

pub const MAX_PORTS: usize = 2;

/// DuckStation control, SDL game controller element, logical input.
const PAD_BINDINGS: &[(&str, &str, &str)] = &[
    ("Up", "DPadUp", "up"),
    ("Down", "DPadDown", "down"),
    ("Left", "DPadLeft", "left"),
    ("Right", "DPadRight", "right"),
    ("Cross", "A", "b"),
    ("Circle", "B", "a"),
    ("Square", "X", "y"),
    ("Triangle", "Y", "x"),
    ("Select", "Back", "select"),
    ("Start", "Start", "start"),
    ("L1", "LeftShoulder", "l1"),
    ("R1", "RightShoulder", "r1"),
    ("L2", "+LeftTrigger", "l2"),
    ("R2", "+RightTrigger", "r2"),
    ("L3", "LeftStick", "l3"),
    ("R3", "RightStick", "r3"),
    ("LLeft", "-LeftX", "joystick1left"),
    ("LRight", "+LeftX", "joystick1left"),
    ("LUp", "-LeftY", "joystick1up"),
    ("LDown", "+LeftY", "joystick1up"),
    ("RLeft", "-RightX", "joystick2left"),
    ("RRight", "+RightX", "joystick2left"),
    ("RUp", "-RightY", "joystick2up"),
    ("RDown", "+RightY", "joystick2up"),
];

#[derive(Debug, Default)]
pub struct DuckstationGenerator;

impl DuckstationGenerator {
    pub fn settings_file(paths: &Paths) -> PathBuf {
        paths.config_dir("duckstation").join("settings.ini")
    }

    /// SDL binding for one control; keys and absent inputs get none.
    fn binding(controller: &Controller, element: &str, logical: &str) -> Option<String> {
        let input = controller.input(logical)?;
        (input.kind != InputKind::Key).then(|| format!("SDL-{}/{}", controller.index, element))
    }
}

impl Generator for DuckstationGenerator {
    fn name(&self) -> &'static str {
        "duckstation"
    }

    fn generate(
        &self,
        emulator: &Emulator,
        players: &Players,
        services: &Services,
    ) -> Result<Command> {
        let paths = &services.paths;
        let config = &emulator.config;

        let mut ini = IniFile::load(Self::settings_file(paths))?;
        ini.set("Main", "ConfirmPowerOff", "false");
        ini.set("Main", "StartFullscreen", "true");
        ini.set("Main", "SaveStateOnExit", config.get_bool_or("autosave", false)?.to_string());
        ini.set("BIOS", "SearchDirectory", paths.bios.to_string_lossy());
        ini.set("MemoryCards", "Directory", paths.save_dir("duckstation").to_string_lossy());
        ini.set("Display", "ShowFPS", config.get_bool_or("showFPS", false)?.to_string());
        ini.set("Display", "AspectRatio", config.get_or("duckstation_ratio", "Auto (Game Native)"));
        ini.set("GPU", "Renderer", config.get_or("duckstation_gpu_renderer", "OpenGL"));
        ini.set("InputSources", "SDL", "true");

        for port in 1..=MAX_PORTS {
            ini.clear_section(&format!("Pad{}", port));
        }
        for (n, controller) in players.take(MAX_PORTS).enumerate() {
            let section = format!("Pad{}", n + 1);
            ini.set(&section, "Type", config.get_or("duckstation_controller_type", "AnalogController"));
            for (control, element, logical) in PAD_BINDINGS {
                match Self::binding(controller, element, logical) {
                    Some(binding) => ini.set(&section, *control, binding),
                    None => {
                        ini.remove(&section, control);
                    }
                }
            }
        }
        ini.save()?;

        let db = write_controller_db(paths, players)?;
        tracing::info!(settings = %ini.path().display(), ports = players.len().min(MAX_PORTS), "duckstation configuration written");

        Ok(Command::new(["duckstation-qt", "-batch", "-fullscreen", "--"])
            .path_arg(emulator.rom())
            .env(CONTROLLER_DB_ENV, db.to_string_lossy())
            .env("XDG_DATA_HOME", paths.configs.to_string_lossy()))
    }

    fn owned_paths(&self, paths: &Paths, _emulator: &Emulator) -> Vec<PathBuf> {
        vec![paths.config_dir("duckstation"), paths.controller_db()]
    }

    fn hotkeys_context(&self) -> HotkeysContext {
        HotkeysContext::new("duckstation")
            .key("exit", ["KEY_ESC"])
            .key("menu", ["KEY_ESC"])
            .key("save_state", ["KEY_F1"])
            .key("restore_state", ["KEY_F3"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{TestEnv, keyboard, pads, xbox_pad};

    #[test]
    fn test_two_ports_in_player_order() {
        let env = TestEnv::new();
        let rom = env.rom("psx", "ff7.chd");
        let emu = env.descriptor(&DuckstationGenerator, "psx", "duckstation", "duckstation", &rom, &[]);
        let cmd = DuckstationGenerator.generate(&emu, &pads(3), &env.services()).unwrap();

        let ini = IniFile::load(DuckstationGenerator::settings_file(&env.paths)).unwrap();
        assert_eq!(ini.get("Pad1", "Cross"), Some("SDL-0/A"));
        assert_eq!(ini.get("Pad2", "LUp"), Some("SDL-1/-LeftY"));
        assert!(!ini.has_section("Pad3"));
        assert!(cmd.env.contains_key(CONTROLLER_DB_ENV));
        assert_eq!(cmd.argv.last().map(String::as_str), rom.to_str());
    }

    #[test]
    fn test_stale_ports_cleared() {
        let env = TestEnv::new();
        env.write(
            &DuckstationGenerator::settings_file(&env.paths),
            "[Pad2]\nCross = SDL-7/A\n",
        );
        let rom = env.rom("psx", "ff7.chd");
        let emu = env.descriptor(&DuckstationGenerator, "psx", "duckstation", "duckstation", &rom, &[]);
        DuckstationGenerator.generate(&emu, &pads(1), &env.services()).unwrap();

        let ini = IniFile::load(DuckstationGenerator::settings_file(&env.paths)).unwrap();
        assert!(ini.has_section("Pad1"));
        assert!(!ini.has_section("Pad2"));
    }

    #[test]
    fn test_missing_inputs_stay_unbound() {
        let env = TestEnv::new();
        let mut pad = xbox_pad(1, "/dev/input/event3");
        pad.inputs.retain(|name, _| matches!(name.as_str(), "b" | "start" | "up" | "joystick1left"));
        let players = Players::new(vec![pad, keyboard(2, "/dev/input/event1")]).unwrap();
        let rom = env.rom("psx", "ff7.chd");
        let emu = env.descriptor(&DuckstationGenerator, "psx", "duckstation", "duckstation", &rom, &[]);
        DuckstationGenerator.generate(&emu, &players, &env.services()).unwrap();

        let ini = IniFile::load(DuckstationGenerator::settings_file(&env.paths)).unwrap();
        assert_eq!(ini.get("Pad1", "Cross"), Some("SDL-0/A"));
        assert_eq!(ini.get("Pad1", "Start"), Some("SDL-0/Start"));
        assert_eq!(ini.get("Pad1", "LRight"), Some("SDL-0/+LeftX"));
        assert_eq!(ini.get("Pad1", "Circle"), None);
        assert_eq!(ini.get("Pad1", "R2"), None);
        assert_eq!(ini.get("Pad1", "LUp"), None);
        // Keyboard player keeps its port type but no SDL bindings
        assert!(ini.get("Pad2", "Type").is_some());
        assert_eq!(ini.get("Pad2", "Cross"), None);
        assert_eq!(ini.get("Pad2", "Up"), None);
    }
}
