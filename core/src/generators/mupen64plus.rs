//! mupen64plus (standalone)
//!
//! `mupen64plus.cfg` is an INI file. The four `Input-SDL-ControlN` sections
//! are rewritten on every launch; ports without a player are unplugged.

use std::path::PathBuf;

use configgen_shared::Paths;

use super::ini_bool;
use crate::command::Command;
use crate::controller::{Controller, Input, InputKind, Players};
use crate::emulator::Emulator;
use crate::error::Result;
use crate::generator::{Generator, HotkeysContext};
use crate::helpers::settings::IniFile;
use crate::services::Services;

pub const MAX_PORTS: usize = 4;

/// N64 input to logical input.
const BUTTONS: &[(&str, &str)] = &[
    ("A Button", "a"),
    ("B Button", "y"),
    ("Start", "start"),
    ("Z Trig", "l2"),
    ("L Trig", "l1"),
    ("R Trig", "r1"),
    ("DPad U", "up"),
    ("DPad D", "down"),
    ("DPad L", "left"),
    ("DPad R", "right"),
];

fn binding(input: &Input) -> Option<String> {
    match input.kind {
        InputKind::Button => Some(format!("button({})", input.id)),
        InputKind::Hat => Some(format!("hat(0 {})", input.hat_direction()?.to_uppercase())),
        InputKind::Axis => Some(format!(
            "axis({}{})",
            input.id,
            if input.value < 0 { "-" } else { "+" }
        )),
        InputKind::Key => None,
    }
}

/// `"value"` as mupen64plus reads strings: the parser has no escapes, so
/// embedded quotes become apostrophes and control characters are dropped.
fn quoted(value: &str) -> String {
    let inner: String = value
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| if c == '"' { '\'' } else { c })
        .collect();
    format!("\"{}\"", inner)
}

fn stick_binding(controller: &Controller, name: &str) -> Option<String> {
    let input = controller.input(name)?;
    (input.kind == InputKind::Axis).then(|| format!("axis({}-,{}+)", input.id, input.id))
}

#[derive(Debug, Default)]
pub struct Mupen64PlusGenerator;

impl Mupen64PlusGenerator {
    pub fn config_file(paths: &Paths) -> PathBuf {
        paths.config_dir("mupen64").join("mupen64plus.cfg")
    }

    fn write_port(ini: &mut IniFile, port: usize, controller: Option<&Controller>) {
        let section = format!("Input-SDL-Control{}", port);
        ini.clear_section(&section);
        let Some(controller) = controller else {
            ini.set(&section, "plugged", ini_bool(false));
            return;
        };
        ini.set(&section, "version", "2");
        ini.set(&section, "mode", "0");
        ini.set(&section, "device", controller.index.to_string());
        ini.set(&section, "name", quoted(&controller.name));
        ini.set(&section, "plugged", ini_bool(true));
        ini.set(&section, "plugin", "2");
        for (target, logical) in BUTTONS {
            if let Some(value) = controller.input(logical).and_then(binding) {
                ini.set(&section, *target, quoted(&value));
            }
        }
        if let Some(value) = stick_binding(controller, "joystick1left") {
            ini.set(&section, "X Axis", quoted(&value));
        }
        if let Some(value) = stick_binding(controller, "joystick1up") {
            ini.set(&section, "Y Axis", quoted(&value));
        }
    }
}

impl Generator for Mupen64PlusGenerator {
    fn name(&self) -> &'static str {
        "mupen64plus"
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

        ini.set("Core", "Version", "1.01");
        ini.set("Core", "OnScreenDisplay", ini_bool(config.get_bool_or("showFPS", false)?));
        ini.set("Core", "SaveStatePath", quoted(&format!("{}/", paths.save_dir("n64").display())));
        ini.set("Core", "SaveSRAMPath", quoted(&format!("{}/", paths.save_dir("n64").display())));
        ini.set("Core", "SharedDataPath", quoted(&format!("{}/", paths.bios.display())));

        ini.set("Video-General", "Fullscreen", ini_bool(true));
        ini.set("Video-General", "ScreenWidth", emulator.resolution.width.to_string());
        ini.set("Video-General", "ScreenHeight", emulator.resolution.height.to_string());
        ini.set("Video-General", "VerticalSync", ini_bool(config.get_bool_or("mupen64plus_vsync", true)?));

        let mut controllers = players.take(MAX_PORTS);
        for port in 1..=MAX_PORTS {
            Self::write_port(&mut ini, port, controllers.next());
        }
        ini.save()?;
        tracing::info!(config = %ini.path().display(), players = players.len().min(MAX_PORTS), "mupen64plus configuration written");

        let gfx = config.get_or("mupen64plus_gfxplugin", "mupen64plus-video-glide64mk2");
        Ok(Command::new(["mupen64plus", "--corelib", "libmupen64plus.so", "--gfx"])
            .arg(gfx)
            .arg("--configdir")
            .path_arg(&paths.config_dir("mupen64"))
            .arg("--datadir")
            .path_arg(&paths.config_dir("mupen64"))
            .path_arg(emulator.rom()))
    }

    fn owned_paths(&self, paths: &Paths, _emulator: &Emulator) -> Vec<PathBuf> {
        vec![paths.config_dir("mupen64")]
    }

    fn hotkeys_context(&self) -> HotkeysContext {
        HotkeysContext::new("mupen64plus")
            .key("exit", ["KEY_ESC"])
            .key("save_state", ["KEY_F5"])
            .key("restore_state", ["KEY_F7"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{TestEnv, pads, xbox_pad};

    #[test]
    fn test_unused_ports_unplugged() {
        let env = TestEnv::new();
        let rom = env.rom("n64", "mario.z64");
        let emu = env.descriptor(&Mupen64PlusGenerator, "n64", "mupen64plus", "mupen64plus", &rom, &[]);
        Mupen64PlusGenerator.generate(&emu, &pads(2), &env.services()).unwrap();

        let ini = IniFile::load(Mupen64PlusGenerator::config_file(&env.paths)).unwrap();
        assert_eq!(ini.get("Input-SDL-Control1", "plugged"), Some("True"));
        assert_eq!(ini.get("Input-SDL-Control2", "device"), Some("1"));
        assert_eq!(ini.get("Input-SDL-Control3", "plugged"), Some("False"));
        assert_eq!(ini.get("Input-SDL-Control4", "device"), None);
        assert_eq!(ini.get("Input-SDL-Control1", "DPad U"), Some("\"hat(0 UP)\""));
        assert_eq!(ini.get("Input-SDL-Control1", "X Axis"), Some("\"axis(0-,0+)\""));
    }

    #[test]
    fn test_five_players_truncate() {
        let env = TestEnv::new();
        let rom = env.rom("n64", "mario.z64");
        let emu = env.descriptor(&Mupen64PlusGenerator, "n64", "mupen64plus", "mupen64plus", &rom, &[]);
        Mupen64PlusGenerator.generate(&emu, &pads(5), &env.services()).unwrap();

        let ini = IniFile::load(Mupen64PlusGenerator::config_file(&env.paths)).unwrap();
        assert_eq!(ini.get("Input-SDL-Control4", "device"), Some("3"));
        assert!(!ini.has_section("Input-SDL-Control5"));
    }

    #[test]
    fn test_controller_name_cannot_break_the_value() {
        let env = TestEnv::new();
        let mut pad = xbox_pad(1, "/dev/input/event3");
        pad.name = "8BitDo \"Pro\"\nplugged = False".to_string();
        let players = Players::new(vec![pad]).unwrap();
        let rom = env.rom("n64", "mario.z64");
        let emu = env.descriptor(&Mupen64PlusGenerator, "n64", "mupen64plus", "mupen64plus", &rom, &[]);
        Mupen64PlusGenerator.generate(&emu, &players, &env.services()).unwrap();

        let ini = IniFile::load(Mupen64PlusGenerator::config_file(&env.paths)).unwrap();
        assert_eq!(
            ini.get("Input-SDL-Control1", "name"),
            Some("\"8BitDo 'Pro'plugged = False\"")
        );
        assert_eq!(ini.get("Input-SDL-Control1", "plugged"), Some("True"));
    }
}
