//! melonDS
//!
//! `melonDS.toml` holds one `InstanceN` table per local player. Each
//! instance gets its joystick mapping and, when one resolves, the mouse used
//! for the touch screen.

use std::path::{Path, PathBuf};

use configgen_shared::Paths;
use toml::{Table, Value};

use crate::command::Command;
use crate::config::SystemConfig;
use crate::controller::{Controller, Input, InputKind, Players, pointing_device};
use crate::emulator::Emulator;
use crate::error::{ConfigGenError, Result};
use crate::generator::{Generator, HotkeysContext};
use crate::services::Services;

/// Logical input to melonDS joystick mapping key.
const JOYSTICK_KEYS: &[(&str, &str)] = &[
    ("a", "A"),
    ("b", "B"),
    ("x", "X"),
    ("y", "Y"),
    ("select", "Select"),
    ("start", "Start"),
    ("right", "Right"),
    ("left", "Left"),
    ("up", "Up"),
    ("down", "Down"),
    ("r1", "R"),
    ("l1", "L"),
];

#[derive(Debug, Default)]
pub struct MelonDsGenerator;

/// melonDS joystick code: buttons are plain ids, hats and axes are tagged.
fn joystick_code(input: &Input) -> Option<i64> {
    let id = i64::from(input.id);
    match input.kind {
        InputKind::Button => Some(id),
        InputKind::Hat => Some(0x100 | (id << 4) | i64::from(input.value & 0xF)),
        InputKind::Axis => {
            let direction = if input.value < 0 { 1 } else { 0 };
            Some(0x10000 | (id << 24) | (direction << 20))
        }
        InputKind::Key => None,
    }
}

fn joystick_table(controller: &Controller) -> Table {
    JOYSTICK_KEYS
        .iter()
        .filter_map(|(logical, key)| {
            let code = joystick_code(controller.input(logical)?)?;
            Some((key.to_string(), Value::Integer(code)))
        })
        .collect()
}

impl MelonDsGenerator {
    pub fn config_file(paths: &Paths) -> PathBuf {
        paths.config_dir("melonDS").join("melonDS.toml")
    }

    fn load(path: &Path) -> Result<Table> {
        let Some(text) = configgen_shared::fs::read_to_string_opt(path)? else {
            return Ok(Table::new());
        };
        Ok(text.parse::<Table>().unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "unreadable melonDS config, starting fresh");
            Table::new()
        }))
    }

    /// Take table `name` out of `root` so it can be updated in place; a
    /// missing or non-table value starts empty.
    fn take_table(root: &mut Table, name: &str) -> Table {
        match root.remove(name) {
            Some(Value::Table(table)) => table,
            _ => Table::new(),
        }
    }

    fn is_instance_key(key: &str) -> bool {
        key.strip_prefix("Instance")
            .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
    }
}

impl Generator for MelonDsGenerator {
    fn name(&self) -> &'static str {
        "melonds"
    }

    fn generate(
        &self,
        emulator: &Emulator,
        players: &Players,
        services: &Services,
    ) -> Result<Command> {
        let path = Self::config_file(&services.paths);
        let config = &emulator.config;
        let mut root = Self::load(&path)?;

        root.retain(|key, _| !Self::is_instance_key(key));

        let mut screen = Self::take_table(&mut root, "Screen");
        screen.insert(
            "Layout".into(),
            Value::Integer(config.parse::<i64>("melonds_screen_layout")?.unwrap_or(0)),
        );
        screen.insert(
            "Rotation".into(),
            Value::Integer(config.parse::<i64>("melonds_screen_rotation")?.unwrap_or(0)),
        );
        screen.insert(
            "UseGL".into(),
            Value::Boolean(config.get_bool_or("melonds_opengl", true)?),
        );
        root.insert("Screen".into(), Value::Table(screen));

        let mut emu = Self::take_table(&mut root, "Emu");
        emu.insert("ConsoleType".into(), Value::Integer(if emulator.system_name == "dsi" { 1 } else { 0 }));
        emu.insert(
            "DirectBoot".into(),
            Value::Boolean(config.get_bool_or("melonds_boot_directly", true)?),
        );
        emu.insert(
            "BIOS9Path".into(),
            Value::String(services.paths.bios.join("bios9.bin").to_string_lossy().into_owned()),
        );
        emu.insert(
            "BIOS7Path".into(),
            Value::String(services.paths.bios.join("bios7.bin").to_string_lossy().into_owned()),
        );
        root.insert("Emu".into(), Value::Table(emu));

        for (n, controller) in players.iter().enumerate() {
            let mut instance = Table::new();
            instance.insert("JoystickID".into(), Value::Integer(i64::from(controller.index)));
            instance.insert("Joystick".into(), Value::Table(joystick_table(controller)));
            if let Some(mouse) = pointing_device(services.devices.as_ref(), controller) {
                instance.insert("MouseIndex".into(), Value::Integer(i64::from(mouse)));
            }
            root.insert(format!("Instance{}", n), Value::Table(instance));
        }

        let text = toml::to_string(&root).map_err(|e| ConfigGenError::Other(e.into()))?;
        configgen_shared::fs::write_atomic(&path, text)?;
        tracing::info!(config = %path.display(), instances = players.len(), "melonDS configuration written");

        Ok(Command::new(["melonDS", "-f"]).path_arg(emulator.rom()))
    }

    fn owned_paths(&self, paths: &Paths, _emulator: &Emulator) -> Vec<PathBuf> {
        vec![paths.config_dir("melonDS")]
    }

    fn mouse_mode(&self, _config: &SystemConfig, _rom: &Path) -> bool {
        true
    }

    fn hotkeys_context(&self) -> HotkeysContext {
        HotkeysContext::new("melonds").key("exit", ["KEY_LEFTCTRL", "KEY_Q"])
    }
}
