//! Dolphin (GameCube / Wii)
//!
//! Three INI files live in the user directory: `Dolphin.ini` (core and
//! interface), `GFX.ini` (video backend) and `GCPadNew.ini` (GameCube pads).

use std::path::{Path, PathBuf};

use configgen_shared::Paths;

use super::ini_bool;
use crate::command::Command;
use crate::config::SystemConfig;
use crate::controller::{Controller, Input, InputKind, Players};
use crate::emulator::{Emulator, Resolution};
use crate::error::Result;
use crate::generator::{AspectRatio, Generator, HotkeysContext};
use crate::helpers::settings::IniFile;
use crate::services::Services;

pub const MAX_PADS: usize = 4;

/// `SIDevice` value for a standard GameCube controller.
const SI_STANDARD_CONTROLLER: &str = "6";
const SI_NONE: &str = "0";

/// GameCube pad control to logical input.
const PAD_BUTTONS: &[(&str, &str)] = &[
    ("Buttons/A", "a"),
    ("Buttons/B", "b"),
    ("Buttons/X", "x"),
    ("Buttons/Y", "y"),
    ("Buttons/Z", "r1"),
    ("Buttons/Start", "start"),
    ("D-Pad/Up", "up"),
    ("D-Pad/Down", "down"),
    ("D-Pad/Left", "left"),
    ("D-Pad/Right", "right"),
    ("Triggers/L", "l2"),
    ("Triggers/R", "r2"),
];

/// Stick direction to (logical axis, negate).
const PAD_STICKS: &[(&str, &str, bool)] = &[
    ("Main Stick/Up", "joystick1up", false),
    ("Main Stick/Down", "joystick1up", true),
    ("Main Stick/Left", "joystick1left", false),
    ("Main Stick/Right", "joystick1left", true),
    ("C-Stick/Up", "joystick2up", false),
    ("C-Stick/Down", "joystick2up", true),
    ("C-Stick/Left", "joystick2left", false),
    ("C-Stick/Right", "joystick2left", true),
];

fn control(input: &Input, negate: bool) -> Option<String> {
    match input.kind {
        InputKind::Button => Some(format!("`Button {}`", input.id)),
        InputKind::Hat => Some(format!("`Hat 0 {}`", input.hat_direction()?.to_uppercase())),
        InputKind::Axis => {
            let negative = (input.value < 0) != negate;
            Some(format!("`Axis {}{}`", input.id, if negative { "-" } else { "+" }))
        }
        InputKind::Key => None,
    }
}

/// Registered twice: for GameCube systems and for `wii`, where the
/// automatic aspect ratio is widescreen.
#[derive(Debug, Default)]
pub struct DolphinGenerator {
    wii: bool,
}

impl DolphinGenerator {
    pub fn wii() -> Self {
        Self { wii: true }
    }

    pub fn user_dir(paths: &Paths) -> PathBuf {
        paths.config_dir("dolphin-emu")
    }

    pub fn main_ini(paths: &Paths) -> PathBuf {
        Self::user_dir(paths).join("Dolphin.ini")
    }

    pub fn gfx_ini(paths: &Paths) -> PathBuf {
        Self::user_dir(paths).join("GFX.ini")
    }

    pub fn pad_ini(paths: &Paths) -> PathBuf {
        Self::user_dir(paths).join("GCPadNew.ini")
    }

    fn write_pad(ini: &mut IniFile, port: usize, controller: &Controller) {
        let section = format!("GCPad{}", port);
        ini.clear_section(&section);
        let name = controller.name.replace(char::is_control, "");
        ini.set(&section, "Device", format!("SDL/{}/{}", controller.index, name));
        for (target, logical) in PAD_BUTTONS {
            if let Some(value) = controller.input(logical).and_then(|i| control(i, false)) {
                ini.set(&section, *target, value);
            }
        }
        for (target, logical, negate) in PAD_STICKS {
            if let Some(value) = controller.input(logical).and_then(|i| control(i, *negate)) {
                ini.set(&section, *target, value);
            }
        }
        if let Some(value) = controller.input("hotkey").and_then(|i| control(i, false)) {
            ini.set(&section, "Buttons/Hotkey", value);
        }
    }

    /// Dolphin `AspectRatio` setting: 0 auto, 1 16:9, 2 4:3, 3 stretch.
    fn aspect_setting(config: &SystemConfig) -> &str {
        match config.get_or("dolphin_aspect_ratio", "0") {
            v @ ("1" | "2" | "3") => v,
            _ => "0",
        }
    }
}

impl Generator for DolphinGenerator {
    fn name(&self) -> &'static str {
        "dolphin"
    }

    fn generate(
        &self,
        emulator: &Emulator,
        players: &Players,
        services: &Services,
    ) -> Result<Command> {
        let paths = &services.paths;
        let config = &emulator.config;

        let mut main = IniFile::load(Self::main_ini(paths))?;
        main.set("Display", "Fullscreen", ini_bool(true));
        main.set("Display", "RenderToMain", ini_bool(true));
        main.set("Interface", "ConfirmStop", ini_bool(false));
        main.set("Interface", "UsePanicHandlers", ini_bool(false));
        main.set("Interface", "OnScreenDisplayMessages", ini_bool(config.get_bool_or("showFPS", false)?));
        main.set("General", "ISOPaths", "1");
        main.set("General", "ISOPath0", super::rom_directory(emulator.rom()).to_string_lossy());
        main.set("Core", "EnableCheats", ini_bool(config.get_bool_or("dolphin_cheats", false)?));
        main.set("Core", "WiiSDCard", ini_bool(emulator.system_name == "wii"));
        let mut controllers = players.take(MAX_PADS);
        for port in 0..MAX_PADS {
            let device = if controllers.next().is_some() { SI_STANDARD_CONTROLLER } else { SI_NONE };
            main.set("Core", format!("SIDevice{}", port), device);
        }
        main.save()?;

        let mut gfx = IniFile::load(Self::gfx_ini(paths))?;
        let wants_vulkan = config.get_or("gfxbackend", "OGL").eq_ignore_ascii_case("vulkan");
        let backend = if wants_vulkan && services.vulkan.has_vulkan() {
            "Vulkan"
        } else {
            if wants_vulkan {
                tracing::warn!("Vulkan requested but not available, using OpenGL");
            }
            "OGL"
        };
        gfx.set("Settings", "AspectRatio", Self::aspect_setting(config));
        gfx.set("Settings", "ShowFPS", ini_bool(config.get_bool_or("showFPS", false)?));
        gfx.set("Settings", "InternalResolution", config.get_or("dolphin_internal_resolution", "1"));
        gfx.set("Hardware", "VSync", ini_bool(config.get_bool_or("dolphin_vsync", true)?));
        match services.vulkan.discrete_gpu().filter(|_| backend == "Vulkan") {
            Some(gpu) => {
                tracing::debug!(adapter = gpu.index, name = %gpu.name, "using discrete GPU");
                gfx.set("Hardware", "Adapter", gpu.index.to_string());
            }
            None => {
                gfx.remove("Hardware", "Adapter");
            }
        }
        gfx.save()?;

        let mut pads = IniFile::load(Self::pad_ini(paths))?;
        for port in 1..=MAX_PADS {
            pads.clear_section(&format!("GCPad{}", port));
        }
        for (n, controller) in players.take(MAX_PADS).enumerate() {
            Self::write_pad(&mut pads, n + 1, controller);
        }
        pads.save()?;
        tracing::info!(dir = %Self::user_dir(paths).display(), backend, "dolphin configuration written");

        Ok(Command::new(["dolphin-emu", "-b", "-u"])
            .path_arg(&Self::user_dir(paths))
            .arg(format!("--video_backend={}", backend))
            .arg("-e")
            .path_arg(emulator.rom()))
    }

    fn owned_paths(&self, paths: &Paths, _emulator: &Emulator) -> Vec<PathBuf> {
        vec![Self::user_dir(paths)]
    }

    fn in_game_ratio(&self, config: &SystemConfig, resolution: Resolution, _rom: &Path) -> AspectRatio {
        match Self::aspect_setting(config) {
            "1" => AspectRatio::SIXTEEN_NINE,
            "2" => AspectRatio::FOUR_THREE,
            "3" => AspectRatio::of_resolution(resolution).unwrap_or_default(),
            _ if self.wii => AspectRatio::SIXTEEN_NINE,
            _ => AspectRatio::FOUR_THREE,
        }
    }

    fn hotkeys_context(&self) -> HotkeysContext {
        HotkeysContext::new("dolphin")
            .key("exit", ["KEY_LEFTALT", "KEY_F4"])
            .key("save_state", ["KEY_LEFTSHIFT", "KEY_F1"])
            .key("restore_state", ["KEY_F1"])
            .key("screenshot", ["KEY_F9"])
    }
}
