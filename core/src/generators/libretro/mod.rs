//! RetroArch (libretro) generator
//!
//! Writes two files under `CONFIGS/retroarch/`:
//!
//! - `retroarchcustom.cfg`: frontend settings and joypad bindings for up to
//!   [`MAX_PORTS`] players
//! - `cores/retroarch-core-options.cfg`: options for the selected core,
//!   shared by every core so existing entries of other cores are kept
//!
//! Both use RetroArch's `key = "value"` syntax.

mod bindings;
mod core_options;

use std::path::{Path, PathBuf};

use configgen_shared::Paths;

use crate::command::Command;
use crate::config::SystemConfig;
use crate::controller::Players;
use crate::emulator::{Emulator, LaunchFlags, Resolution};
use crate::error::{ConfigGenError, Result};
use crate::generator::{AspectRatio, Generator, HotkeysContext};
use crate::helpers::settings::{KeyValueFile, KeyValueStyle};
use crate::services::Services;

/// RetroArch supports eight local players.
pub const MAX_PORTS: usize = 8;

/// Values of the `ratio` knob, in RetroArch's `aspect_ratio_index` order.
const RATIO_INDEXES: &[&str] = &[
    "4/3", "16/9", "16/10", "16/15", "21/9", "1/1", "2/1", "3/2", "3/4", "4/1", "9/16", "5/4",
    "6/5", "7/9", "8/3", "8/7", "19/12", "19/14", "30/17", "32/9", "config", "squarepixel",
    "core", "custom", "full",
];

/// Keys owned per launch; removed before rewriting so players from an
/// earlier launch do not linger.
const PER_LAUNCH_PREFIXES: &[&str] = &["input_player", "input_libretro_device_p"];

#[derive(Debug, Default)]
pub struct LibretroGenerator;

impl LibretroGenerator {
    fn config_dir(paths: &Paths) -> PathBuf {
        paths.config_dir("retroarch")
    }

    pub fn custom_config(paths: &Paths) -> PathBuf {
        Self::config_dir(paths).join("retroarchcustom.cfg")
    }

    pub fn core_options_file(paths: &Paths) -> PathBuf {
        Self::config_dir(paths)
            .join("cores")
            .join("retroarch-core-options.cfg")
    }

    pub fn core_library(paths: &Paths, core: &str) -> PathBuf {
        paths.libretro_cores.join(format!("{}_libretro.so", core))
    }

    fn write_custom_config(
        &self,
        emulator: &Emulator,
        players: &Players,
        services: &Services,
    ) -> Result<()> {
        let paths = &services.paths;
        let config = &emulator.config;
        let mut cfg = KeyValueFile::load(Self::custom_config(paths), KeyValueStyle::Quoted)?;

        let stale: Vec<String> = cfg
            .keys()
            .filter(|k| PER_LAUNCH_PREFIXES.iter().any(|p| k.starts_with(p)))
            .map(str::to_string)
            .collect();
        for key in stale {
            cfg.remove(&key);
        }

        cfg.set("video_fullscreen", "true");
        cfg.set("video_smooth", config.get_bool_or("smooth", false)?.to_string());
        cfg.set("fps_show", config.get_bool_or("showFPS", false)?.to_string());
        cfg.set("savestate_auto_save", config.get_bool_or("autosave", false)?.to_string());
        cfg.set("savestate_auto_load", config.get_bool_or("autosave", false)?.to_string());
        cfg.set("rewind_enable", config.get_bool_or("rewind", false)?.to_string());
        cfg.set("video_driver", self.video_driver(config, services));
        cfg.set(
            "savefile_directory",
            paths.save_dir(&emulator.system_name).to_string_lossy(),
        );
        cfg.set("system_directory", paths.bios.to_string_lossy());

        let ratio = config.get_or("ratio", "core");
        match RATIO_INDEXES.iter().position(|r| *r == ratio) {
            Some(index) => {
                cfg.set("aspect_ratio_index", index.to_string());
                cfg.set("video_aspect_ratio_auto", "false");
            }
            None => {
                tracing::warn!(ratio, "unknown ratio, using automatic aspect");
                cfg.remove("aspect_ratio_index");
                cfg.set("video_aspect_ratio_auto", "true");
            }
        }

        self.apply_bezel(&mut cfg, emulator, paths);

        for (port, controller) in (1..).zip(players.take(MAX_PORTS)) {
            for (key, value) in bindings::port_bindings(port, controller) {
                cfg.set(key, value);
            }
            if let Some(device) = config.get(&format!("controller{}_{}", port, emulator.system_name))
            {
                cfg.set(format!("input_libretro_device_p{}", port), device);
            }
        }
        cfg.remove("input_enable_hotkey_btn");
        cfg.remove("input_enable_hotkey_axis");
        if let Some((key, value)) = players.first().and_then(bindings::hotkey_binding) {
            cfg.set(key, value);
        }
        cfg.set("input_max_users", players.len().min(MAX_PORTS).max(1).to_string());

        if !emulator.active_guns().is_empty()
            && let Some(device) = core_options::gun_device(&emulator.core)
        {
            cfg.set("input_libretro_device_p2", device);
        }

        cfg.save()
    }

    fn video_driver(&self, config: &SystemConfig, services: &Services) -> String {
        match config.get_or("gfxbackend", "gl") {
            "vulkan" if services.vulkan.has_vulkan() => "vulkan".to_string(),
            "vulkan" => {
                tracing::warn!("Vulkan requested but not available, using OpenGL");
                "gl".to_string()
            }
            other => other.to_string(),
        }
    }

    fn apply_bezel(&self, cfg: &mut KeyValueFile, emulator: &Emulator, paths: &Paths) {
        let bezel = emulator.config.get_or("bezel", "none");
        let overlay = paths
            .defaults
            .join("decorations")
            .join(bezel)
            .join("systems")
            .join(format!("{}.cfg", emulator.system_name));
        if bezel != "none" && !bezel.is_empty() && overlay.is_file() {
            cfg.set("input_overlay_enable", "true");
            cfg.set("input_overlay", overlay.to_string_lossy());
        } else {
            if bezel != "none" && !bezel.is_empty() {
                tracing::debug!(bezel, overlay = %overlay.display(), "bezel overlay not found");
            }
            cfg.set("input_overlay_enable", "false");
            cfg.remove("input_overlay");
        }
    }

    fn write_core_options(&self, emulator: &Emulator, paths: &Paths) -> Result<()> {
        let mut opts =
            KeyValueFile::load(Self::core_options_file(paths), KeyValueStyle::Quoted)?;
        for (key, value) in core_options::core_options(emulator)? {
            opts.set(key, value);
        }
        opts.save()
    }

    fn netplay_args(&self, emulator: &Emulator) -> Vec<String> {
        if !emulator.flags.contains(LaunchFlags::NETPLAY) {
            return Vec::new();
        }
        let config = &emulator.config;
        let port = config.get_or("netplay.server.port", "55435").to_string();
        match config.get_or("netplay.mode", "") {
            "host" => vec!["--host".into(), "--port".into(), port],
            "client" => match config.get("netplay.server.ip") {
                Some(ip) => vec!["--connect".into(), ip.to_string(), "--port".into(), port],
                None => {
                    tracing::warn!("netplay client requested without a server address");
                    Vec::new()
                }
            },
            other => {
                tracing::warn!(mode = other, "unknown netplay mode");
                Vec::new()
            }
        }
    }
}

impl Generator for LibretroGenerator {
    fn name(&self) -> &'static str {
        "libretro"
    }

    fn generate(
        &self,
        emulator: &Emulator,
        players: &Players,
        services: &Services,
    ) -> Result<Command> {
        let paths = &services.paths;
        let core = Self::core_library(paths, &emulator.core);
        if !core.is_file() {
            return Err(ConfigGenError::MissingCore(emulator.core.clone()));
        }

        self.write_custom_config(emulator, players, services)?;
        self.write_core_options(emulator, paths)?;
        tracing::info!(
            core = %emulator.core,
            players = players.len().min(MAX_PORTS),
            "retroarch configuration written"
        );

        Ok(Command::new(["retroarch", "-L"])
            .path_arg(&core)
            .arg("--config")
            .path_arg(&Self::custom_config(paths))
            .args(self.netplay_args(emulator))
            .path_arg(&emulator.rom_path))
    }

    fn default_options(&self) -> &'static [(&'static str, &'static str)] {
        &[("ratio", "core"), ("gfxbackend", "gl"), ("bezel", "none")]
    }

    fn owned_paths(&self, paths: &Paths, _emulator: &Emulator) -> Vec<PathBuf> {
        vec![Self::config_dir(paths)]
    }

    fn supports_internal_bezels(&self) -> bool {
        true
    }

    fn in_game_ratio(&self, config: &SystemConfig, _resolution: Resolution, _rom: &Path) -> AspectRatio {
        config
            .get("ratio")
            .and_then(AspectRatio::parse)
            .unwrap_or(AspectRatio::FOUR_THREE)
    }

    fn hotkeys_context(&self) -> HotkeysContext {
        HotkeysContext::new("retroarch")
            .key("exit", ["KEY_HOTKEY", "KEY_START"])
            .key("menu", ["KEY_HOTKEY", "KEY_B"])
            .key("save_state", ["KEY_HOTKEY", "KEY_Y"])
            .key("restore_state", ["KEY_HOTKEY", "KEY_X"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{TestEnv, pads, sinden_gun};

    fn run(env: &TestEnv, emulator: &Emulator, players: &Players) -> Command {
        LibretroGenerator.generate(emulator, players, &env.services()).unwrap()
    }

    #[test]
    fn test_missing_core() {
        let env = TestEnv::new();
        let rom = env.rom("nes", "smb.nes");
        let emu = env.descriptor(&LibretroGenerator, "nes", "libretro", "fceumm", &rom, &[]);
        let err = LibretroGenerator
            .generate(&emu, &pads(1), &env.services())
            .unwrap_err();
        assert!(matches!(err, ConfigGenError::MissingCore(ref c) if c == "fceumm"));
        assert!(!LibretroGenerator::custom_config(&env.paths).exists());
    }

    #[test]
    fn test_ports_truncated_to_eight() {
        let env = TestEnv::new();
        env.install_core("mgba");
        let rom = env.rom("gba", "a.gba");
        let emu = env.descriptor(&LibretroGenerator, "gba", "libretro", "mgba", &rom, &[]);
        run(&env, &emu, &pads(10));
        let cfg = env.read(&LibretroGenerator::custom_config(&env.paths));
        assert!(cfg.contains("input_player8_joypad_index = \"7\""));
        assert!(!cfg.contains("input_player9_"));
        assert!(cfg.contains("input_max_users = \"8\""));
    }

    #[test]
    fn test_fewer_players_drop_stale_ports() {
        let env = TestEnv::new();
        env.install_core("mgba");
        let rom = env.rom("gba", "a.gba");
        let emu = env.descriptor(&LibretroGenerator, "gba", "libretro", "mgba", &rom, &[]);
        run(&env, &emu, &pads(3));
        run(&env, &emu, &pads(1));
        let cfg = env.read(&LibretroGenerator::custom_config(&env.paths));
        assert!(cfg.contains("input_player1_a_btn"));
        assert!(!cfg.contains("input_player2_"));
    }

    #[test]
    fn test_controller_device_override() {
        let env = TestEnv::new();
        env.install_core("fceumm");
        let rom = env.rom("nes", "smb.nes");
        let emu = env.descriptor(
            &LibretroGenerator,
            "nes",
            "libretro",
            "fceumm",
            &rom,
            &[("controller1_nes", "513")],
        );
        run(&env, &emu, &pads(1));
        let cfg = env.read(&LibretroGenerator::custom_config(&env.paths));
        assert!(cfg.contains("input_libretro_device_p1 = \"513\""));
    }

    #[test]
    fn test_gun_enables_crosshair_and_device() {
        let env = TestEnv::new();
        env.install_core("fceumm");
        let rom = env.rom("nes", "duckhunt.nes");
        let mut emu = env.descriptor(&LibretroGenerator, "nes", "libretro", "fceumm", &rom, &[]);
        let mut gun = sinden_gun();
        gun.need_cross = true;
        emu.guns = vec![gun];
        emu.flags |= LaunchFlags::GUNS;
        run(&env, &emu, &pads(1));
        let cfg = env.read(&LibretroGenerator::custom_config(&env.paths));
        assert!(cfg.contains("input_libretro_device_p2 = \"258\""));
        let opts = env.read(&LibretroGenerator::core_options_file(&env.paths));
        assert!(opts.contains("fceumm_show_crosshair = \"enabled\""));
    }

    #[test]
    fn test_core_options_of_other_cores_are_kept() {
        let env = TestEnv::new();
        env.write(
            &LibretroGenerator::core_options_file(&env.paths),
            "mupen64plus-cpucore = \"dynamic_recompiler\"\n",
        );
        env.install_core("bluemsx");
        let rom = env.rom("msx1", "game.rom");
        let emu = env.descriptor(
            &LibretroGenerator,
            "msx1",
            "libretro",
            "bluemsx",
            &rom,
            &[("bluemsx_msxtype", "MSX2+")],
        );
        run(&env, &emu, &pads(1));
        let opts = env.read(&LibretroGenerator::core_options_file(&env.paths));
        assert!(opts.contains("mupen64plus-cpucore = \"dynamic_recompiler\""));
        assert!(opts.contains("bluemsx_msxtype = \"MSX2+\""));
    }

    #[test]
    fn test_netplay_host_args() {
        let env = TestEnv::new();
        env.install_core("fceumm");
        let rom = env.rom("nes", "smb.nes");
        let mut emu = env.descriptor(
            &LibretroGenerator,
            "nes",
            "libretro",
            "fceumm",
            &rom,
            &[("netplay.mode", "host")],
        );
        emu.flags |= LaunchFlags::NETPLAY;
        let cmd = run(&env, &emu, &pads(1));
        let host = cmd.argv.iter().position(|a| a == "--host").unwrap();
        assert_eq!(cmd.argv[host + 2], "55435");
        assert_eq!(cmd.argv.last().map(String::as_str), rom.to_str());
    }

    #[test]
    fn test_vulkan_falls_back_without_support() {
        let env = TestEnv::new();
        env.install_core("fceumm");
        let rom = env.rom("nes", "smb.nes");
        let emu = env.descriptor(
            &LibretroGenerator,
            "nes",
            "libretro",
            "fceumm",
            &rom,
            &[("gfxbackend", "vulkan")],
        );
        run(&env, &emu, &pads(1));
        let cfg = env.read(&LibretroGenerator::custom_config(&env.paths));
        assert!(cfg.contains("video_driver = \"gl\""));
    }

    #[test]
    fn test_ratio() {
        let config: SystemConfig = [("ratio", "16/9")].into_iter().collect();
        let ratio = LibretroGenerator.in_game_ratio(
            &config,
            Resolution::new(1920, 1080),
            Path::new("/r"),
        );
        assert_eq!(ratio, AspectRatio::SIXTEEN_NINE);
        assert!(LibretroGenerator.supports_internal_bezels());
    }
}
