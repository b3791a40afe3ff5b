//! Integration tests for the generator set
//!
//! Runs every registered generator end to end against a throwaway
//! filesystem root, checks the behaviour all generators share, and replays
//! the literal launch scenarios.


#[cfg(test)]
pub(crate) mod fixtures {
    use std::path::PathBuf;

    use crate::{
        Emulator, Generator, GeneratorRegistry, Players, RegistryKey,
        generators::{CdogsGenerator, HurricanGenerator},
        test_utils::{TestEnv, pads},
    };

    /// One ready-to-run launch.
    pub struct Launch {
        pub generator: Box<dyn Generator>,
        pub emulator: Emulator,
        pub players: Players,
    }

    /// `(system, emulator, core)` used to exercise a registry key.
    pub fn launch_triple(key: &RegistryKey) -> (String, String, String) {
        let system = key.system.clone();
        let emulator = key.emulator.clone();
        match (system.as_deref(), emulator.as_deref()) {
            (Some(s), Some(e)) => {
                let core = key.core.clone().unwrap_or_else(|| e.to_string());
                (s.to_string(), e.to_string(), core)
            }
            (None, Some("libretro")) => ("nes".into(), "libretro".into(), "fceumm".into()),
            (None, Some(e)) => (default_system(e).into(), e.into(), e.into()),
            (Some(s), None) => {
                let e = if s == "ports" { "sh" } else { s };
                (s.into(), e.into(), e.into())
            }
            (None, None) => panic!("empty registry key"),
        }
    }

    fn default_system(emulator: &str) -> &'static str {
        match emulator {
            "bsnes" => "snes",
            "melonds" => "nds",
            "mupen64plus" => "n64",
            "dolphin" => "gamecube",
            "ppsspp" => "psp",
            "duckstation" => "psx",
            "dosbox" => "dos",
            "ruffle" => "flash",
            "hatari" => "atarist",
            "raze" | "eduke32" => "eduke32",
            "hurrican" => "hurrican",
            "cdogs" => "cdogs",
            "devilutionx" => "devilutionx",
            "scummvm" => "scummvm",
            _ => "unknown",
        }
    }

    /// Lay down whatever the emulator needs (ROM, core, assets) and return
    /// the ROM path.
    pub fn install(env: &TestEnv, system: &str, emulator: &str, core: &str) -> PathBuf {
        if emulator == "libretro" {
            env.install_core(core);
        }
        match emulator {
            "hurrican" => {
                std::fs::create_dir_all(HurricanGenerator::levels_dir(&env.paths)).unwrap();
                env.rom(system, "hurrican.game")
            }
            "cdogs" => {
                std::fs::create_dir_all(CdogsGenerator::data_dir(&env.paths)).unwrap();
                env.rom(system, "cdogs.game")
            }
            "devilutionx" => env.rom(system, "DIABDAT.MPQ"),
            "dosbox" => {
                let game = env.paths.rom_dir(system).join("doom.pc");
                env.write(&game.join("dosbox.bat"), "doom.exe\n");
                game
            }
            "scummvm" => env.write(&env.paths.rom_dir(system).join("monkey.scummvm"), "monkey1\n"),
            "flatpak" => env.write(
                &env.paths.rom_dir(system).join("srb2.flatpak"),
                "org.srb2.SRB2\n",
            ),
            "steam" => env.write(&env.paths.rom_dir(system).join("Portal.steam"), "400\n"),
            "sh" => env.write(&env.paths.rom_dir(system).join("Quake.sh"), "#!/bin/bash\n"),
            "raze" | "eduke32" => env.rom(system, "DUKE3D.GRP"),
            _ => env.rom(system, "game.rom"),
        }
    }

    /// Build a launch for a registry key with `options` on top of the
    /// generator defaults.
    pub fn prepare(env: &TestEnv, key: &RegistryKey, options: &[(&str, &str)], players: u32) -> Launch {
        let registry = GeneratorRegistry::builtin();
        let generator = registry.create(key).unwrap();
        let (system, emulator, core) = launch_triple(key);
        let rom = install(env, &system, &emulator, &core);
        let descriptor = env.descriptor(generator.as_ref(), &system, &emulator, &core, &rom, options);
        Launch {
            generator,
            emulator: descriptor,
            players: pads(players),
        }
    }

    /// Every built-in key.
    pub fn all_keys() -> Vec<RegistryKey> {
        GeneratorRegistry::builtin().keys()
    }
}
