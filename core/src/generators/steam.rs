//! Steam shortcuts
//!
//! A `.steam` file holds either a `steam://` URL or a numeric app id.

use std::path::Path;

use crate::command::Command;
use crate::controller::Players;
use crate::emulator::Emulator;
use crate::error::{ConfigGenError, Result};
use crate::generator::Generator;
use crate::services::Services;

#[derive(Debug, Default)]
pub struct SteamGenerator;

impl SteamGenerator {
    /// URL to hand to the Steam client.
    pub fn shortcut_url(rom: &Path) -> Result<String> {
        let text =
            configgen_shared::fs::read_file_with_limit(rom, configgen_shared::fs::MAX_SIDE_FILE_BYTES)?;
        let target = text.trim();
        if target.is_empty() {
            return Err(ConfigGenError::invalid(
                "rom",
                format!("empty steam shortcut {}", rom.display()),
            ));
        }
        if target.bytes().all(|b| b.is_ascii_digit()) {
            Ok(format!("steam://rungameid/{}", target))
        } else {
            Ok(target.to_string())
        }
    }
}

impl Generator for SteamGenerator {
    fn name(&self) -> &'static str {
        "steam"
    }

    fn generate(
        &self,
        emulator: &Emulator,
        _players: &Players,
        _services: &Services,
    ) -> Result<Command> {
        let url = Self::shortcut_url(emulator.rom())?;
        tracing::info!(url = %url, "launching steam shortcut");
        Ok(Command::new(["batocera-steam", url.as_str()]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{TestEnv, pads};

    #[test]
    fn test_numeric_id_becomes_url() {
        let env = TestEnv::new();
        let rom = env.write(&env.paths.rom_dir("steam").join("Portal.steam"), "400\n");
        let emu = env.descriptor(&SteamGenerator, "steam", "steam", "steam", &rom, &[]);
        let cmd = SteamGenerator.generate(&emu, &pads(1), &env.services()).unwrap();
        assert_eq!(cmd.argv, vec!["batocera-steam", "steam://rungameid/400"]);
    }

    #[test]
    fn test_url_passed_through() {
        let env = TestEnv::new();
        let rom = env.write(
            &env.paths.rom_dir("steam").join("Hades.steam"),
            "steam://rungameid/1145360",
        );
        assert_eq!(SteamGenerator::shortcut_url(&rom).unwrap(), "steam://rungameid/1145360");
    }

    #[test]
    fn test_empty_shortcut_is_invalid() {
        let env = TestEnv::new();
        let rom = env.write(&env.paths.rom_dir("steam").join("empty.steam"), "  \n");
        assert_eq!(SteamGenerator::shortcut_url(&rom).unwrap_err().exit_code(), 202);
    }
}
