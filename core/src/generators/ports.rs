//! Shell ports
//!
//! A port is a shell script that sets up and runs its own program.

use crate::command::Command;
use crate::controller::Players;
use crate::emulator::Emulator;
use crate::error::Result;
use crate::generator::Generator;
use crate::services::Services;

#[derive(Debug, Default)]
pub struct PortsGenerator;

impl Generator for PortsGenerator {
    fn name(&self) -> &'static str {
        "sh"
    }

    fn generate(
        &self,
        emulator: &Emulator,
        _players: &Players,
        _services: &Services,
    ) -> Result<Command> {
        Ok(Command::new(["bash"])
            .path_arg(emulator.rom())
            .cwd(super::rom_directory(emulator.rom())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{TestEnv, pads};

    #[test]
    fn test_runs_script_from_its_directory() {
        let env = TestEnv::new();
        let rom = env.rom("ports", "Quake.sh");
        let emu = env.descriptor(&PortsGenerator, "ports", "sh", "sh", &rom, &[]);
        let before = env.snapshot();
        let cmd = PortsGenerator.generate(&emu, &pads(1), &env.services()).unwrap();
        assert_eq!(cmd.argv, vec!["bash".to_string(), rom.to_string_lossy().into_owned()]);
        assert_eq!(cmd.cwd, Some(env.paths.rom_dir("ports")));
        assert_eq!(env.snapshot(), before);
    }
}
