//! Ruffle (Flash)

use std::path::Path;

use crate::command::Command;
use crate::config::SystemConfig;
use crate::controller::Players;
use crate::emulator::Emulator;
use crate::error::Result;
use crate::generator::Generator;
use crate::services::Services;

#[derive(Debug, Default)]
pub struct RuffleGenerator;

impl Generator for RuffleGenerator {
    fn name(&self) -> &'static str {
        "ruffle"
    }

    fn generate(
        &self,
        emulator: &Emulator,
        _players: &Players,
        services: &Services,
    ) -> Result<Command> {
        let graphics = if services.vulkan.has_vulkan() { "vulkan" } else { "gl" };
        Ok(Command::new(["ruffle", "--fullscreen", "--graphics", graphics])
            .path_arg(emulator.rom()))
    }

    fn mouse_mode(&self, _config: &SystemConfig, _rom: &Path) -> bool {
        true
    }
}
