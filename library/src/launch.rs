//! Launch orchestration
//!
//! Resolves the emulator, merges configuration, runs the generator and
//! starts the emulator process. Preparation and execution are separate so
//! the prepared command can be inspected without spawning anything.

use std::path::{Path, PathBuf};
use std::process::Command as Process;

use configgen_core::config::{ConfigSources, resolve_emulator_and_core};
use configgen_core::{
    Command, ConfigGenError, Emulator, EmulatorRequest, GeneratorRegistry, PostExitHook, Result,
    Services,
};
use configgen_shared::constants::MANGOHUD_BINARY;

use crate::request::LaunchRequest;

/// A command ready to spawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedLaunch {
    /// Generator that produced the command
    pub generator: &'static str,
    pub command: Command,
    /// Whether the frontend should leave the mouse to the emulator
    pub mouse_mode: bool,
}

/// Result of [`Launcher::prepare`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preparation {
    Ready(PreparedLaunch),
    /// The generator asked for nothing to run (missing assets)
    Nothing,
}

/// Drives one launch against a registry and a set of services.
pub struct Launcher {
    registry: GeneratorRegistry,
    services: Services,
}

/// Locate the program: an absolute path must exist, anything else is
/// looked up on `PATH`.
pub fn resolve_program(program: &str) -> Result<PathBuf> {
    let path = Path::new(program);
    if path.is_absolute() {
        return if path.is_file() {
            Ok(path.to_path_buf())
        } else {
            Err(ConfigGenError::MissingEmulator(program.to_string()))
        };
    }
    which::which(program).map_err(|_| ConfigGenError::MissingEmulator(program.to_string()))
}

fn hud_requested(emulator: &Emulator) -> bool {
    emulator
        .config
        .get("hud")
        .is_some_and(|v| !v.is_empty() && v != "none" && v != "0")
}

impl Launcher {
    pub fn new(services: Services) -> Self {
        Self::with_registry(GeneratorRegistry::builtin(), services)
    }

    pub fn with_registry(registry: GeneratorRegistry, services: Services) -> Self {
        Self { registry, services }
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    /// Run everything up to the point of spawning the emulator.
    pub fn prepare(&self, request: LaunchRequest) -> Result<Preparation> {
        let paths = &self.services.paths;
        let sources = ConfigSources::load(paths, request.transient)?;
        let (emulator_name, core) = resolve_emulator_and_core(
            &sources,
            &request.system,
            &request.rom,
            request.emulator.as_deref(),
            request.core.as_deref(),
        )?;
        let generator = self.registry.lookup(&request.system, &emulator_name, &core)?;

        let config = sources.merge(
            generator.default_options(),
            &request.system,
            &emulator_name,
            &core,
            &request.rom,
        )?;
        let resolution = match request.resolution {
            Some(resolution) => resolution,
            None => self.services.video.current_resolution()?,
        };
        let emulator = Emulator::from_request(
            EmulatorRequest {
                system: request.system,
                emulator: emulator_name,
                core,
                rom: request.rom,
                config,
                guns: request.guns,
                wheels: request.wheels,
                resolution,
            },
            paths,
        )?;
        tracing::info!(
            system = %emulator.system_name,
            emulator = %emulator.emulator,
            core = %emulator.core,
            generator = generator.name(),
            rom = %emulator.rom().display(),
            %resolution,
            flags = ?emulator.flags,
            "launching"
        );

        let mut command = generator.generate(&emulator, &request.players, &self.services)?;
        if command.is_nothing() {
            tracing::info!(generator = generator.name(), "nothing to run");
            return Ok(Preparation::Nothing);
        }

        let program = command.program().unwrap_or_default().to_string();
        let resolved = resolve_program(&program)?;
        command.argv[0] = resolved.to_string_lossy().into_owned();

        if hud_requested(&emulator) && !generator.has_internal_mangohud_call() {
            command.argv.insert(0, MANGOHUD_BINARY.to_string());
        }
        if command.cwd.is_none() {
            command.cwd = generator.execution_directory(&emulator.config, emulator.rom());
        }

        let mouse_mode = generator.mouse_mode(&emulator.config, emulator.rom());
        tracing::debug!(
            argv = ?command.argv,
            cwd = ?command.cwd,
            mouse_mode,
            video_mode = %generator.resolution_mode(&emulator.config),
            ratio = %generator.in_game_ratio(&emulator.config, resolution, emulator.rom()),
            hotkeys = %generator.hotkeys_context().name,
            "command prepared"
        );

        Ok(Preparation::Ready(PreparedLaunch {
            generator: generator.name(),
            command,
            mouse_mode,
        }))
    }

    /// Prepare, spawn and wait.
    pub fn run(&self, request: LaunchRequest) -> Result<()> {
        match self.prepare(request)? {
            Preparation::Nothing => Ok(()),
            Preparation::Ready(launch) => execute(&launch.command),
        }
    }
}

/// Spawn the command, wait for it and run its post-exit hooks.
pub fn execute(command: &Command) -> Result<()> {
    let Some((program, args)) = command.argv.split_first() else {
        return Ok(());
    };
    let mut process = Process::new(program);
    process.args(args).envs(&command.env);
    if let Some(cwd) = &command.cwd {
        process.current_dir(cwd);
    }

    let status = process.status()?;
    for hook in &command.post_exit {
        run_hook(hook);
    }

    if status.success() {
        tracing::info!(program = %program, "emulator exited");
        Ok(())
    } else {
        let code = status.code().unwrap_or(-1);
        Err(ConfigGenError::UnexpectedEmulatorExit(code))
    }
}

/// Hooks are best effort: a failure is logged and the next hook still runs.
fn run_hook(hook: &PostExitHook) {
    let outcome = match hook {
        PostExitHook::RemovePath(path) if path.is_dir() => std::fs::remove_dir_all(path),
        PostExitHook::RemovePath(path) => configgen_shared::fs::remove_if_exists(path).map(|_| ()),
        PostExitHook::RestoreFile { backup, target } => std::fs::rename(backup, target),
        PostExitHook::Run(argv) => match argv.split_first() {
            Some((program, args)) => Process::new(program).args(args).status().and_then(|s| {
                if s.success() {
                    Ok(())
                } else {
                    Err(std::io::Error::other(format!("exited with {}", s)))
                }
            }),
            None => Ok(()),
        },
    };
    if let Err(e) = outcome {
        tracing::warn!(?hook, error = %e, "post-exit hook failed");
    }
}
