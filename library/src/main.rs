//! `emulatorlauncher`: configure and start one emulator for one game
//!
//! Exit status is 0 on success, the error kind's code for launcher failures
//! (201..=207) and 1 for anything unexpected.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use configgen::{LaunchArgs, Launcher, bad_arguments};
use configgen_core::{ConfigGenError, Services};
use configgen_shared::Paths;

fn exit_code(error: &anyhow::Error) -> u8 {
    let code = error
        .downcast_ref::<ConfigGenError>()
        .map(ConfigGenError::exit_code)
        .unwrap_or(1);
    u8::try_from(code).unwrap_or(1)
}

fn run(args: LaunchArgs) -> Result<()> {
    let rom = args.rom.clone();
    let request = args.into_request()?;
    let launcher = Launcher::new(Services::system(Paths::default()));
    launcher
        .run(request)
        .with_context(|| format!("launching {}", rom.display()))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = match LaunchArgs::try_parse_args(std::env::args_os()) {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            let error = bad_arguments(&e);
            tracing::error!("{}", error);
            return ExitCode::from(error.exit_code() as u8);
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::from(exit_code(&e))
        }
    }
}
