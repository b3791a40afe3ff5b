//! Emulator launcher
//!
//! Command line surface and launch orchestration on top of
//! `configgen-core`. The `emulatorlauncher` binary is a thin wrapper around
//! [`Launcher`]; everything it does is reachable from here so tests can drive
//! a launch without spawning the binary.

pub mod launch;
pub mod request;

pub use launch::{Launcher, PreparedLaunch, Preparation, execute, resolve_program};
pub use request::{LaunchArgs, LaunchRequest, bad_arguments};
