//! Configgen Core - per-launch emulator configuration
//!
//! This crate turns a launch request into emulator configuration files on
//! disk plus the command that starts the emulator.
//!
//! # Architecture
//!
//! - [`SystemConfig`] - Layered knobs for one launch (defaults, user settings, overrides)
//! - [`Emulator`] - The immutable launch descriptor built from a request
//! - [`Generator`] - Trait implemented by each emulator family
//! - [`GeneratorRegistry`] - `(system, emulator, core)` lookup of generators
//! - [`Services`] - Probes and side effects handed to generators (devices, video, Vulkan, downloads)

pub mod command;
pub mod config;
pub mod controller;
pub mod emulator;
pub mod error;
pub mod generator;
pub mod generators;
pub mod helpers;
#[cfg(test)]
mod integration;
pub mod services;
#[cfg(test)]
pub mod test_utils;

pub use command::{Command, PostExitHook};
pub use config::SystemConfig;
pub use controller::{Controller, Players};
pub use emulator::{Emulator, EmulatorRequest, LaunchFlags, Resolution};
pub use error::{ConfigGenError, Result};
pub use generator::{AspectRatio, Generator, GeneratorRegistry, HotkeysContext, RegistryKey};
pub use services::Services;
