//! Shared types for the configgen launcher crates.
//!
//! - [`Paths`] - the path registry, injectable for tests
//! - [`fs`] - atomic and idempotent filesystem helpers
//! - [`constants`] - file names agreed with the emulators

pub mod constants;
pub mod fs;
mod paths;

pub use paths::Paths;
