//! Centralized constants for the configgen crates.
//!
//! File names that are agreed between the launcher and the emulators it
//! configures live here so both sides use a single source of truth.

/// SDL controller database name (under the scratch directory).
pub const CONTROLLER_DB_FILE: &str = "gamecontrollerdb.txt";

/// Environment variable SDL reads the controller database path from.
pub const CONTROLLER_DB_ENV: &str = "SDL_GAMECONTROLLERCONFIG_FILE";

/// System-wide defaults table (under the defaults directory).
pub const DEFAULTS_FILE: &str = "configgen-defaults.toml";

/// Suffix of the per-ROM override side file (`game.zip` -> `game.zip.conf`).
pub const ROM_OVERRIDE_SUFFIX: &str = "conf";

/// Launcher wrapper used when the HUD overlay is requested.
pub const MANGOHUD_BINARY: &str = "mangohud";
