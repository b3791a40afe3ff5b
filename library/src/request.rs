//! Launch request (command line surface)
//!
//! ```bash
//! emulatorlauncher /userdata/roms/nes/mario.nes --system nes
//! emulatorlauncher game.iso --system gamecube --emulator dolphin \
//!     --controllers /tmp/controllers.json --set showFPS=1
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use clap::Parser;

use configgen_core::emulator::{Gun, Wheels, guns_from_json, wheels_from_json};
use configgen_core::{ConfigGenError, Players, Resolution, Result, SystemConfig};
use configgen_shared::fs::{MAX_SIDE_FILE_BYTES, read_file_with_limit};

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "emulatorlauncher")]
#[command(author, version, about = "Configure and start an emulator for one game")]
pub struct LaunchArgs {
    /// ROM file or directory to launch
    pub rom: PathBuf,

    /// System the ROM belongs to (nes, snes, gamecube, ...)
    #[arg(long)]
    pub system: String,

    /// Emulator to use instead of the configured one
    #[arg(long)]
    pub emulator: Option<String>,

    /// Core to use instead of the configured one
    #[arg(long)]
    pub core: Option<String>,

    /// JSON array describing the connected controllers
    #[arg(long)]
    pub controllers: Option<PathBuf>,

    /// JSON array describing the detected light guns
    #[arg(long)]
    pub guns: Option<PathBuf>,

    /// JSON object describing the detected wheels, keyed by device path
    #[arg(long)]
    pub wheels: Option<PathBuf>,

    /// Output resolution (WIDTHxHEIGHT); queried when absent
    #[arg(long, value_parser = parse_resolution)]
    pub resolution: Option<Resolution>,

    /// Override a configuration key for this launch only
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub overrides: Vec<(String, String)>,
}

fn parse_resolution(s: &str) -> std::result::Result<Resolution, String> {
    s.parse::<Resolution>().map_err(|e| e.to_string())
}

fn parse_key_value(s: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{}'", s));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

/// Everything read from the command line and the request files.
#[derive(Debug, Clone)]
pub struct LaunchRequest {
    pub system: String,
    pub emulator: Option<String>,
    pub core: Option<String>,
    pub rom: PathBuf,
    pub players: Players,
    pub guns: Vec<Gun>,
    pub wheels: Wheels,
    pub resolution: Option<Resolution>,
    /// `--set` values, the last merge layer
    pub transient: SystemConfig,
}

fn read_request_file(path: &Path, what: &str) -> Result<String> {
    read_file_with_limit(path, MAX_SIDE_FILE_BYTES).map_err(|e| {
        ConfigGenError::BadCommandLineArguments(format!("cannot read {} file: {:#}", what, e))
    })
}

impl LaunchArgs {
    /// Parse arguments. `--help` and `--version` come back as errors whose
    /// kind the caller checks before mapping to an exit code.
    pub fn try_parse_args<I, T>(args: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::try_parse_from(args)
    }

    /// Load the request files named on the command line.
    pub fn into_request(self) -> Result<LaunchRequest> {
        let players = match &self.controllers {
            Some(path) => Players::from_json(&read_request_file(path, "controllers")?)?,
            None => Players::default(),
        };
        let guns = match &self.guns {
            Some(path) => guns_from_json(&read_request_file(path, "guns")?)?,
            None => Vec::new(),
        };
        let wheels = match &self.wheels {
            Some(path) => wheels_from_json(&read_request_file(path, "wheels")?)?,
            None => Wheels::new(),
        };
        tracing::debug!(
            players = players.len(),
            guns = guns.len(),
            wheels = wheels.len(),
            "request files loaded"
        );

        Ok(LaunchRequest {
            system: self.system,
            emulator: self.emulator.filter(|e| !e.is_empty()),
            core: self.core.filter(|c| !c.is_empty()),
            rom: self.rom,
            players,
            guns,
            wheels,
            resolution: self.resolution,
            transient: self.overrides.into_iter().collect(),
        })
    }
}

/// Map a clap failure onto the launcher's error taxonomy.
pub fn bad_arguments(error: &clap::Error) -> ConfigGenError {
    ConfigGenError::BadCommandLineArguments(error.to_string().trim().to_string())
}
