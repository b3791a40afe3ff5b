//! Emulator descriptor
//!
//! The immutable launch request every generator receives: which system and
//! back-end was chosen, the ROM, the merged configuration and the light guns,
//! wheels and display resolution detected by the frontend.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use configgen_shared::Paths;

use crate::config::SystemConfig;
use crate::error::{ConfigGenError, Result};

/// Display resolution in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl FromStr for Resolution {
    type Err = ConfigGenError;

    /// Parse `WIDTHxHEIGHT`.
    fn from_str(s: &str) -> Result<Self> {
        let bad = || ConfigGenError::BadCommandLineArguments(format!("invalid resolution '{}'", s));
        let (w, h) = s.trim().split_once(['x', 'X']).ok_or_else(bad)?;
        let width = w.trim().parse().map_err(|_| bad())?;
        let height = h.trim().parse().map_err(|_| bad())?;
        if width == 0 || height == 0 {
            return Err(bad());
        }
        Ok(Self { width, height })
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A light gun detected by the frontend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gun {
    pub name: String,
    pub device_path: String,
    /// Mouse index the gun reports through
    pub mouse_index: u32,
    /// Names of available buttons (`trigger`, `start`, ...)
    #[serde(default)]
    pub buttons: Vec<String>,
    /// Whether the gun has no sight and needs an on-screen crosshair
    #[serde(default)]
    pub need_cross: bool,
    /// Whether the gun needs white screen borders to track
    #[serde(default)]
    pub need_borders: bool,
}

/// Parse a JSON array of guns.
pub fn guns_from_json(text: &str) -> Result<Vec<Gun>> {
    serde_json::from_str(text)
        .map_err(|e| ConfigGenError::BadCommandLineArguments(format!("invalid guns file: {}", e)))
}

/// A steering wheel detected by the frontend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wheel {
    pub name: String,
    /// Physical rotation range in degrees
    #[serde(default)]
    pub rotation: Option<u32>,
}

/// Wheels keyed by device path.
pub type Wheels = BTreeMap<String, Wheel>;

/// Parse a JSON object of wheels keyed by device path.
pub fn wheels_from_json(text: &str) -> Result<Wheels> {
    serde_json::from_str(text)
        .map_err(|e| ConfigGenError::BadCommandLineArguments(format!("invalid wheels file: {}", e)))
}

bitflags! {
    /// Capabilities in effect for this launch.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct LaunchFlags: u8 {
        /// Light guns are present and enabled
        const GUNS = 1 << 0;
        /// Wheels are present and enabled
        const WHEELS = 1 << 1;
        /// The ROM is a mounted squashfs bundle
        const SQUASHFS = 1 << 2;
        /// A netplay session was requested
        const NETPLAY = 1 << 3;
    }
}

/// Everything needed to build an [`Emulator`] descriptor.
#[derive(Debug, Clone, Default)]
pub struct EmulatorRequest {
    pub system: String,
    pub emulator: String,
    pub core: String,
    pub rom: PathBuf,
    pub config: SystemConfig,
    pub guns: Vec<Gun>,
    pub wheels: Wheels,
    pub resolution: Resolution,
}

/// The immutable launch descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct Emulator {
    pub system_name: String,
    pub emulator: String,
    pub core: String,
    pub rom_path: PathBuf,
    pub config: SystemConfig,
    /// Requested video mode (`videomode` knob, `"default"` when unset)
    pub video_mode: String,
    pub guns: Vec<Gun>,
    pub wheels: Wheels,
    pub resolution: Resolution,
    pub flags: LaunchFlags,
}

impl Emulator {
    /// Build the descriptor, deriving the video mode and capability flags.
    pub fn from_request(request: EmulatorRequest, paths: &Paths) -> Result<Self> {
        let config = request.config;
        let mut flags = LaunchFlags::empty();
        if !request.guns.is_empty() && config.get_bool_or("use_guns", true)? {
            flags |= LaunchFlags::GUNS;
        }
        if !request.wheels.is_empty() && config.get_bool_or("use_wheels", true)? {
            flags |= LaunchFlags::WHEELS;
        }
        if paths.is_squashfs(&request.rom) {
            flags |= LaunchFlags::SQUASHFS;
        }
        if config.get("netplay.mode").is_some_and(|m| !m.is_empty()) {
            flags |= LaunchFlags::NETPLAY;
        }

        Ok(Self {
            system_name: request.system,
            emulator: request.emulator,
            core: request.core,
            rom_path: request.rom,
            video_mode: config.get_or("videomode", "default").to_string(),
            config,
            guns: request.guns,
            wheels: request.wheels,
            resolution: request.resolution,
            flags,
        })
    }

    /// Guns to bind, empty unless [`LaunchFlags::GUNS`] is set.
    pub fn active_guns(&self) -> &[Gun] {
        if self.flags.contains(LaunchFlags::GUNS) {
            &self.guns
        } else {
            &[]
        }
    }

    pub fn rom(&self) -> &Path {
        &self.rom_path
    }

    /// Copy of this descriptor with one knob patched.
    pub fn with_option(&self, key: &str, value: &str) -> Self {
        let mut patched = self.clone();
        patched.config.set(key, value);
        if key == "videomode" {
            patched.video_mode = value.to_string();
        }
        patched
    }
}
