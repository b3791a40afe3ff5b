//! Controller model
//!
//! A [`Controller`] is one physical input device bound to one player slot.
//! The frontend hands over the detected devices as a JSON array; the
//! launcher turns it into an ordered [`Players`] list before any generator
//! sees it.

mod devices;
mod sdl;


pub use devices::{DeviceInfo, NoDevices, SysfsDeviceInfo, pointing_device};
pub use sdl::sdl_name;

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigGenError, Result};

/// Kind of a physical input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Button,
    Axis,
    Hat,
    Key,
}

/// One mapped physical input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Input {
    pub kind: InputKind,
    /// Button, axis or hat number (key code for keyboards)
    pub id: i32,
    /// Axis direction (`-1`/`1`) or hat mask; `1` for buttons
    #[serde(default = "default_value")]
    pub value: i32,
    /// Linux input scan code, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<u32>,
}

fn default_value() -> i32 {
    1
}

impl Input {
    /// Hat direction name for SDL-style hat masks.
    pub fn hat_direction(&self) -> Option<&'static str> {
        match self.value {
            1 => Some("up"),
            2 => Some("right"),
            4 => Some("down"),
            8 => Some("left"),
            _ => None,
        }
    }
}

/// A physical controller assigned to a player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controller {
    pub name: String,
    pub guid: String,
    pub device_path: String,
    /// SDL joystick index
    pub index: u32,
    /// 1-based player slot
    pub player_index: u32,
    /// Logical input name (`a`, `up`, `l2`, `hotkey`, ...) to physical input
    #[serde(default)]
    pub inputs: BTreeMap<String, Input>,
    #[serde(default)]
    pub buttons: u32,
    #[serde(default)]
    pub axes: u32,
    #[serde(default)]
    pub hats: u32,
}

impl Controller {
    /// Look up a logical input. Missing inputs are not an error.
    pub fn input(&self, name: &str) -> Option<&Input> {
        self.inputs.get(name)
    }

    /// A controller that reports any key input is driven by a keyboard.
    pub fn is_keyboard(&self) -> bool {
        self.inputs.values().any(|i| i.kind == InputKind::Key)
    }

    /// Render this controller as a `gamecontrollerdb.txt` line.
    pub fn sdl_mapping(&self) -> String {
        sdl::mapping_line(self)
    }
}

/// Players of one launch, ordered by ascending `player_index`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Players {
    controllers: Vec<Controller>,
}

impl Players {
    /// Order controllers by player slot.
    ///
    /// Player indices must be unique and dense (`1..=N`).
    pub fn new(mut controllers: Vec<Controller>) -> Result<Self> {
        controllers.sort_by_key(|c| c.player_index);
        for (expected, controller) in (1u32..).zip(&controllers) {
            if controller.player_index != expected {
                return Err(ConfigGenError::BadCommandLineArguments(format!(
                    "player indices must be unique and dense, found {} where {} was expected",
                    controller.player_index, expected
                )));
            }
        }
        Ok(Self { controllers })
    }

    /// Parse a JSON array of controllers.
    pub fn from_json(text: &str) -> Result<Self> {
        let controllers: Vec<Controller> = serde_json::from_str(text).map_err(|e| {
            ConfigGenError::BadCommandLineArguments(format!("invalid controllers file: {}", e))
        })?;
        Self::new(controllers)
    }

    /// Load a JSON array of controllers from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let text = configgen_shared::fs::read_file_with_limit(
            path,
            configgen_shared::fs::MAX_SIDE_FILE_BYTES,
        )?;
        Self::from_json(&text)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Controller> {
        self.controllers.iter()
    }

    /// At most `ports` players, lowest player index first.
    pub fn take(&self, ports: usize) -> impl Iterator<Item = &Controller> {
        self.controllers.iter().take(ports)
    }

    pub fn first(&self) -> Option<&Controller> {
        self.controllers.first()
    }

    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }
}
