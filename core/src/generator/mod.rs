//! Generator contract
//!
//! A [`Generator`] turns a launch descriptor into emulator configuration
//! files plus the [`Command`] that runs the emulator. Every operation except
//! [`Generator::generate`] is pure and has a default, so a generator only
//! overrides the capabilities its emulator actually has.
//!
//! # Adding a generator
//!
//! 1. Implement [`Generator`] in `crate::generators`
//! 2. Declare its compiled-in knobs in [`Generator::default_options`]
//! 3. List every path it writes in [`Generator::owned_paths`]
//! 4. Add a [`GeneratorEntry`] to the built-in table in `crate::generators`

mod registry;


pub use registry::{GeneratorEntry, GeneratorFactory, GeneratorRegistry, RegistryBuilder, RegistryKey};

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use configgen_shared::Paths;

use crate::command::Command;
use crate::config::SystemConfig;
use crate::controller::Players;
use crate::emulator::{Emulator, Resolution};
use crate::error::Result;
use crate::services::Services;

/// Display aspect ratio, used to size bezels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AspectRatio {
    pub num: u32,
    pub den: u32,
}

impl AspectRatio {
    pub const FOUR_THREE: AspectRatio = AspectRatio::new(4, 3);
    pub const SIXTEEN_NINE: AspectRatio = AspectRatio::new(16, 9);

    pub const fn new(num: u32, den: u32) -> Self {
        Self { num, den }
    }

    /// Parse `"16/9"` style ratios. Zero terms are rejected.
    pub fn parse(text: &str) -> Option<Self> {
        let (num, den) = text.trim().split_once('/')?;
        let num = num.trim().parse().ok()?;
        let den = den.trim().parse().ok()?;
        (num != 0 && den != 0).then_some(Self { num, den })
    }

    /// Aspect of a resolution, reduced.
    pub fn of_resolution(resolution: Resolution) -> Option<Self> {
        fn gcd(a: u32, b: u32) -> u32 {
            if b == 0 { a } else { gcd(b, a % b) }
        }
        let g = gcd(resolution.width, resolution.height);
        (g != 0).then(|| Self::new(resolution.width / g, resolution.height / g))
    }

    pub fn as_f64(&self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        Self::FOUR_THREE
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

/// Keymap the frontend should use for hotkeys while this emulator runs.
///
/// `keys` maps a frontend action (`exit`, `save_state`, ...) to the key
/// sequence the emulator listens for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotkeysContext {
    pub name: String,
    pub keys: BTreeMap<String, Vec<String>>,
}

impl HotkeysContext {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            keys: BTreeMap::new(),
        }
    }

    pub fn key<I, S>(mut self, action: &str, sequence: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keys
            .insert(action.to_string(), sequence.into_iter().map(Into::into).collect());
        self
    }
}

impl Default for HotkeysContext {
    fn default() -> Self {
        Self::new("default")
    }
}

/// Per-emulator configuration generator.
pub trait Generator: Send + Sync {
    /// Stable generator id.
    fn name(&self) -> &'static str;

    /// Write the emulator's configuration and return the command to run.
    ///
    /// Must be idempotent: the same descriptor and filesystem produce the
    /// same bytes on disk and an equal command.
    fn generate(&self, emulator: &Emulator, players: &Players, services: &Services)
    -> Result<Command>;

    /// Compiled-in knob defaults (the first merge layer).
    fn default_options(&self) -> &'static [(&'static str, &'static str)] {
        &[]
    }

    /// Every file or directory [`Generator::generate`] may write.
    fn owned_paths(&self, _paths: &Paths, _emulator: &Emulator) -> Vec<PathBuf> {
        Vec::new()
    }

    fn resolution_mode(&self, config: &SystemConfig) -> String {
        config.get_or("videomode", "default").to_string()
    }

    /// Whether the frontend should leave the mouse to the emulator.
    fn mouse_mode(&self, _config: &SystemConfig, _rom: &Path) -> bool {
        false
    }

    fn execution_directory(&self, _config: &SystemConfig, _rom: &Path) -> Option<PathBuf> {
        None
    }

    fn supports_internal_bezels(&self) -> bool {
        false
    }

    fn has_internal_mangohud_call(&self) -> bool {
        false
    }

    fn in_game_ratio(
        &self,
        _config: &SystemConfig,
        _resolution: Resolution,
        _rom: &Path,
    ) -> AspectRatio {
        AspectRatio::FOUR_THREE
    }

    fn hotkeys_context(&self) -> HotkeysContext {
        HotkeysContext::default()
    }
}
