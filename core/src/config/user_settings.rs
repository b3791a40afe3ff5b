//! User settings file (`batocera.conf` syntax)
//!
//! One `key=value` per line, `#` starts a comment. The key prefix selects the
//! scope the value applies to:
//!
//! | Key | Scope |
//! |---|---|
//! | `global.ratio` | every launch |
//! | `snes.ratio` | system `snes` |
//! | `emulator.dolphin.ratio` | emulator `dolphin` |
//! | `core.fceumm.ratio` | core `fceumm` |
//! | `snes["Game.sfc"].ratio` | one ROM of system `snes` |

use std::path::Path;

use super::SystemConfig;
use crate::error::Result;

/// Scope a user setting applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    Global,
    System(String),
    Emulator(String),
    Core(String),
    Rom { system: String, rom: String },
}

/// Parsed user settings, in file order.
#[derive(Debug, Clone, Default)]
pub struct UserSettings {
    entries: Vec<(Scope, String, String)>,
}

/// Split `key=value` lines, skipping blanks and comments.
pub(crate) fn parse_key_values(text: &str) -> Vec<(String, String)> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .filter(|(k, _)| !k.is_empty())
        .collect()
}

fn split_scope(key: &str) -> Option<(Scope, String)> {
    if let Some((head, rest)) = key.split_once("[\"") {
        let (rom, knob) = rest.split_once("\"].")?;
        if head.is_empty() || rom.is_empty() || knob.is_empty() {
            return None;
        }
        return Some((
            Scope::Rom {
                system: head.to_string(),
                rom: rom.to_string(),
            },
            knob.to_string(),
        ));
    }

    let (head, rest) = key.split_once('.')?;
    if rest.is_empty() {
        return None;
    }
    match head {
        "global" => Some((Scope::Global, rest.to_string())),
        "emulator" | "core" => {
            let (name, knob) = rest.split_once('.')?;
            if name.is_empty() || knob.is_empty() {
                return None;
            }
            let scope = if head == "emulator" {
                Scope::Emulator(name.to_string())
            } else {
                Scope::Core(name.to_string())
            };
            Some((scope, knob.to_string()))
        }
        system => Some((Scope::System(system.to_string()), rest.to_string())),
    }
}

impl UserSettings {
    pub fn parse(text: &str) -> Self {
        let entries = parse_key_values(text)
            .into_iter()
            .filter_map(|(key, value)| {
                let parsed = split_scope(&key);
                if parsed.is_none() {
                    tracing::debug!(key = %key, "ignoring unscoped user setting");
                }
                parsed.map(|(scope, knob)| (scope, knob, value))
            })
            .collect();
        Self { entries }
    }

    /// Load the settings file; an absent file yields no settings.
    pub fn load(path: &Path) -> Result<Self> {
        Ok(configgen_shared::fs::read_to_string_opt(path)?
            .map(|text| Self::parse(&text))
            .unwrap_or_default())
    }

    /// All knobs of one scope; later lines win.
    pub fn scope(&self, scope: &Scope) -> SystemConfig {
        self.entries
            .iter()
            .filter(|(s, _, _)| s == scope)
            .map(|(_, k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn global(&self) -> SystemConfig {
        self.scope(&Scope::Global)
    }

    pub fn for_system(&self, system: &str) -> SystemConfig {
        self.scope(&Scope::System(system.to_string()))
    }

    pub fn for_emulator(&self, emulator: &str) -> SystemConfig {
        self.scope(&Scope::Emulator(emulator.to_string()))
    }

    pub fn for_core(&self, core: &str) -> SystemConfig {
        self.scope(&Scope::Core(core.to_string()))
    }

    pub fn for_rom(&self, system: &str, rom: &str) -> SystemConfig {
        self.scope(&Scope::Rom {
            system: system.to_string(),
            rom: rom.to_string(),
        })
    }
}
