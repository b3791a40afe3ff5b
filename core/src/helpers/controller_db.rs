//! SDL controller database writer
//!
//! Emulators that consume `gamecontrollerdb.txt` read it from a location
//! agreed in [`configgen_shared::constants`]. The file is rebuilt from the
//! current players on every launch so entries from earlier launches never
//! leak into this one.

use std::path::PathBuf;

use configgen_shared::Paths;

use crate::controller::Players;
use crate::error::Result;

/// Render the database: one line per distinct GUID, in player order.
pub fn render_controller_db(players: &Players) -> String {
    let mut seen: Vec<&str> = Vec::new();
    let mut out = String::new();
    for controller in players.iter() {
        if controller.guid.is_empty() || seen.contains(&controller.guid.as_str()) {
            continue;
        }
        seen.push(&controller.guid);
        out.push_str(&controller.sdl_mapping());
        out.push('\n');
    }
    out
}

/// Regenerate the controller database and return its path.
pub fn write_controller_db(paths: &Paths, players: &Players) -> Result<PathBuf> {
    let path = paths.controller_db();
    configgen_shared::fs::write_atomic(&path, render_controller_db(players))?;
    tracing::debug!(path = %path.display(), players = players.len(), "controller database written");
    Ok(path)
}
