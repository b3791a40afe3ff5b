//! Primary ROM lookup inside a mounted squashfs bundle

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Pick the primary ROM in `dir`.
///
/// Candidates are regular files whose extension (case-insensitive) appears in
/// `extensions`; an earlier extension wins. Among files with the same
/// extension a stem of `rom` wins, then lexical order. Files whose name
/// starts with `README` are never chosen.
pub fn select_rom(dir: &Path, extensions: &[&str]) -> Result<Option<PathBuf>> {
    let mut candidates: Vec<(usize, bool, String, PathBuf)> = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.to_ascii_uppercase().starts_with("README") {
            continue;
        }
        let Some(ext) = path.extension().map(|e| e.to_string_lossy().to_ascii_lowercase()) else {
            continue;
        };
        let Some(priority) = extensions.iter().position(|e| e.eq_ignore_ascii_case(&ext)) else {
            continue;
        };
        let is_rom = path.file_stem().is_some_and(|s| s.eq_ignore_ascii_case("rom"));
        candidates.push((priority, is_rom, name, path));
    }

    candidates.sort_by(|a, b| {
        a.0.cmp(&b.0)
            .then_with(|| match (a.1, b.1) {
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                _ => Ordering::Equal,
            })
            .then_with(|| a.2.cmp(&b.2))
    });

    let selected = candidates.into_iter().next().map(|(_, _, _, path)| path);
    tracing::debug!(dir = %dir.display(), rom = ?selected, "squashfs rom lookup");
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle(files: &[&str]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for f in files {
            std::fs::write(dir.path().join(f), b"x").unwrap();
        }
        dir
    }

    fn selected_name(dir: &Path, exts: &[&str]) -> Option<String> {
        select_rom(dir, exts)
            .unwrap()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
    }

    #[test]
    fn test_rom_stem_wins() {
        let dir = bundle(&["foo.sfc", "rom.sfc", "README.txt"]);
        assert_eq!(selected_name(dir.path(), &["sfc", "smc"]).as_deref(), Some("rom.sfc"));
    }

    #[test]
    fn test_extension_priority_before_name() {
        let dir = bundle(&["rom.smc", "zelda.sfc"]);
        assert_eq!(selected_name(dir.path(), &["sfc", "smc"]).as_deref(), Some("zelda.sfc"));
    }

    #[test]
    fn test_lexical_tie_break() {
        let dir = bundle(&["b.sfc", "a.SFC"]);
        assert_eq!(selected_name(dir.path(), &["sfc"]).as_deref(), Some("a.SFC"));
    }

    #[test]
    fn test_readme_never_selected() {
        let dir = bundle(&["README.sfc", "readme.txt"]);
        assert_eq!(selected_name(dir.path(), &["sfc", "txt"]), None);
    }

    #[test]
    fn test_subdirectories_ignored() {
        let dir = bundle(&[]);
        std::fs::create_dir(dir.path().join("rom.sfc")).unwrap();
        assert_eq!(selected_name(dir.path(), &["sfc"]), None);
    }
}
