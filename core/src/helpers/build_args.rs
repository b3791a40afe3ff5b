//! Build-engine argument files (`.build`)
//!
//! A `.build` file describes a Build-engine game or mod:
//!
//! ```text
//! # Duke Nukem 3D: Alien Armageddon
//! FILE = DUKE3D.GRP
//! DIR  = aamod
//! CON  = aa.con
//! DEF+ = aa_hires.def
//! ```
//!
//! Relative paths are resolved against the directory holding the file.

use std::path::{Path, PathBuf};

use configgen_shared::fs::{MAX_SIDE_FILE_BYTES, read_file_with_limit};

use crate::error::{ConfigGenError, Result};

/// Parsed contents of a `.build` file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildArgs {
    /// Main game data (`FILE`)
    pub file: Option<String>,
    /// Mod directory (`DIR`)
    pub dir: Option<String>,
    /// Additional data files (`FILE+`)
    pub extra_files: Vec<String>,
    /// Main CON script (`CON`)
    pub con: Option<String>,
    /// Additional CON scripts (`CON+`)
    pub extra_cons: Vec<String>,
    /// Main DEF file (`DEF`)
    pub def: Option<String>,
    /// Additional DEF files (`DEF+`)
    pub extra_defs: Vec<String>,
    /// User map (`MAP`)
    pub map: Option<String>,
}

/// Parse `.build` text. `origin` names the file in error messages.
pub fn parse_build_args(text: &str, origin: &str) -> Result<BuildArgs> {
    let mut args = BuildArgs::default();
    for (number, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (key, value) = line.split_once('=').ok_or_else(|| {
            ConfigGenError::invalid(origin, format!("line {}: expected KEY = value", number + 1))
        })?;
        let value = value.trim().to_string();
        match key.trim().to_ascii_uppercase().as_str() {
            "FILE" => args.file = Some(value),
            "FILE+" => args.extra_files.push(value),
            "DIR" => args.dir = Some(value),
            "CON" => args.con = Some(value),
            "CON+" => args.extra_cons.push(value),
            "DEF" => args.def = Some(value),
            "DEF+" => args.extra_defs.push(value),
            "MAP" => args.map = Some(value),
            other => {
                return Err(ConfigGenError::invalid(
                    other,
                    format!("unknown key in build file {} (line {})", origin, number + 1),
                ));
            }
        }
    }
    Ok(args)
}

/// Read and parse a `.build` file.
pub fn parse_build_file(path: &Path) -> Result<BuildArgs> {
    let text = read_file_with_limit(path, MAX_SIDE_FILE_BYTES)?;
    parse_build_args(&text, &path.display().to_string())
}

fn resolve(base: &Path, value: &str) -> String {
    let path = Path::new(value);
    if path.is_absolute() {
        value.to_string()
    } else {
        base.join(path).to_string_lossy().into_owned()
    }
}

impl BuildArgs {
    /// Arguments for EDuke32.
    pub fn eduke32_args(&self, base: &Path) -> Vec<String> {
        let mut out = Vec::new();
        let mut push = |flag: &str, value: &str| {
            out.push(flag.to_string());
            out.push(resolve(base, value));
        };
        if let Some(dir) = &self.dir {
            push("-j", dir);
        }
        if let Some(file) = &self.file {
            push("-gamegrp", file);
        }
        for extra in &self.extra_files {
            push("-g", extra);
        }
        if let Some(con) = &self.con {
            push("-x", con);
        }
        for extra in &self.extra_cons {
            push("-mx", extra);
        }
        if let Some(def) = &self.def {
            push("-h", def);
        }
        for extra in &self.extra_defs {
            push("-mh", extra);
        }
        if let Some(map) = &self.map {
            push("-map", map);
        }
        out
    }

    /// Arguments for Raze.
    pub fn raze_args(&self, base: &Path) -> Vec<String> {
        let mut out = Vec::new();
        let mut push = |flag: &str, value: &str| {
            out.push(flag.to_string());
            out.push(resolve(base, value));
        };
        if let Some(file) = &self.file {
            push("-iwad", file);
        }
        if let Some(dir) = &self.dir {
            push("-file", dir);
        }
        for extra in &self.extra_files {
            push("-file", extra);
        }
        if let Some(con) = &self.con {
            push("-con", con);
        }
        for extra in &self.extra_cons {
            push("-con", extra);
        }
        if let Some(def) = &self.def {
            push("-def", def);
        }
        for extra in &self.extra_defs {
            push("-def", extra);
        }
        if let Some(map) = &self.map {
            push("-map", map);
        }
        out
    }

    /// Directory holding the `.build` file, used as the resolution base.
    pub fn base_dir(build_file: &Path) -> PathBuf {
        build_file
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AA: &str = "# Alien Armageddon\nFILE = DUKE3D.GRP\ndir=aamod\nCON = aa.con\nDEF+ = a.def\nDEF+ = b.def\nMAP = /abs/e1l9.map\n";

    #[test]
    fn test_parse_keys_case_insensitive() {
        let args = parse_build_args(AA, "aa.build").unwrap();
        assert_eq!(args.file.as_deref(), Some("DUKE3D.GRP"));
        assert_eq!(args.dir.as_deref(), Some("aamod"));
        assert_eq!(args.extra_defs, vec!["a.def", "b.def"]);
        assert!(args.def.is_none());
    }

    #[test]
    fn test_unknown_key_is_invalid_configuration() {
        let err = parse_build_args("FILE = a.grp\nBOGUS = 1\n", "x.build").unwrap_err();
        match err {
            ConfigGenError::InvalidConfiguration { key, reason } => {
                assert_eq!(key, "BOGUS");
                assert!(reason.contains("line 2"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_separator_is_invalid() {
        assert!(parse_build_args("FILE duke3d.grp\n", "x.build").is_err());
    }

    #[test]
    fn test_eduke32_args() {
        let args = parse_build_args(AA, "aa.build").unwrap();
        let argv = args.eduke32_args(Path::new("/roms/eduke32"));
        assert_eq!(
            argv,
            vec![
                "-j", "/roms/eduke32/aamod",
                "-gamegrp", "/roms/eduke32/DUKE3D.GRP",
                "-x", "/roms/eduke32/aa.con",
                "-mh", "/roms/eduke32/a.def",
                "-mh", "/roms/eduke32/b.def",
                "-map", "/abs/e1l9.map",
            ]
        );
    }

    #[test]
    fn test_raze_args() {
        let args = parse_build_args(AA, "aa.build").unwrap();
        let argv = args.raze_args(Path::new("/roms/raze"));
        assert_eq!(&argv[..4], &["-iwad", "/roms/raze/DUKE3D.GRP", "-file", "/roms/raze/aamod"]);
        assert_eq!(argv.iter().filter(|a| *a == "-def").count(), 2);
    }
}
