//! Emulator settings files
//!
//! Two small formats cover most emulators: flat `key=value` files and
//! sectioned INI files. Both load what is already on disk, so settings the
//! user changed inside the emulator survive, and both save in sorted order,
//! so rewriting the same values yields the same bytes.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Line layout of a [`KeyValueFile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyValueStyle {
    /// `key=value`
    Plain,
    /// `key = value`
    Spaced,
    /// `key = "value"` (RetroArch)
    Quoted,
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

/// A flat `key=value` settings file.
#[derive(Debug, Clone)]
pub struct KeyValueFile {
    path: PathBuf,
    style: KeyValueStyle,
    values: BTreeMap<String, String>,
}

impl KeyValueFile {
    /// An empty file that will be written to `path`.
    pub fn new(path: impl Into<PathBuf>, style: KeyValueStyle) -> Self {
        Self {
            path: path.into(),
            style,
            values: BTreeMap::new(),
        }
    }

    /// Load `path` if it exists, otherwise start empty.
    pub fn load(path: impl Into<PathBuf>, style: KeyValueStyle) -> Result<Self> {
        let mut file = Self::new(path, style);
        if let Some(text) = configgen_shared::fs::read_to_string_opt(&file.path)? {
            for line in text.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                if let Some((k, v)) = line.split_once('=') {
                    file.values
                        .insert(k.trim().to_string(), unquote(v.trim()).to_string());
                }
            }
        }
        Ok(file)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for (k, v) in &self.values {
            let line = match self.style {
                KeyValueStyle::Plain => format!("{}={}\n", k, v),
                KeyValueStyle::Spaced => format!("{} = {}\n", k, v),
                KeyValueStyle::Quoted => format!("{} = \"{}\"\n", k, v),
            };
            out.push_str(&line);
        }
        out
    }

    /// Write the file atomically.
    pub fn save(&self) -> Result<()> {
        configgen_shared::fs::write_atomic(&self.path, self.render())?;
        Ok(())
    }
}

/// A sectioned INI file.
///
/// Keys outside any section live in the `""` section, which is rendered
/// first without a header.
#[derive(Debug, Clone)]
pub struct IniFile {
    path: PathBuf,
    separator: &'static str,
    sections: BTreeMap<String, BTreeMap<String, String>>,
}

impl IniFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            separator: " = ",
            sections: BTreeMap::new(),
        }
    }

    /// Use `separator` between keys and values (`"="` for emulators that
    /// reject spaces).
    pub fn with_separator(mut self, separator: &'static str) -> Self {
        self.separator = separator;
        self
    }

    /// Load `path` if it exists, otherwise start empty.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let mut file = Self::new(path);
        if let Some(text) = configgen_shared::fs::read_to_string_opt(&file.path)? {
            let mut section = String::new();
            for line in text.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                    continue;
                }
                if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                    section = name.trim().to_string();
                    continue;
                }
                if let Some((k, v)) = line.split_once('=') {
                    file.set(&section, k.trim(), v.trim());
                }
            }
        }
        Ok(file)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections.get(section)?.get(key).map(String::as_str)
    }

    pub fn set(&mut self, section: &str, key: impl Into<String>, value: impl Into<String>) {
        self.sections
            .entry(section.to_string())
            .or_default()
            .insert(key.into(), value.into());
    }

    pub fn remove(&mut self, section: &str, key: &str) -> Option<String> {
        self.sections.get_mut(section)?.remove(key)
    }

    /// Drop a whole section.
    pub fn clear_section(&mut self, section: &str) {
        self.sections.remove(section);
    }

    pub fn has_section(&self, section: &str) -> bool {
        self.sections.contains_key(section)
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for (name, entries) in &self.sections {
            if entries.is_empty() {
                continue;
            }
            if !name.is_empty() {
                if !out.is_empty() {
                    out.push('\n');
                }
                out.push_str(&format!("[{}]\n", name));
            }
            for (k, v) in entries {
                out.push_str(k);
                out.push_str(self.separator);
                out.push_str(v);
                out.push('\n');
            }
        }
        out
    }

    /// Write the file atomically.
    pub fn save(&self) -> Result<()> {
        configgen_shared::fs::write_atomic(&self.path, self.render())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_value_styles() {
        let mut file = KeyValueFile::new("/x", KeyValueStyle::Quoted);
        file.set("video_fullscreen", "true");
        file.set("audio_driver", "alsa");
        assert_eq!(file.render(), "audio_driver = \"alsa\"\nvideo_fullscreen = \"true\"\n");

        let mut plain = KeyValueFile::new("/x", KeyValueStyle::Plain);
        plain.set("a", "1");
        assert_eq!(plain.render(), "a=1\n");
    }

    #[test]
    fn test_key_value_load_keeps_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("retroarch.cfg");
        std::fs::write(&path, "# comment\nmenu_driver = \"ozone\"\nvideo_vsync = \"true\"\n").unwrap();

        let mut file = KeyValueFile::load(&path, KeyValueStyle::Quoted).unwrap();
        assert_eq!(file.get("menu_driver"), Some("ozone"));
        file.set("video_vsync", "false");
        file.save().unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "menu_driver = \"ozone\"\nvideo_vsync = \"false\"\n");

        // Saving again is byte-identical
        KeyValueFile::load(&path, KeyValueStyle::Quoted).unwrap().save().unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), text);
    }

    #[test]
    fn test_ini_render_sorted() {
        let mut ini = IniFile::new("/x");
        ini.set("Video", "Fullscreen", "1");
        ini.set("Core", "EnableCheats", "0");
        ini.set("", "Version", "3");
        assert_eq!(
            ini.render(),
            "Version = 3\n\n[Core]\nEnableCheats = 0\n\n[Video]\nFullscreen = 1\n"
        );
    }

    #[test]
    fn test_ini_load_roundtrip_and_separator() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.ini");
        std::fs::write(&path, "; comment\n[General]\nA=1\nB = two\n").unwrap();
        let ini = IniFile::load(&path).unwrap().with_separator("=");
        assert_eq!(ini.get("General", "B"), Some("two"));
        assert_eq!(ini.render(), "[General]\nA=1\nB=two\n");
    }

    #[test]
    fn test_ini_clear_section() {
        let mut ini = IniFile::new("/x");
        ini.set("Pad1", "Up", "x");
        assert!(ini.has_section("Pad1"));
        ini.clear_section("Pad1");
        assert_eq!(ini.render(), "");
    }
}
