//! Filesystem helpers shared across the launcher crates.

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};

/// Maximum size for small descriptor files read next to a ROM
/// (`.scummvm`, `.steam`, `.build`, ...).
pub const MAX_SIDE_FILE_BYTES: u64 = 1024 * 1024; // 1 MiB

/// Read a file into a string with a size cap.
pub fn read_file_with_limit(path: &Path, max_bytes: u64) -> Result<String> {
    let metadata = std::fs::metadata(path)
        .with_context(|| format!("Failed to read file metadata: {}", path.display()))?;
    let len = metadata.len();
    if len > max_bytes {
        anyhow::bail!(
            "File too large: {} ({} bytes, max {} bytes)",
            path.display(),
            len,
            max_bytes
        );
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
}

/// Read a text file, mapping "not found" to `None`.
pub fn read_to_string_opt(path: &Path) -> io::Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Create a directory (and parents) if missing.
pub fn ensure_dir(path: &Path) -> io::Result<()> {
    std::fs::create_dir_all(path)
}

/// Remove a file if it exists. Returns whether something was removed.
pub fn remove_if_exists(path: &Path) -> io::Result<bool> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// Replace `path` with `contents` using write-then-rename.
///
/// Readers outside this process never observe a half-written file. Parent
/// directories are created as needed.
pub fn write_atomic(path: &Path, contents: impl AsRef<[u8]>) -> io::Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no parent"))?;
    std::fs::create_dir_all(parent)?;

    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"))?;
    let mut tmp_name = std::ffi::OsString::from(".");
    tmp_name.push(file_name);
    tmp_name.push(".tmp");
    let tmp_path = parent.join(tmp_name);

    {
        let mut file = std::fs::File::create(&tmp_path)?;
        file.write_all(contents.as_ref())?;
        file.sync_all()?;
    }

    if let Err(e) = std::fs::rename(&tmp_path, path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(e);
    }
    tracing::debug!(path = %path.display(), "wrote file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_atomic_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("a/b/c.cfg");
        write_atomic(&target, "x=1\n").unwrap();
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "x=1\n");
        // No temporary file is left behind
        let names: Vec<_> = std::fs::read_dir(target.parent().unwrap())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names.len(), 1);
    }

    #[test]
    fn test_write_atomic_replaces() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("db.txt");
        write_atomic(&target, "old stale entry\nsecond line\n").unwrap();
        write_atomic(&target, "fresh\n").unwrap();
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "fresh\n");
    }

    #[test]
    fn test_remove_if_exists() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("sram.dat");
        assert!(!remove_if_exists(&target).unwrap());
        std::fs::write(&target, b"x").unwrap();
        assert!(remove_if_exists(&target).unwrap());
        assert!(!target.exists());
    }

    #[test]
    fn test_read_to_string_opt_missing() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(read_to_string_opt(&dir.path().join("nope")).unwrap(), None);
    }

    #[test]
    fn test_read_file_with_limit_rejects_large() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("big.build");
        std::fs::write(&target, vec![b'a'; 64]).unwrap();
        assert!(read_file_with_limit(&target, 16).is_err());
        assert_eq!(read_file_with_limit(&target, 64).unwrap().len(), 64);
    }
}
