//! Asset gate for generators that need an external data pack

use std::path::Path;

/// Whether the asset directory is installed.
///
/// When it is not, exactly one ERROR naming the missing assets is logged and
/// the caller should return [`Command::nothing`](crate::Command::nothing)
/// without writing anything.
pub fn assets_installed(dir: &Path, message: &str) -> bool {
    if dir.is_dir() {
        return true;
    }
    tracing::error!(dir = %dir.display(), "{}", message);
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::LogCapture;

    #[test]
    fn test_present_dir_logs_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let capture = LogCapture::default();
        let ok = capture.run(|| assets_installed(dir.path(), "missing"));
        assert!(ok);
        assert!(capture.events().is_empty());
    }

    #[test]
    fn test_absent_dir_logs_one_error() {
        let dir = tempfile::tempdir().unwrap();
        let capture = LogCapture::default();
        let ok = capture.run(|| assets_installed(&dir.path().join("data"), "assets missing"));
        assert!(!ok);
        let errors = capture.errors();
        assert_eq!(errors, vec!["assets missing".to_string()]);
    }
}
