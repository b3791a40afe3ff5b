//! Command line returned by generators.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Work to do after the emulator exits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostExitHook {
    /// Delete a file the launch created
    RemovePath(PathBuf),
    /// Move `backup` back over `target`
    RestoreFile { backup: PathBuf, target: PathBuf },
    /// Run a helper program
    Run(Vec<String>),
}

/// The subprocess the frontend should execute.
///
/// Built with a fluent API:
///
/// ```
/// use configgen_core::Command;
///
/// let cmd = Command::new(["dolphin-emu", "-e"])
///     .arg("/userdata/roms/gamecube/game.iso")
///     .env("QT_QPA_PLATFORM", "xcb");
/// assert_eq!(cmd.argv[0], "dolphin-emu");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Command {
    /// Program (name or absolute path) followed by its arguments
    pub argv: Vec<String>,
    /// Environment overrides
    pub env: BTreeMap<String, String>,
    /// Working directory
    pub cwd: Option<PathBuf>,
    /// Hooks run in order after the emulator exits
    pub post_exit: Vec<PostExitHook>,
}

impl Command {
    pub fn new<I, S>(argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            argv: argv.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// "Nothing to run": returned by asset-gated generators whose assets
    /// are missing.
    pub fn nothing() -> Self {
        Self::default()
    }

    /// Whether this is the [`Command::nothing`] sentinel.
    pub fn is_nothing(&self) -> bool {
        self.argv.is_empty()
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.argv.push(arg.into());
        self
    }

    /// Append a path argument.
    pub fn path_arg(self, path: &Path) -> Self {
        self.arg(path.to_string_lossy())
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.argv.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn on_exit(mut self, hook: PostExitHook) -> Self {
        self.post_exit.push(hook);
        self
    }

    /// Program name (`argv[0]`).
    pub fn program(&self) -> Option<&str> {
        self.argv.first().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let cmd = Command::new(["retroarch", "-L"])
            .arg("/usr/lib/libretro/fceumm_libretro.so")
            .args(["--config", "/x.cfg"])
            .path_arg(Path::new("/roms/nes/a.nes"))
            .env("A", "1")
            .cwd("/roms/nes")
            .on_exit(PostExitHook::RemovePath("/tmp/x".into()));
        assert_eq!(cmd.program(), Some("retroarch"));
        assert_eq!(cmd.argv.len(), 6);
        assert_eq!(cmd.env.get("A").map(String::as_str), Some("1"));
        assert_eq!(cmd.cwd.as_deref(), Some(Path::new("/roms/nes")));
        assert_eq!(cmd.post_exit.len(), 1);
    }

    #[test]
    fn test_nothing_sentinel() {
        assert!(Command::nothing().is_nothing());
        assert!(Command::nothing().program().is_none());
        assert!(!Command::new(["x"]).is_nothing());
    }
}
