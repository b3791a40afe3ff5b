//! Well-known directories (the path registry)
//!
//! Every location the launcher reads or writes is derived from a [`Paths`]
//! value. Production code uses [`Paths::default`]; tests re-root the whole
//! layout under a temporary directory with [`Paths::rooted`].

use std::path::{Path, PathBuf};

use crate::constants::{CONTROLLER_DB_FILE, DEFAULTS_FILE};

/// Directory layout used for one launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    /// User data root (`/userdata`)
    pub userdata: PathBuf,
    /// Games, one sub-directory per system
    pub roms: PathBuf,
    /// Firmware images
    pub bios: PathBuf,
    /// Per-emulator save data
    pub saves: PathBuf,
    /// Per-emulator configuration directories
    pub configs: PathBuf,
    /// User settings file (`batocera.conf`)
    pub user_settings: PathBuf,
    /// Read-only system-wide defaults and templates
    pub defaults: PathBuf,
    /// Mount root for squashfs game bundles
    pub squashfs: PathBuf,
    /// Scratch directory shared with emulators
    pub tmp: PathBuf,
    /// Installed libretro cores
    pub libretro_cores: PathBuf,
    /// sysfs mount, used for input device discovery
    pub sysfs: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Self {
            userdata: PathBuf::from("/userdata"),
            roms: PathBuf::from("/userdata/roms"),
            bios: PathBuf::from("/userdata/bios"),
            saves: PathBuf::from("/userdata/saves"),
            configs: PathBuf::from("/userdata/system/configs"),
            user_settings: PathBuf::from("/userdata/system/batocera.conf"),
            defaults: PathBuf::from("/usr/share/batocera/configgen"),
            squashfs: PathBuf::from("/var/run/squashfs"),
            tmp: PathBuf::from("/tmp"),
            libretro_cores: PathBuf::from("/usr/lib/libretro"),
            sysfs: PathBuf::from("/sys"),
        }
    }
}

impl Paths {
    /// Production layout re-rooted under `root`.
    ///
    /// `/userdata/roms` becomes `<root>/userdata/roms`, and so on for every
    /// entry.
    pub fn rooted(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        let reroot = |p: PathBuf| root.join(p.strip_prefix("/").unwrap_or(&p));
        let d = Self::default();
        Self {
            userdata: reroot(d.userdata),
            roms: reroot(d.roms),
            bios: reroot(d.bios),
            saves: reroot(d.saves),
            configs: reroot(d.configs),
            user_settings: reroot(d.user_settings),
            defaults: reroot(d.defaults),
            squashfs: reroot(d.squashfs),
            tmp: reroot(d.tmp),
            libretro_cores: reroot(d.libretro_cores),
            sysfs: reroot(d.sysfs),
        }
    }

    /// `CONFIGS/<emulator>`
    pub fn config_dir(&self, emulator: &str) -> PathBuf {
        self.configs.join(emulator)
    }

    /// `SAVES/<emulator>`
    pub fn save_dir(&self, emulator: &str) -> PathBuf {
        self.saves.join(emulator)
    }

    /// `BIOS/<sub>`
    pub fn bios_dir(&self, sub: &str) -> PathBuf {
        self.bios.join(sub)
    }

    /// `ROMS/<system>`
    pub fn rom_dir(&self, system: &str) -> PathBuf {
        self.roms.join(system)
    }

    /// Transient SDL controller database, regenerated every launch.
    pub fn controller_db(&self) -> PathBuf {
        self.tmp.join(CONTROLLER_DB_FILE)
    }

    /// System-wide defaults table.
    pub fn defaults_file(&self) -> PathBuf {
        self.defaults.join(DEFAULTS_FILE)
    }

    /// Whether `path` lies inside the squashfs mount root.
    pub fn is_squashfs(&self, path: &Path) -> bool {
        path.starts_with(&self.squashfs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let paths = Paths::default();
        assert_eq!(paths.config_dir("bsnes"), PathBuf::from("/userdata/system/configs/bsnes"));
        assert_eq!(paths.controller_db(), PathBuf::from("/tmp/gamecontrollerdb.txt"));
        assert_eq!(paths.bios_dir("keropi"), PathBuf::from("/userdata/bios/keropi"));
    }

    #[test]
    fn test_rooted_layout() {
        let paths = Paths::rooted("/scratch");
        assert_eq!(paths.roms, PathBuf::from("/scratch/userdata/roms"));
        assert_eq!(paths.squashfs, PathBuf::from("/scratch/var/run/squashfs"));
        assert_eq!(
            paths.defaults_file(),
            PathBuf::from("/scratch/usr/share/batocera/configgen/configgen-defaults.toml")
        );
    }

    #[test]
    fn test_is_squashfs() {
        let paths = Paths::default();
        assert!(paths.is_squashfs(Path::new("/var/run/squashfs/rom_name")));
        assert!(!paths.is_squashfs(Path::new("/userdata/roms/snes/game.sfc")));
    }
}
