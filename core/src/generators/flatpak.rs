//! Flatpak applications
//!
//! The ROM is a `.flatpak` file holding the application id (its stem is
//! used when the file is empty). A bootstrap script next to the ROM runs
//! the app with its data redirected under `SAVES/flatpak/<app>`.

use std::path::{Path, PathBuf};

use configgen_shared::Paths;

use crate::command::Command;
use crate::controller::Players;
use crate::emulator::Emulator;
use crate::error::{ConfigGenError, Result};
use crate::generator::Generator;
use crate::services::Services;

#[derive(Debug, Default)]
pub struct FlatpakGenerator;

impl FlatpakGenerator {
    /// Application id named by the ROM.
    pub fn app_id(rom: &Path) -> Result<String> {
        let text = if rom.is_file() {
            configgen_shared::fs::read_file_with_limit(rom, configgen_shared::fs::MAX_SIDE_FILE_BYTES)?
        } else {
            String::new()
        };
        let id = match text.trim() {
            "" => rom
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default(),
            id => id.to_string(),
        };
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
        if valid {
            Ok(id)
        } else {
            Err(ConfigGenError::invalid(
                "rom",
                format!("invalid flatpak application id {:?} in {}", id, rom.display()),
            ))
        }
    }

    /// Bootstrap script path: `<rom>.sh`.
    pub fn script_path(rom: &Path) -> PathBuf {
        let mut name = rom.as_os_str().to_os_string();
        name.push(".sh");
        PathBuf::from(name)
    }

    pub fn data_dir(paths: &Paths, app: &str) -> PathBuf {
        paths.save_dir("flatpak").join(app)
    }

    fn script(app: &str, data: &Path) -> String {
        let data = shell_quote(&data.to_string_lossy());
        format!(
            "#!/bin/bash\n\
             export XDG_DATA_HOME={data}\n\
             exec flatpak run --filesystem={data} {app} \"$@\"\n",
        )
    }
}

/// Single-quote `value` for bash; embedded quotes become `'\''`.
fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))?;
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}

impl Generator for FlatpakGenerator {
    fn name(&self) -> &'static str {
        "flatpak"
    }

    fn generate(
        &self,
        emulator: &Emulator,
        _players: &Players,
        services: &Services,
    ) -> Result<Command> {
        let app = Self::app_id(emulator.rom())?;
        let data = Self::data_dir(&services.paths, &app);
        configgen_shared::fs::ensure_dir(&data)?;

        let script = Self::script_path(emulator.rom());
        configgen_shared::fs::write_atomic(&script, Self::script(&app, &data))?;
        make_executable(&script)?;
        tracing::info!(app = %app, script = %script.display(), "flatpak bootstrap written");

        Ok(Command::new([script.to_string_lossy()]))
    }

    fn owned_paths(&self, paths: &Paths, emulator: &Emulator) -> Vec<PathBuf> {
        let mut owned = vec![Self::script_path(emulator.rom())];
        match Self::app_id(emulator.rom()) {
            Ok(app) => owned.push(Self::data_dir(paths, &app)),
            Err(_) => owned.push(paths.save_dir("flatpak")),
        }
        owned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{TestEnv, pads};

    #[test]
    fn test_bootstrap_script() {
        let env = TestEnv::new();
        let rom = env.write(
            &env.paths.rom_dir("flatpak").join("Sonic Robo Blast.flatpak"),
            "org.srb2.SRB2\n",
        );
        let emu = env.descriptor(&FlatpakGenerator, "flatpak", "flatpak", "flatpak", &rom, &[]);
        let cmd = FlatpakGenerator.generate(&emu, &pads(1), &env.services()).unwrap();

        let script = FlatpakGenerator::script_path(&rom);
        assert_eq!(cmd.argv, vec![script.to_string_lossy().into_owned()]);
        let text = env.read(&script);
        assert!(text.starts_with("#!/bin/bash\n"));
        assert!(text.contains("flatpak run"));
        assert!(text.contains("org.srb2.SRB2 \"$@\""));
        assert!(FlatpakGenerator::data_dir(&env.paths, "org.srb2.SRB2").is_dir());

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&script).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o755);
        }
    }

    #[test]
    fn test_app_id_rejects_shell_text() {
        let env = TestEnv::new();
        let rom = env.write(&env.paths.rom_dir("flatpak").join("x.flatpak"), "rm -rf /");
        assert_eq!(FlatpakGenerator::app_id(&rom).unwrap_err().exit_code(), 202);

        let empty = env.write(&env.paths.rom_dir("flatpak").join("org.example.App.flatpak"), "");
        assert_eq!(FlatpakGenerator::app_id(&empty).unwrap(), "org.example.App");
    }

    #[test]
    fn test_data_path_is_shell_quoted() {
        let data = Path::new("/saves/it's $HOME \"x\"");
        let text = FlatpakGenerator::script("org.example.App", data);
        assert!(text.contains("export XDG_DATA_HOME='/saves/it'\\''s $HOME \"x\"'\n"));

        #[cfg(unix)]
        {
            let export = text.lines().nth(1).unwrap();
            let out = std::process::Command::new("sh")
                .arg("-c")
                .arg(format!("{}; printf %s \"$XDG_DATA_HOME\"", export))
                .output()
                .unwrap();
            assert_eq!(String::from_utf8(out.stdout).unwrap(), data.to_str().unwrap());
        }
    }
}
