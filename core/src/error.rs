//! Error taxonomy for configuration generation
//!
//! Each kind maps to a stable process exit code so the frontend can tell
//! failures apart without parsing log output.

use thiserror::Error;

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, ConfigGenError>;

/// Main error type for the launcher core
#[derive(Error, Debug)]
pub enum ConfigGenError {
    #[error("Bad command line arguments: {0}")]
    BadCommandLineArguments(String),

    #[error("Invalid configuration for '{key}': {reason}")]
    InvalidConfiguration { key: String, reason: String },

    #[error("Unknown emulator '{emulator}' for system '{system}'")]
    UnknownEmulator { system: String, emulator: String },

    #[error("Emulator not installed: {0}")]
    MissingEmulator(String),

    #[error("Core not installed: {0}")]
    MissingCore(String),

    #[error("Emulator exited unexpectedly with code {0}")]
    UnexpectedEmulatorExit(i32),

    #[error("Download of {url} failed: {reason}")]
    Download { url: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ConfigGenError {
    /// Shorthand for [`ConfigGenError::InvalidConfiguration`].
    pub fn invalid(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Stable process exit code for this error kind.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::BadCommandLineArguments(_) => 201,
            Self::InvalidConfiguration { .. } => 202,
            Self::UnknownEmulator { .. } => 203,
            Self::MissingEmulator(_) => 204,
            Self::MissingCore(_) => 205,
            Self::UnexpectedEmulatorExit(_) => 206,
            Self::Download { .. } => 207,
            Self::Io(_) | Self::Other(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct() {
        let errors = [
            ConfigGenError::BadCommandLineArguments("x".into()),
            ConfigGenError::invalid("k", "r"),
            ConfigGenError::UnknownEmulator {
                system: "s".into(),
                emulator: "e".into(),
            },
            ConfigGenError::MissingEmulator("e".into()),
            ConfigGenError::MissingCore("c".into()),
            ConfigGenError::UnexpectedEmulatorExit(3),
            ConfigGenError::Download {
                url: "u".into(),
                reason: "r".into(),
            },
        ];
        let mut codes: Vec<i32> = errors.iter().map(|e| e.exit_code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
        assert!(codes.iter().all(|&c| c != 0 && c != 1));
    }

    #[test]
    fn test_invalid_configuration_names_key() {
        let err = ConfigGenError::invalid("bezel", "expected a boolean, got 'maybe'");
        assert!(err.to_string().contains("'bezel'"));
    }
}
