//! Persisted player settings.
//!
//! One flag today (mute), stored as RON in the platform config directory.
//! The in-memory settings stay authoritative: persistence failures are
//! logged by the caller and never interrupt play.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Settings {
    pub muted: bool,
}

/// Settings persistence errors.
#[derive(Debug)]
pub enum SettingsError {
    /// Filesystem trouble.
    Io(String),
    /// The file exists but isn't valid settings data.
    Format(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(msg) => write!(f, "I/O error: {}", msg),
            SettingsError::Format(msg) => write!(f, "settings format error: {}", msg),
        }
    }
}

impl std::error::Error for SettingsError {}

impl From<std::io::Error> for SettingsError {
    fn from(err: std::io::Error) -> Self {
        SettingsError::Io(err.to_string())
    }
}

impl From<ron::error::SpannedError> for SettingsError {
    fn from(err: ron::error::SpannedError) -> Self {
        SettingsError::Format(err.to_string())
    }
}

impl From<ron::Error> for SettingsError {
    fn from(err: ron::Error) -> Self {
        SettingsError::Format(err.to_string())
    }
}

impl Settings {
    /// Default location: `<config dir>/bramble/settings.ron`.
    pub fn default_path() -> Option<PathBuf> {
        #[cfg(not(target_arch = "wasm32"))]
        {
            dirs::config_dir().map(|dir| dir.join("bramble").join("settings.ron"))
        }
        #[cfg(target_arch = "wasm32")]
        {
            None
        }
    }

    /// Read settings from the default location. Missing or unreadable
    /// files fall back to defaults.
    pub fn load() -> Self {
        match Self::default_path() {
            Some(path) => Self::load_from(&path).unwrap_or_default(),
            None => Self::default(),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path)?;
        Ok(ron::from_str(&text)?)
    }

    /// Write settings; called on every mute toggle.
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let text = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?;
        std::fs::write(path, text)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.ron");

        let settings = Settings { muted: true };
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert!(loaded.muted);
    }

    #[test]
    fn test_load_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.ron");
        assert!(matches!(Settings::load_from(&path), Err(SettingsError::Io(_))));
    }

    #[test]
    fn test_load_garbage_is_a_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.ron");
        std::fs::write(&path, "not ron at all ((").unwrap();
        assert!(matches!(Settings::load_from(&path), Err(SettingsError::Format(_))));
    }
}
