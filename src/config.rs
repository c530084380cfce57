/// Application settings
///
/// Settings are stored as JSON in the user's config directory:
/// - Linux: ~/.config/ai-image-studio/settings.json
/// - macOS: ~/Library/Application Support/ai-image-studio/settings.json
/// - Windows: %APPDATA%\ai-image-studio\settings.json
///
/// Every field has a default, so a partial file only overrides what it names.
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::StudioError;

/// Tunables for the page controller and the GUI shell
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Maximum number of reference images attached at once
    pub max_images: usize,

    /// Fixed delay of the simulated generation, in milliseconds
    pub generation_delay_ms: u64,

    /// How long a toast stays on screen, in milliseconds
    pub toast_duration_ms: u64,

    /// Longest side of the preview thumbnail, in pixels
    pub preview_size: u32,

    /// Files larger than this are refused before decoding
    pub max_file_bytes: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_images: 10,
            generation_delay_ms: 2000,
            toast_duration_ms: 4000,
            preview_size: 256,
            max_file_bytes: 20 * 1024 * 1024,
        }
    }
}

impl Settings {
    /// Convert to JSON string for storage
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn generation_delay(&self) -> Duration {
        Duration::from_millis(self.generation_delay_ms)
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }

    /// Reject values the controller cannot work with
    pub fn validate(&self) -> Result<(), StudioError> {
        if self.max_images == 0 {
            return Err(StudioError::InvalidSettings(
                "max_images must be at least 1".into(),
            ));
        }
        if self.preview_size == 0 {
            return Err(StudioError::InvalidSettings(
                "preview_size must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Get the path where the settings file is expected
    pub fn default_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir().or_else(dirs::home_dir)?;
        path.push("ai-image-studio");
        path.push("settings.json");
        Some(path)
    }

    /// Load settings from `path`
    ///
    /// A missing file is not an error and yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, StudioError> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no settings file at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(StudioError::Settings {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                })
            }
        };

        let settings = Self::from_json(&json).map_err(|e| StudioError::Settings {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        settings.validate()?;

        tracing::info!("⚙️  Settings loaded from {}", path.display());
        if let Ok(json) = settings.to_json() {
            tracing::debug!("effective settings: {json}");
        }
        Ok(settings)
    }

    /// Load settings from the default location, falling back to defaults on any failure
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            tracing::warn!("could not determine config directory, using default settings");
            return Self::default();
        };

        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.max_images, 10);
        assert_eq!(settings.generation_delay(), Duration::from_millis(2000));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "max_images": 3 }"#).unwrap();
        assert_eq!(settings.max_images, 3);
        assert_eq!(settings.generation_delay_ms, 2000);
        assert_eq!(settings.preview_size, 256);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("settings.json")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, r#"{{ "generation_delay_ms": 500, "toast_duration_ms": 1000 }}"#).unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.generation_delay(), Duration::from_millis(500));
        assert_eq!(settings.toast_duration(), Duration::from_millis(1000));
        assert_eq!(settings.max_images, 10);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = Settings::load_from(&path).unwrap_err();
        assert!(matches!(err, StudioError::Settings { .. }));
    }

    #[test]
    fn test_zero_cap_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "max_images": 0 }"#).unwrap();

        let err = Settings::load_from(&path).unwrap_err();
        assert!(matches!(err, StudioError::InvalidSettings(_)));
    }

    #[test]
    fn test_json_roundtrip() {
        let mut settings = Settings::default();
        settings.max_images = 4;
        let restored = Settings::from_json(&settings.to_json().unwrap()).unwrap();
        assert_eq!(settings, restored);
    }
}
