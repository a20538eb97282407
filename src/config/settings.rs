//! Configuration settings for Flatrip.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub recordings: RecordingSettings,
    pub conversion: ConversionSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Where recordings live and what they look like.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordingSettings {
    /// Folder the capture tool writes recordings into. Nested folders are
    /// collapsed into this root before selection.
    pub source_dir: String,
    /// File extension that identifies a recording.
    pub extension: String,
}

impl Default for RecordingSettings {
    fn default() -> Self {
        Self {
            source_dir: "~/Videos".to_string(),
            extension: "mp4".to_string(),
        }
    }
}

/// Conversion output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionSettings {
    /// Folder the converted MP3 files are written into.
    pub destination_dir: String,
    /// MP3 VBR quality (0 = best, 9 = smallest).
    pub quality: u8,
}

impl Default for ConversionSettings {
    fn default() -> Self {
        Self {
            destination_dir: "~/Music/rips".to_string(),
            quality: 2,
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or the default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> crate::error::Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::FlatripError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("flatrip")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded recordings source directory.
    pub fn source_dir(&self) -> PathBuf {
        Self::expand_path(&self.recordings.source_dir)
    }

    /// Get the expanded conversion destination directory.
    pub fn destination_dir(&self) -> PathBuf {
        Self::expand_path(&self.conversion.destination_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.recordings.extension, "mp4");
        assert_eq!(settings.conversion.quality, 2);
        assert_eq!(settings.general.log_level, "info");
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [recordings]
            source_dir = "/srv/captures"
            "#,
        )
        .unwrap();

        assert_eq!(settings.recordings.source_dir, "/srv/captures");
        assert_eq!(settings.recordings.extension, "mp4");
        assert_eq!(settings.conversion.destination_dir, "~/Music/rips");
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut settings = Settings::default();
        settings.recordings.extension = "mkv".to_string();
        settings.conversion.quality = 5;
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(loaded.recordings.extension, "mkv");
        assert_eq!(loaded.conversion.quality, 5);
    }

    #[test]
    fn test_load_from_missing_path_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope.toml");

        let loaded = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(loaded.recordings.extension, "mp4");
    }

    #[test]
    fn test_expand_path_home() {
        let expanded = Settings::expand_path("~/Videos");
        assert!(!expanded.to_string_lossy().starts_with('~'));
    }
}
