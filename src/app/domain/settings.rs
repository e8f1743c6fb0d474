use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use super::attributes::{CharAttributes, DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, MAX_FONT_SIZE, is_valid_font_size};
use crate::app::infrastructure::error::AppError;
use crate::app::infrastructure::error_report::DEFAULT_REPORT_DIR;

/// How a plain text save treats a file that already has content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PlainSaveMode {
    /// Add the text after whatever the file holds.
    #[default]
    Append,
    /// Replace the file's content.
    Truncate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_font_family")]
    pub default_font_family: String,

    #[serde(default = "default_font_size")]
    pub default_font_size: u32,

    /// Seconds before a "saved" status reverts to idle
    #[serde(default = "default_status_revert_secs")]
    pub status_revert_secs: u64,

    #[serde(default)]
    pub plain_save_mode: PlainSaveMode,

    /// Where error reports go; relative paths resolve against the working directory
    #[serde(default)]
    pub error_report_dir: Option<PathBuf>,
}

fn default_font_family() -> String {
    DEFAULT_FONT_FAMILY.to_string()
}

fn default_font_size() -> u32 {
    DEFAULT_FONT_SIZE
}

fn default_status_revert_secs() -> u64 {
    5
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            default_font_family: default_font_family(),
            default_font_size: default_font_size(),
            status_revert_secs: default_status_revert_secs(),
            plain_save_mode: PlainSaveMode::default(),
            error_report_dir: None,
        }
    }
}

impl AppSettings {
    pub fn default_attributes(&self) -> CharAttributes {
        CharAttributes::new(self.default_font_family.clone(), self.default_font_size)
    }

    pub fn status_revert_delay(&self) -> Duration {
        Duration::from_secs(self.status_revert_secs)
    }

    pub fn report_dir(&self) -> PathBuf {
        self.error_report_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT_DIR))
    }

    /// Load settings from disk, or create default if not exists
    pub fn load() -> Self {
        let config_path = Self::get_config_path();

        match fs::read_to_string(&config_path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    tracing::warn!("Failed to parse settings: {}. Using defaults.", e);
                    Self::default()
                }
            },
            Err(_) => {
                // File doesn't exist, use defaults
                let default = Self::default();
                // Try to save defaults for next time
                if let Err(e) = default.save() {
                    tracing::debug!("Could not write default settings: {}", e);
                }
                default
            }
        }
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<(), AppError> {
        let config_path = Self::get_config_path();

        // Ensure parent directory exists
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, json)?;

        Ok(())
    }

    /// Get config file path (cross-platform)
    pub fn get_config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("richpad");
        path.push("settings.json");
        path
    }

    /// Reject values the editor cannot work with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.default_font_family.trim().is_empty() {
            return Err(AppError::Settings("default font family is empty".to_string()));
        }
        if !is_valid_font_size(self.default_font_size) {
            return Err(AppError::Settings(format!(
                "default font size must be between 1 and {}",
                MAX_FONT_SIZE
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = AppSettings::default();
        assert_eq!(settings.default_font_family, "Times New Roman");
        assert_eq!(settings.default_font_size, 12);
        assert_eq!(settings.status_revert_delay(), Duration::from_secs(5));
        assert_eq!(settings.plain_save_mode, PlainSaveMode::Append);
        assert_eq!(settings.report_dir(), PathBuf::from("ErrorReportingDirectory"));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_serialize_deserialize() {
        let settings = AppSettings::default();
        let json = serde_json::to_string(&settings).unwrap();
        let loaded: AppSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(settings, loaded);
    }

    #[test]
    fn test_partial_config() {
        // Simulate old config missing new fields
        let json = r#"{"default_font_size": 14, "plain_save_mode": "Truncate"}"#;
        let settings: AppSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.default_font_size, 14);
        assert_eq!(settings.plain_save_mode, PlainSaveMode::Truncate);
        assert_eq!(settings.default_font_family, "Times New Roman");
        assert_eq!(settings.status_revert_secs, 5);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let settings = AppSettings {
            default_font_size: 0,
            ..Default::default()
        };
        assert!(matches!(settings.validate(), Err(AppError::Settings(_))));

        let settings = AppSettings {
            default_font_size: MAX_FONT_SIZE + 1,
            ..Default::default()
        };
        assert!(settings.validate().is_err());

        let settings = AppSettings {
            default_font_family: "  ".to_string(),
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_default_attributes_follow_settings() {
        let settings = AppSettings {
            default_font_family: "Georgia".to_string(),
            default_font_size: 11,
            ..Default::default()
        };
        let attrs = settings.default_attributes();
        assert_eq!(attrs.family, "Georgia");
        assert_eq!(attrs.size, 11);
    }
}
