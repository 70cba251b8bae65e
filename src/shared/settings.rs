use crate::shared::error::{AppError, AppResult};
use directories::ProjectDirs;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use ts_rs::TS;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "omniconvert/")]
pub struct AppSettings {
    pub preferences: UserPreferences,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export, export_to = "omniconvert/")]
pub struct UserPreferences {
    /// Category a bare `session` starts in
    pub default_category: String,
    pub default_data_converter: String,
    /// `trace|debug|info|warn|error`; `None` keeps the build default
    pub log_level: Option<String>,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            default_category: "length".to_string(),
            default_data_converter: "json-to-yaml".to_string(),
            log_level: None,
        }
    }
}

impl AppSettings {
    pub fn get_settings_path() -> AppResult<PathBuf> {
        ProjectDirs::from("com", "antigravity", "omniconvert")
            .map(|dirs| dirs.config_dir().join("settings.json"))
            .ok_or_else(|| AppError::Config("Failed to determine config directory".to_string()))
    }

    /// Load from the platform config directory, writing defaults on first run
    pub fn load() -> AppResult<Self> {
        let path = Self::get_settings_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            debug!("[settings] {} not found, writing defaults", path.display());
            let settings = Self::default();
            settings.save_to(path)?;
            return Ok(settings);
        }

        let content = fs::read_to_string(path)?;

        serde_json::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse settings: {}", e)))
    }

    /// Load from `path`, or from the platform config directory when `None`
    pub fn load_at(path: Option<&Path>) -> AppResult<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => Self::load(),
        }
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_first_load_writes_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let settings = AppSettings::load_from(&path).unwrap();
        assert_eq!(settings, AppSettings::default());
        assert!(path.exists());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut settings = AppSettings::default();
        settings.preferences.default_category = "temperature".to_string();
        settings.preferences.log_level = Some("info".to_string());
        settings.save_to(&path).unwrap();

        let loaded = AppSettings::load_from(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_preference_fields_use_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"preferences":{"default_category":"mass"}}"#).unwrap();

        let loaded = AppSettings::load_from(&path).unwrap();
        assert_eq!(loaded.preferences.default_category, "mass");
        assert_eq!(loaded.preferences.default_data_converter, "json-to-yaml");
        assert_eq!(loaded.preferences.log_level, None);
    }

    #[test]
    fn test_broken_file_is_config_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(AppSettings::load_from(&path), Err(AppError::Config(_))));
        assert!(matches!(AppSettings::load_at(Some(&path)), Err(AppError::Config(_))));
    }
}
