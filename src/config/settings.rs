//! User settings for grantplan
//!
//! Persisted in the platform config directory as JSON. The BLS API key may
//! also come from the `BLS_API_KEY` environment variable, which wins over the
//! settings file.

use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{GrantError, GrantResult};

/// OEWS data year used when none is configured
const DEFAULT_DATA_YEAR: u16 = 2023;

/// User settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// BLS API key; optional but raises rate limits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bls_api_key: Option<String>,

    /// Default metro area for salary validation
    #[serde(default = "default_area")]
    pub default_area: String,

    /// OEWS data year for wage lookups
    #[serde(default = "default_data_year")]
    pub data_year: u16,
}

fn default_area() -> String {
    "national".to_string()
}

fn default_data_year() -> u16 {
    DEFAULT_DATA_YEAR
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bls_api_key: None,
            default_area: default_area(),
            data_year: default_data_year(),
        }
    }
}

impl Settings {
    /// Platform settings file location, when a home directory exists
    pub fn settings_file() -> Option<PathBuf> {
        ProjectDirs::from("", "", "grantplan").map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load settings, writing defaults on first run
    ///
    /// Falls back to in-memory defaults when no config directory is
    /// available (e.g., stripped-down CI environments).
    pub fn load_or_create() -> GrantResult<Self> {
        let Some(path) = Self::settings_file() else {
            return Ok(Self::default());
        };

        if path.exists() {
            let contents = fs::read_to_string(&path)
                .map_err(|e| GrantError::Config(format!("Failed to read {}: {}", path.display(), e)))?;
            return serde_json::from_str(&contents)
                .map_err(|e| GrantError::Config(format!("Failed to parse {}: {}", path.display(), e)));
        }

        let settings = Self::default();
        settings.save()?;
        Ok(settings)
    }

    /// Write settings to the platform config directory
    pub fn save(&self) -> GrantResult<()> {
        let Some(path) = Self::settings_file() else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                GrantError::Config(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&path, contents)
            .map_err(|e| GrantError::Config(format!("Failed to write {}: {}", path.display(), e)))?;
        Ok(())
    }

    /// BLS API key with environment override
    pub fn resolved_api_key(&self) -> Option<String> {
        std::env::var("BLS_API_KEY")
            .ok()
            .filter(|key| !key.is_empty())
            .or_else(|| self.bls_api_key.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.default_area, "national");
        assert_eq!(settings.data_year, 2023);
        assert!(settings.bls_api_key.is_none());
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let settings: Settings = serde_json::from_str("{\"bls_api_key\": \"abc\"}").unwrap();
        assert_eq!(settings.bls_api_key.as_deref(), Some("abc"));
        assert_eq!(settings.default_area, "national");
    }

    #[test]
    fn test_round_trip() {
        let settings = Settings {
            bls_api_key: Some("key123".into()),
            default_area: "boston".into(),
            data_year: 2024,
        };
        let json = serde_json::to_string(&settings).unwrap();
        let parsed: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.default_area, "boston");
        assert_eq!(parsed.data_year, 2024);
    }
}
