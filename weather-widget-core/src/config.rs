//! Widget configuration
//!
//! Values can come from a JSON file; the binary layers CLI flags and
//! environment variables on top before calling [`WidgetConfig::validate`].

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::state::{Unit, UnitChangePolicy};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
pub const DEFAULT_ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No API key configured (use --api-key or OPENWEATHER_API_KEY)")]
    MissingApiKey,

    #[error("Unknown temperature unit '{0}' (expected celsius or fahrenheit)")]
    UnknownUnit(String),

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Weather widget configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// Current-conditions endpoint
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Static service credential
    #[serde(default)]
    pub api_key: String,

    /// Prefix for `{icon}@2x.png` image URLs
    #[serde(default = "default_icon_base_url")]
    pub icon_base_url: String,

    /// Unit selected at startup
    #[serde(default)]
    pub default_unit: Unit,

    /// Whether a unit change re-derives or re-fetches
    #[serde(default)]
    pub unit_change: UnitChangePolicy,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_icon_base_url() -> String {
    DEFAULT_ICON_BASE_URL.to_string()
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            icon_base_url: default_icon_base_url(),
            default_unit: Unit::default(),
            unit_change: UnitChangePolicy::default(),
        }
    }
}

impl WidgetConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config: WidgetConfig = serde_json::from_str(r#"{ "api_key": "k" }"#).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.icon_base_url, DEFAULT_ICON_BASE_URL);
        assert_eq!(config.default_unit, Unit::Celsius);
        assert_eq!(config.unit_change, UnitChangePolicy::Recompute);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_enum_fields_lowercase() {
        let config: WidgetConfig = serde_json::from_str(
            r#"{ "api_key": "k", "default_unit": "fahrenheit", "unit_change": "refetch" }"#,
        )
        .unwrap();
        assert_eq!(config.default_unit, Unit::Fahrenheit);
        assert_eq!(config.unit_change, UnitChangePolicy::Refetch);
    }

    #[test]
    fn test_missing_api_key() {
        let config = WidgetConfig::default();
        assert!(matches!(config.validate(), Err(ConfigError::MissingApiKey)));
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("widget.json");
        fs::write(&path, r#"{ "api_key": "abc", "base_url": "http://localhost:9" }"#).unwrap();

        let config = WidgetConfig::from_json_file(&path).unwrap();
        assert_eq!(config.api_key, "abc");
        assert_eq!(config.base_url, "http://localhost:9");

        fs::write(&path, "[]").unwrap();
        assert!(matches!(
            WidgetConfig::from_json_file(&path),
            Err(ConfigError::Parse(_))
        ));
    }
}
