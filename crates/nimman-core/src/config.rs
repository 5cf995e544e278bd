//! Insight configuration
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. An explicit path, or the override in the data dir
//!    (~/.local/share/nimman/config/insights.toml) if it exists
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! Keys missing from a file keep their built-in values.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::insights::{InsightEngine, Thresholds};
use crate::report::DataRange;
use crate::store::DataSource;

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/insights.toml");

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    pub thresholds: Thresholds,
    /// Shop data file; the built-in sample data when unset
    pub data_path: Option<PathBuf>,
    pub range: DataRange,
    /// File the config was read from (None = embedded defaults)
    pub source_path: Option<PathBuf>,
}

impl AppConfig {
    /// Load the override file if present, else the embedded defaults
    pub fn load() -> Result<Self> {
        match default_config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => parse_config(DEFAULT_CONFIG),
        }
    }

    /// Load an explicit config file; it must exist
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config {}: {}", path.display(), e))
        })?;
        let mut config = parse_config(&content)?;

        // Relative data paths are relative to the config file
        if let (Some(data), Some(dir)) = (config.data_path.as_mut(), path.parent()) {
            if data.is_relative() {
                *data = dir.join(&*data);
            }
        }
        config.source_path = Some(path.to_path_buf());

        debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Engine configured with these thresholds
    pub fn engine(&self) -> InsightEngine {
        InsightEngine::with_thresholds(self.thresholds)
    }

    pub fn data_source(&self) -> DataSource {
        match &self.data_path {
            Some(path) => DataSource::file(path),
            None => DataSource::Mock,
        }
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("nimman").join("config").join("insights.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    thresholds: Option<RawThresholds>,
    data: Option<RawData>,
}

#[derive(Debug, Deserialize)]
struct RawThresholds {
    high_value: Option<f64>,
    moderate_value: Option<f64>,
    critical_service: Option<f64>,
    food_consistency: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawData {
    path: Option<PathBuf>,
    range: Option<String>,
}

/// Parse config from TOML content
pub fn parse_config(content: &str) -> Result<AppConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = AppConfig::default();

    if let Some(t) = raw.thresholds {
        let defaults = config.thresholds;
        config.thresholds = Thresholds {
            high_value: t.high_value.unwrap_or(defaults.high_value),
            moderate_value: t.moderate_value.unwrap_or(defaults.moderate_value),
            critical_service: t.critical_service.unwrap_or(defaults.critical_service),
            food_consistency: t.food_consistency.unwrap_or(defaults.food_consistency),
        };
    }
    config.thresholds.validate()?;

    if let Some(data) = raw.data {
        config.data_path = data.path;
        if let Some(range) = data.range {
            config.range = range.parse().map_err(Error::Config)?;
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_default_config() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.thresholds, Thresholds::default());
        assert_eq!(config.data_path, None);
        assert_eq!(config.range, DataRange::Last1Year);
        assert_eq!(config.data_source(), DataSource::Mock);
    }

    #[test]
    fn test_partial_override() {
        let config = parse_config(
            r#"
[thresholds]
high_value = 4.5
"#,
        )
        .unwrap();
        assert_eq!(config.thresholds.high_value, 4.5);
        assert_eq!(config.thresholds.moderate_value, 3.0);
        assert_eq!(config.engine().thresholds().high_value, 4.5);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        assert_eq!(parse_config("").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_rejects_invalid_thresholds_and_range() {
        assert!(matches!(
            parse_config("[thresholds]\nmoderate_value = 4.8\n"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            parse_config("[data]\nrange = \"forever\"\n"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            parse_config("[thresholds\n"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_from_file_resolves_relative_data_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("insights.toml");
        fs::write(&path, "[data]\npath = \"shops.csv\"\nrange = \"3m\"\n").unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.data_path, Some(dir.path().join("shops.csv")));
        assert_eq!(config.range, DataRange::Last3Months);
        assert_eq!(config.source_path, Some(path.clone()));
        assert_eq!(
            config.data_source(),
            DataSource::file(dir.path().join("shops.csv"))
        );
    }

    #[test]
    fn test_from_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            AppConfig::from_file(&dir.path().join("nope.toml")),
            Err(Error::Config(_))
        ));
    }
}
