//! Shared utilities for commands
//!
//! This module contains:
//! - `setup` - Resolve the effective config and data source
//! - `open_dataset` - Load the selected shop data
//! - `parse_format` / `parse_range` - Flag parsing helpers

use std::path::Path;

use anyhow::{Context, Result};
use nimman_core::{AppConfig, DataFormat, DataRange, DataSource, Dataset};
use tracing::warn;

/// Load an explicit config file, else the override file, else built-in defaults
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    match path {
        Some(p) => AppConfig::from_file(p)
            .with_context(|| format!("Failed to load config {}", p.display())),
        None => AppConfig::load().context("Failed to load config"),
    }
}

/// `--data` wins over the configured data path; with neither, the sample data is used
pub fn data_source(
    config: &AppConfig,
    data: Option<&Path>,
    format: Option<DataFormat>,
) -> DataSource {
    let path = data.or(config.data_path.as_deref());

    match path {
        Some(path) => DataSource::File {
            path: path.to_path_buf(),
            format,
        },
        None => {
            if format.is_some() {
                warn!("--format ignored: no data file given, using sample data");
            }
            DataSource::Mock
        }
    }
}

/// Config and data source for commands that read shop data
pub fn setup(
    config_path: Option<&Path>,
    data: Option<&Path>,
    format: Option<DataFormat>,
) -> Result<(AppConfig, DataSource)> {
    let config = load_config(config_path)?;
    let source = data_source(&config, data, format);
    Ok((config, source))
}

pub fn open_dataset(source: &DataSource) -> Result<Dataset> {
    source
        .load()
        .with_context(|| format!("Failed to load shop data from {}", source.describe()))
}

pub fn parse_format(format: Option<&str>) -> Result<Option<DataFormat>> {
    format
        .map(|f| f.parse::<DataFormat>().map_err(anyhow::Error::msg))
        .transpose()
}

/// `--range` if given, else the configured default
pub fn parse_range(range: Option<&str>, default: DataRange) -> Result<DataRange> {
    match range {
        Some(r) => r.parse::<DataRange>().map_err(anyhow::Error::msg),
        None => Ok(default),
    }
}
