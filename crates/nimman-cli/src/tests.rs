//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::fs;
use std::path::PathBuf;

use nimman_core::{
    mock::mock_dataset, AppConfig, DataFormat, DataRange, DataSource, InsightEngine, ShopReport,
};

use crate::commands::{self, truncate};

const SHOPS_TOML: &str = r#"
[[shops]]
name = "Shop D (Soi 13)"
reviews = 64
rating = 4.4
sentiment_score = 4.0
sentiment_trend = 7
price_level = "₭"
complaints = ["Few seats"]

[shops.aspects]
food = 3.8
atmosphere = 4.6
service = 4.1
value = 4.2
"#;

fn write_temp(name: &str, content: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    (dir, path)
}

// ========== Helper Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("Shop A", 10), "Shop A");
    assert_eq!(truncate("Shop A (Kua Gai Nimman)", 10), "Shop A ...");
    // Character based, never splits a multi-byte character
    assert_eq!(truncate("ข้าวซอยแม่สาย", 6).chars().count(), 6);
}

#[test]
fn test_parse_format() {
    assert_eq!(commands::parse_format(None).unwrap(), None);
    assert_eq!(
        commands::parse_format(Some("yml")).unwrap(),
        Some(DataFormat::Yaml)
    );
    assert!(commands::parse_format(Some("xlsx")).is_err());
}

#[test]
fn test_parse_range() {
    assert_eq!(
        commands::parse_range(None, DataRange::Last6Months).unwrap(),
        DataRange::Last6Months
    );
    assert_eq!(
        commands::parse_range(Some("3m"), DataRange::Last1Year).unwrap(),
        DataRange::Last3Months
    );
    assert!(commands::parse_range(Some("forever"), DataRange::Last1Year).is_err());
}

#[test]
fn test_data_source_selection() {
    let config = AppConfig::default();
    assert_eq!(commands::data_source(&config, None, None), DataSource::Mock);

    let flag = PathBuf::from("flag.csv");
    assert_eq!(
        commands::data_source(&config, Some(flag.as_path()), Some(DataFormat::Csv)),
        DataSource::File {
            path: flag.clone(),
            format: Some(DataFormat::Csv),
        }
    );

    // --data wins over the configured path
    let configured = AppConfig {
        data_path: Some(PathBuf::from("configured.toml")),
        ..Default::default()
    };
    assert_eq!(
        commands::data_source(&configured, Some(flag.as_path()), None),
        DataSource::file(&flag)
    );
    assert_eq!(
        commands::data_source(&configured, None, None),
        DataSource::file("configured.toml")
    );
}

#[test]
fn test_load_config_from_file() {
    let (_dir, path) = write_temp("insights.toml", "[thresholds]\nfood_consistency = 3.5\n");
    let config = commands::load_config(Some(path.as_path())).unwrap();
    assert_eq!(config.thresholds.food_consistency, 3.5);

    let missing = path.with_file_name("missing.toml");
    let err = commands::load_config(Some(missing.as_path())).unwrap_err();
    assert!(err.to_string().contains("missing.toml"));
}

// ========== Command Tests ==========

#[test]
fn test_cmd_shops() {
    let dataset = mock_dataset().unwrap();
    assert!(commands::cmd_shops(&dataset, &InsightEngine::new(), false).is_ok());
    assert!(commands::cmd_shops(&dataset, &InsightEngine::new(), true).is_ok());
}

#[test]
fn test_render_shop_table() {
    let dataset = mock_dataset().unwrap();
    let engine = InsightEngine::new();
    let rows: Vec<_> = dataset
        .shops()
        .iter()
        .map(|s| engine.analyze(s).unwrap())
        .collect();

    let table = commands::render_shop_table(&dataset, &rows);
    assert!(table.contains("Shop A (Kua Gai Nimman)"));
    assert!(table.contains("Service 2.1"));
    assert!(table.contains("▲ +12%"));
    assert!(table.contains("▼ -2%"));
}

#[test]
fn test_cmd_show() {
    let dataset = mock_dataset().unwrap();
    let engine = InsightEngine::new();

    assert!(commands::cmd_show(&dataset, &engine, "shop a", DataRange::default(), false).is_ok());
    assert!(commands::cmd_show(&dataset, &engine, "Shop B", DataRange::Last3Months, true).is_ok());
}

#[test]
fn test_cmd_show_unknown_and_ambiguous() {
    let dataset = mock_dataset().unwrap();
    let engine = InsightEngine::new();

    let err = commands::cmd_show(&dataset, &engine, "Shop Q", DataRange::default(), false)
        .unwrap_err();
    assert!(err.to_string().contains("Shop Q"));

    let err =
        commands::cmd_show(&dataset, &engine, "shop", DataRange::default(), false).unwrap_err();
    assert!(err.to_string().contains("Ambiguous"));
}

#[test]
fn test_render_report() {
    let dataset = mock_dataset().unwrap();
    let shop = dataset.resolve("Shop A").unwrap();
    let report = ShopReport::build(&InsightEngine::new(), shop, DataRange::Last6Months).unwrap();

    let text = commands::render_report(&report);
    assert!(text.contains("Critical action required: improve service"));
    assert!(text.contains("currently scores 2.1"));
    assert!(text.contains("← weakest"));
    assert!(text.contains("Last 6 Months"));
    assert!(text.contains("3. No parking space"));
    assert!(text.contains("▼ -5%"));
}

#[test]
fn test_cmd_validate() {
    let (_dir, path) = write_temp("shops.toml", SHOPS_TOML);
    assert!(commands::cmd_validate(&path, None, false).is_ok());
    assert!(commands::cmd_validate(&path, Some(DataFormat::Toml), true).is_ok());
}

#[test]
fn test_cmd_validate_rejects_bad_file() {
    let broken = SHOPS_TOML.replace("price_level = \"₭\"", "price_level = \"$$\"");
    let (_dir, path) = write_temp("shops.toml", &broken);

    let err = commands::cmd_validate(&path, None, false).unwrap_err();
    assert!(err.to_string().contains("Validation failed"));
    assert!(format!("{:#}", err).contains("unknown price tier"));
}

#[test]
fn test_cmd_config() {
    let config = AppConfig::default();
    assert!(commands::cmd_config(&config, &DataSource::Mock, false).is_ok());
    assert!(commands::cmd_config(&config, &DataSource::Mock, true).is_ok());
}

#[test]
fn test_setup_with_configured_data_file() {
    let (dir, data_path) = write_temp("shops.toml", SHOPS_TOML);
    let config_path = dir.path().join("insights.toml");
    fs::write(&config_path, "[data]\npath = \"shops.toml\"\nrange = \"6m\"\n").unwrap();

    let (config, source) = commands::setup(Some(config_path.as_path()), None, None).unwrap();
    assert_eq!(config.range, DataRange::Last6Months);
    assert_eq!(source, DataSource::file(&data_path));

    let dataset = commands::open_dataset(&source).unwrap();
    assert_eq!(dataset.len(), 1);
    assert!(commands::cmd_show(&dataset, &config.engine(), "Shop D", config.range, false).is_ok());
}

#[test]
fn test_open_dataset_error_names_source() {
    let source = DataSource::file("/nonexistent/shops.csv");
    let err = commands::open_dataset(&source).unwrap_err();
    assert!(err.to_string().contains("/nonexistent/shops.csv"));
}
