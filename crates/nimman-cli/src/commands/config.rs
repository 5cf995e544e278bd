//! Configuration display command

use anyhow::Result;
use nimman_core::config::default_config_path;
use nimman_core::insights::thresholds::{SERVICE_MARKET_BENCHMARK, SERVICE_VALUE_BETA};
use nimman_core::{AppConfig, DataSource};

pub fn cmd_config(config: &AppConfig, source: &DataSource, json: bool) -> Result<()> {
    let override_path = default_config_path();

    if json {
        let value = serde_json::json!({
            "config_file": config.source_path,
            "override_path": override_path,
            "data_source": source.describe(),
            "range": config.range,
            "thresholds": config.thresholds,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let t = &config.thresholds;

    println!();
    println!("⚙️  Nimman Configuration");
    println!("   ─────────────────────────────────────────────");
    match &config.source_path {
        Some(path) => println!("   Config file: {}", path.display()),
        None => println!("   Config file: (built-in defaults)"),
    }
    if let Some(path) = &override_path {
        println!("   Override path: {}", path.display());
    }
    println!("   Data source: {}", source.describe());
    println!("   Default range: {}", config.range);
    println!();
    println!("   Thresholds");
    println!("     High value:        Value ≥ {:.1}", t.high_value);
    println!("     Moderate value:    Value ≥ {:.1}", t.moderate_value);
    println!("     Critical service:  Service < {:.1}", t.critical_service);
    println!("     Food consistency:  Food < {:.1}", t.food_consistency);
    println!();
    println!(
        "   Service benchmark {:.1}, value weight (beta) {:.2}",
        SERVICE_MARKET_BENCHMARK, SERVICE_VALUE_BETA
    );
    println!();

    Ok(())
}
