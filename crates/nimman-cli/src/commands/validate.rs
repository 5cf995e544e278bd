//! Data file validation command

use std::path::Path;

use anyhow::{Context, Result};
use nimman_core::{import, DataFormat};

pub fn cmd_validate(file: &Path, format: Option<DataFormat>, json: bool) -> Result<()> {
    let dataset = import::load_file(file, format)
        .with_context(|| format!("Validation failed for {}", file.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&dataset.info())?);
        return Ok(());
    }

    println!("✅ {} is valid", file.display());
    println!("   Shops: {}", dataset.len());
    println!("   Fingerprint: {}", dataset.fingerprint());
    for name in dataset.names() {
        println!("   • {}", name);
    }

    Ok(())
}
