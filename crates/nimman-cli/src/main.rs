//! Nimman CLI - Restaurant review insights
//!
//! Usage:
//!   nimman shops                      List shops with headline insights
//!   nimman show "Shop A"              Full report for one shop
//!   nimman --data shops.csv shops     Use a data file instead of sample data
//!   nimman validate shops.toml        Check a data file
//!   nimman serve --port 3000          Start web server

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let format = commands::parse_format(cli.format.as_deref())?;

    match cli.command {
        Commands::Shops => {
            let (config, source) = commands::setup(cli.config.as_deref(), cli.data.as_deref(), format)?;
            let dataset = commands::open_dataset(&source)?;
            commands::cmd_shops(&dataset, &config.engine(), cli.json)
        }
        Commands::Show { shop, range } => {
            let (config, source) = commands::setup(cli.config.as_deref(), cli.data.as_deref(), format)?;
            let dataset = commands::open_dataset(&source)?;
            let range = commands::parse_range(range.as_deref(), config.range)?;
            commands::cmd_show(&dataset, &config.engine(), &shop, range, cli.json)
        }
        Commands::Validate { file } => commands::cmd_validate(&file, format, cli.json),
        Commands::Config => {
            let (config, source) = commands::setup(cli.config.as_deref(), cli.data.as_deref(), format)?;
            commands::cmd_config(&config, &source, cli.json)
        }
        Commands::Serve {
            port,
            host,
            static_dir,
        } => {
            let (config, source) = commands::setup(cli.config.as_deref(), cli.data.as_deref(), format)?;
            commands::cmd_serve(&config, source, &host, port, static_dir.as_deref()).await
        }
    }
}
