//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Nimman - Restaurant review insights
#[derive(Parser)]
#[command(name = "nimman")]
#[command(about = "Review-driven insights for Nimman restaurants", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Shop data file (json, toml, yaml or csv); built-in sample data if omitted
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Data file format (detected from the extension if not specified)
    #[arg(long, global = true)]
    pub format: Option<String>,

    /// Config file (defaults to the override in the data dir, then built-in defaults)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List shops with their headline insights
    Shops,

    /// Show the full report for one shop
    Show {
        /// Shop name, display name (e.g. "Shop A") or name prefix
        shop: String,

        /// Data range label: last-3-months, last-6-months, last-1-year
        #[arg(short, long)]
        range: Option<String>,
    },

    /// Load and validate a data file without analyzing it
    Validate {
        /// Data file to check
        file: PathBuf,
    },

    /// Show the effective configuration
    Config,

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Directory containing static files to serve (e.g., dashboard/dist)
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
}
