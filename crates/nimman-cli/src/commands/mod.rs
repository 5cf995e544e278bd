//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (config loading, data source selection)
//! - `config` - Effective configuration display
//! - `serve` - Web server command
//! - `shops` - Shop listing and single-shop reports
//! - `validate` - Data file validation

pub mod config;
pub mod core;
pub mod serve;
pub mod shops;
pub mod validate;

// Re-export command functions for main.rs
pub use config::*;
pub use core::*;
pub use serve::*;
pub use shops::*;
pub use validate::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
