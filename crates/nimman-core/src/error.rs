//! Error types for Nimman

use thiserror::Error;

use crate::models::Aspect;

/// A shop record that violates the data-model constraints.
///
/// Raised by the loaders before a record can reach the insight engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("shop name must not be empty")]
    EmptyName,

    #[error("duplicate shop name: {0}")]
    DuplicateName(String),

    #[error("{shop}: {field} = {value} is outside [0.0, 5.0]")]
    ScoreOutOfRange {
        shop: String,
        field: String,
        value: f64,
    },

    #[error("{shop}: review count must be >= 0, got {value}")]
    NegativeReviewCount { shop: String, value: i64 },

    #[error("{shop}: review count {value} is too large")]
    ReviewCountTooLarge { shop: String, value: i64 },

    #[error("{shop}: missing aspect {aspect}")]
    MissingAspect { shop: String, aspect: Aspect },

    #[error("{shop}: aspect {aspect} given more than once")]
    DuplicateAspect { shop: String, aspect: Aspect },

    #[error("{shop}: unknown aspect '{name}'")]
    UnknownAspect { shop: String, name: String },

    #[error("{shop}: unknown price tier '{value}'")]
    UnknownPriceTier { shop: String, value: String },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Shop '{0}' has no aspect scores")]
    EmptyAspectSet(String),

    #[error("Shop '{shop}' has no {aspect} score")]
    MissingAspect { shop: String, aspect: Aspect },

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Import error: {0}")]
    Import(String),

    #[error("Unsupported data format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid config: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Ambiguous shop '{query}', matches: {}", .matches.join(", "))]
    AmbiguousShop { query: String, matches: Vec<String> },
}

pub type Result<T> = std::result::Result<T, Error>;
