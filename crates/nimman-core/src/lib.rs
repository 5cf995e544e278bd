//! Nimman Core Library
//!
//! Shared functionality for the Nimman restaurant review dashboard:
//! - Shop records with per-aspect sentiment scores
//! - Data loaders for JSON, TOML, YAML and CSV shop files
//! - Insight engine (weakest aspect, value tier, recommendation, trend)
//! - Refreshable dataset snapshots
//! - Display-ready shop reports
//! - Threshold and data source configuration

pub mod config;
pub mod dataset;
pub mod error;
pub mod import;
pub mod insights;
pub mod mock;
pub mod models;
pub mod report;
pub mod store;

pub use config::AppConfig;
pub use dataset::{Dataset, DatasetInfo};
pub use error::{Error, Result, ValidationError};
pub use import::DataFormat;
pub use insights::{
    AspectScore, DeltaDirection, InsightEngine, Recommendation, RecommendationCategory,
    SentimentDelta, Severity, ShopInsights, Thresholds, ValueTier,
};
pub use models::{Aspect, AspectScores, PriceLevel, ShopRecord};
pub use report::{Complaint, DataRange, ShopReport};
pub use store::{DataSource, DataStore, RefreshOutcome};
