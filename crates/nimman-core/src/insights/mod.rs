//! Insight Engine - derived review insights
//!
//! Turns the raw metrics of a [`ShopRecord`](crate::models::ShopRecord) into
//! the labels, deltas and advice a dashboard shows:
//!
//! - **Weakest aspect** - lowest scoring aspect, ties broken by fixed order
//! - **Value tier** - HIGH_VALUE / MODERATE / LOW_VALUE from the Value score
//! - **Strategic recommendation** - prioritised advisory category
//! - **Sentiment delta** - direction of the sentiment trend
//!
//! ## Usage
//!
//! ```rust,ignore
//! use nimman_core::insights::InsightEngine;
//!
//! let engine = InsightEngine::new();
//! let insights = engine.analyze(&record)?;
//! ```

pub mod engine;
pub mod thresholds;
pub mod types;

pub use engine::InsightEngine;
pub use thresholds::Thresholds;
pub use types::{
    AspectScore, DeltaDirection, Recommendation, RecommendationCategory, SentimentDelta,
    Severity, ShopInsights, ValueTier,
};
