//! Core types for the Insight Engine

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::Aspect;

use super::thresholds::{SERVICE_MARKET_BENCHMARK, SERVICE_VALUE_BETA};

/// Three-level classification of perceived price-to-quality fit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueTier {
    HighValue,
    Moderate,
    LowValue,
}

impl ValueTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueTier::HighValue => "HIGH_VALUE",
            ValueTier::Moderate => "MODERATE",
            ValueTier::LowValue => "LOW_VALUE",
        }
    }

    /// Human-readable label for status badges
    pub fn label(&self) -> &'static str {
        match self {
            ValueTier::HighValue => "High value",
            ValueTier::Moderate => "Moderate",
            ValueTier::LowValue => "Low value",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            ValueTier::HighValue => Severity::Info,
            ValueTier::Moderate => Severity::Warning,
            ValueTier::LowValue => Severity::Alert,
        }
    }
}

impl fmt::Display for ValueTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ValueTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "HIGH_VALUE" => Ok(ValueTier::HighValue),
            "MODERATE" => Ok(ValueTier::Moderate),
            "LOW_VALUE" => Ok(ValueTier::LowValue),
            _ => Err(format!("Unknown value tier: {}", s)),
        }
    }
}

/// Direction of the sentiment trend arrow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeltaDirection {
    Up,
    /// Also used for a flat (0%) trend
    Down,
}

impl DeltaDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeltaDirection::Up => "UP",
            DeltaDirection::Down => "DOWN",
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            DeltaDirection::Up => "▲",
            DeltaDirection::Down => "▼",
        }
    }
}

impl fmt::Display for DeltaDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Severity level of an insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Informational - no action needed
    Info,
    /// Should be addressed soon
    Warning,
    /// Requires immediate attention
    Alert,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Alert => "alert",
        }
    }

    /// Numeric priority for sorting (higher = more urgent)
    pub fn priority(&self) -> u8 {
        match self {
            Severity::Info => 1,
            Severity::Warning => 2,
            Severity::Alert => 3,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Strategic advice category, evaluated in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendationCategory {
    CriticalService,
    FoodConsistencyWarning,
    ExcellentPricePremium,
}

impl RecommendationCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CriticalService => "CRITICAL_SERVICE",
            Self::FoodConsistencyWarning => "FOOD_CONSISTENCY_WARNING",
            Self::ExcellentPricePremium => "EXCELLENT_PRICE_PREMIUM",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::CriticalService => Severity::Alert,
            Self::FoodConsistencyWarning => Severity::Warning,
            Self::ExcellentPricePremium => Severity::Info,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::CriticalService => "Critical action required: improve service",
            Self::FoodConsistencyWarning => "Warning: food consistency",
            Self::ExcellentPricePremium => "Excellent performance",
        }
    }

    /// Advisory body; `{score}` is replaced with the triggering score
    pub fn template(&self) -> &'static str {
        match self {
            Self::CriticalService => {
                "Service carries the strongest weight on perceived value (beta {beta}) \
                 but currently scores {score}, below the market benchmark of {benchmark}."
            }
            Self::FoodConsistencyWarning => {
                "Customers are starting to report inconsistent taste. \
                 Review quality control in the kitchen."
            }
            Self::ExcellentPricePremium => {
                "The shop performs very well. A price premium of 5-10% can be \
                 considered given the high value score."
            }
        }
    }

    pub fn actions(&self) -> &'static [&'static str] {
        match self {
            Self::CriticalService => &[
                "Add staff during peak hours (18:00 - 20:00)",
                "Rework the queue system to reduce waiting frustration",
            ],
            Self::FoodConsistencyWarning => &["Audit kitchen quality control"],
            Self::ExcellentPricePremium => &["Consider raising prices by 5-10%"],
        }
    }
}

impl fmt::Display for RecommendationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RecommendationCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "CRITICAL_SERVICE" => Ok(Self::CriticalService),
            "FOOD_CONSISTENCY_WARNING" => Ok(Self::FoodConsistencyWarning),
            "EXCELLENT_PRICE_PREMIUM" => Ok(Self::ExcellentPricePremium),
            _ => Err(format!("Unknown recommendation category: {}", s)),
        }
    }
}

/// A single aspect with its score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectScore {
    pub aspect: Aspect,
    pub score: f64,
}

impl From<(Aspect, f64)> for AspectScore {
    fn from((aspect, score): (Aspect, f64)) -> Self {
        Self { aspect, score }
    }
}

/// A rendered strategic recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: RecommendationCategory,
    pub severity: Severity,
    pub title: String,
    pub message: String,
    pub actions: Vec<String>,
    /// The score that selected this category, when a rule fired on one
    pub trigger: Option<AspectScore>,
}

impl Recommendation {
    pub fn new(category: RecommendationCategory, trigger: Option<AspectScore>) -> Self {
        let score = trigger
            .map(|t| t.score.to_string())
            .unwrap_or_default();
        let message = category
            .template()
            .replace("{score}", &score)
            .replace("{beta}", &format!("{:.2}", SERVICE_VALUE_BETA))
            .replace("{benchmark}", &format!("{:.1}", SERVICE_MARKET_BENCHMARK));

        Self {
            category,
            severity: category.severity(),
            title: category.title().to_string(),
            message,
            actions: category.actions().iter().map(|a| a.to_string()).collect(),
            trigger,
        }
    }
}

/// Sentiment trend with its display direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentDelta {
    pub direction: DeltaDirection,
    pub trend_pct: i32,
}

/// Everything the engine derives for one shop in one render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopInsights {
    pub shop: String,
    pub weakest_aspect: AspectScore,
    pub value_tier: ValueTier,
    pub value_severity: Severity,
    pub recommendation: Recommendation,
    pub sentiment: SentimentDelta,
}
