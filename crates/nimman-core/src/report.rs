//! Display-ready shop reports
//!
//! A [`ShopReport`] is everything a dashboard needs to render one shop:
//! headline metrics, the aspect series for bar/radar charts, numbered
//! complaints and the derived insights.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::insights::{AspectScore, InsightEngine, ShopInsights};
use crate::models::{PriceLevel, ShopRecord};

/// Observation window label shown alongside a report
///
/// Selecting a range does not filter the data; the loaded dataset already
/// covers one window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DataRange {
    #[serde(rename = "last-3-months")]
    Last3Months,
    #[serde(rename = "last-6-months")]
    Last6Months,
    #[default]
    #[serde(rename = "last-1-year")]
    Last1Year,
}

impl DataRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Last3Months => "last-3-months",
            Self::Last6Months => "last-6-months",
            Self::Last1Year => "last-1-year",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Last3Months => "Last 3 Months",
            Self::Last6Months => "Last 6 Months",
            Self::Last1Year => "Last 1 Year",
        }
    }
}

impl std::str::FromStr for DataRange {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "last-3-months" | "3m" => Ok(Self::Last3Months),
            "last-6-months" | "6m" => Ok(Self::Last6Months),
            "last-1-year" | "last-12-months" | "1y" => Ok(Self::Last1Year),
            _ => Err(format!(
                "Unknown data range: {}. Available: last-3-months, last-6-months, last-1-year",
                s
            )),
        }
    }
}

impl std::fmt::Display for DataRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry of the customer-voice list, numbered from 1
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Complaint {
    pub index: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopReport {
    pub shop: String,
    pub display_name: String,
    pub price_level: PriceLevel,
    pub review_count: u32,
    pub rating: f64,
    pub sentiment_score: f64,
    /// Fixed aspect order
    pub aspects: Vec<AspectScore>,
    pub complaints: Vec<Complaint>,
    pub insights: ShopInsights,
    pub data_range: DataRange,
    pub generated_at: DateTime<Utc>,
}

impl ShopReport {
    pub fn build(engine: &InsightEngine, record: &ShopRecord, range: DataRange) -> Result<Self> {
        let insights = engine.analyze(record)?;

        Ok(Self {
            shop: record.name.clone(),
            display_name: record.display_name().to_string(),
            price_level: record.price_level,
            review_count: record.review_count,
            rating: record.rating,
            sentiment_score: record.sentiment_score,
            aspects: record.aspects.iter().map(AspectScore::from).collect(),
            complaints: record
                .complaints
                .iter()
                .enumerate()
                .map(|(i, text)| Complaint {
                    index: i + 1,
                    text: text.clone(),
                })
                .collect(),
            insights,
            data_range: range,
            generated_at: Utc::now(),
        })
    }
}
