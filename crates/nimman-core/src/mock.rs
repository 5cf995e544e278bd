//! Built-in sample data
//!
//! Three Nimman shops used when no data file is configured. Stands in for
//! the output of the scraping and sentiment pipeline.

use crate::dataset::{fingerprint, Dataset};
use crate::error::Result;
use crate::models::{Aspect, PriceLevel, ShopRecord};

/// Origin label for datasets built from the sample data
pub const MOCK_ORIGIN: &str = "mock";

struct MockShop {
    name: &'static str,
    review_count: u32,
    rating: f64,
    sentiment_score: f64,
    sentiment_trend_pct: i32,
    price_level: PriceLevel,
    /// Food, Atmosphere, Service, Value
    aspects: [f64; 4],
    complaints: &'static [&'static str],
}

const MOCK_SHOPS: &[MockShop] = &[
    MockShop {
        name: "Shop A (Kua Gai Nimman)",
        review_count: 142,
        rating: 4.2,
        sentiment_score: 3.8,
        sentiment_trend_pct: -5,
        price_level: PriceLevel::Moderate,
        aspects: [4.5, 3.2, 2.1, 4.0],
        complaints: &[
            "Staff ignores customers",
            "Food served slowly",
            "No parking space",
        ],
    },
    MockShop {
        name: "Shop B (Khao Soi Mae Sai)",
        review_count: 320,
        rating: 4.8,
        sentiment_score: 4.6,
        sentiment_trend_pct: 12,
        price_level: PriceLevel::Inexpensive,
        aspects: [4.8, 4.0, 4.2, 4.9],
        complaints: &["Queue is too long", "Too spicy", "Crowded"],
    },
    MockShop {
        name: "Shop C (Tong Tem Toh)",
        review_count: 510,
        rating: 4.0,
        sentiment_score: 3.5,
        sentiment_trend_pct: -2,
        price_level: PriceLevel::Expensive,
        aspects: [4.1, 4.5, 3.0, 3.2],
        complaints: &["Expensive", "Small portion", "Loud music"],
    },
];

/// Sample shops in display order
pub fn mock_shops() -> Vec<ShopRecord> {
    MOCK_SHOPS
        .iter()
        .map(|m| ShopRecord {
            name: m.name.to_string(),
            review_count: m.review_count,
            rating: m.rating,
            sentiment_score: m.sentiment_score,
            sentiment_trend_pct: m.sentiment_trend_pct,
            price_level: m.price_level,
            aspects: Aspect::ALL.into_iter().zip(m.aspects).collect(),
            complaints: m.complaints.iter().map(|c| c.to_string()).collect(),
        })
        .collect()
}

/// Sample shops as a validated dataset
pub fn mock_dataset() -> Result<Dataset> {
    let shops = mock_shops();
    let content = serde_json::to_vec(&shops)?;
    Dataset::new(shops, MOCK_ORIGIN, fingerprint(&content))
}
