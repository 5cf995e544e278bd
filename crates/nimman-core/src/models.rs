//! Domain models for Nimman

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result, ValidationError};

/// Lowest score any rating, sentiment or aspect may take
pub const MIN_SCORE: f64 = 0.0;

/// Highest score any rating, sentiment or aspect may take
pub const MAX_SCORE: f64 = 5.0;

/// One rated dimension of a restaurant experience
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Aspect {
    Food,
    Atmosphere,
    Service,
    Value,
}

impl Aspect {
    /// Fixed display and tie-break order
    pub const ALL: [Aspect; 4] = [
        Aspect::Food,
        Aspect::Atmosphere,
        Aspect::Service,
        Aspect::Value,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Atmosphere => "Atmosphere",
            Self::Service => "Service",
            Self::Value => "Value",
        }
    }
}

impl std::str::FromStr for Aspect {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "food" => Ok(Self::Food),
            "atmosphere" => Ok(Self::Atmosphere),
            "service" => Ok(Self::Service),
            "value" => Ok(Self::Value),
            _ => Err(format!("Unknown aspect: {}", s)),
        }
    }
}

impl std::fmt::Display for Aspect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ordinal price tier, written with the kip sign
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PriceLevel {
    #[serde(rename = "₭")]
    Inexpensive,
    #[serde(rename = "₭₭")]
    Moderate,
    #[serde(rename = "₭₭₭")]
    Expensive,
}

impl PriceLevel {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Inexpensive => "₭",
            Self::Moderate => "₭₭",
            Self::Expensive => "₭₭₭",
        }
    }

    /// Tier number, 1 (cheapest) to 3
    pub fn tier(&self) -> u8 {
        match self {
            Self::Inexpensive => 1,
            Self::Moderate => 2,
            Self::Expensive => 3,
        }
    }
}

impl std::str::FromStr for PriceLevel {
    type Err = String;

    /// Accepts the kip symbols, the baht spelling used by older exports, or the
    /// tier number.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "₭" | "฿" | "1" => Ok(Self::Inexpensive),
            "₭₭" | "฿฿" | "2" => Ok(Self::Moderate),
            "₭₭₭" | "฿฿฿" | "3" => Ok(Self::Expensive),
            _ => Err(format!("Unknown price level: {}", s)),
        }
    }
}

impl std::fmt::Display for PriceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Per-aspect scores for one shop
///
/// Lookups go through [`Aspect`]; iteration always follows [`Aspect::ALL`]
/// regardless of how the scores were inserted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AspectScores(BTreeMap<Aspect, f64>);

impl AspectScores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, aspect: Aspect, score: f64) -> Option<f64> {
        self.0.insert(aspect, score)
    }

    pub fn get(&self, aspect: Aspect) -> Option<f64> {
        self.0.get(&aspect).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Present scores in fixed aspect order
    pub fn iter(&self) -> impl Iterator<Item = (Aspect, f64)> + '_ {
        Aspect::ALL
            .into_iter()
            .filter_map(|aspect| self.get(aspect).map(|score| (aspect, score)))
    }
}

impl FromIterator<(Aspect, f64)> for AspectScores {
    fn from_iter<I: IntoIterator<Item = (Aspect, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Review metrics for one restaurant
///
/// Built by the loaders in [`crate::import`] and [`crate::mock`], which run
/// [`ShopRecord::validate`] before handing a record out. Records are shared
/// read-only through [`crate::dataset::Dataset`] snapshots.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShopRecord {
    /// Unique identifier, e.g. "Shop A (Kua Gai Nimman)"
    pub name: String,
    pub review_count: u32,
    /// Google-style star rating
    pub rating: f64,
    /// Model-derived sentiment score
    pub sentiment_score: f64,
    /// Signed percentage change in sentiment vs. the prior period
    pub sentiment_trend_pct: i32,
    pub price_level: PriceLevel,
    pub aspects: AspectScores,
    /// Display order = insertion order
    pub complaints: Vec<String>,
}

impl ShopRecord {
    /// Score for a single aspect
    pub fn aspect(&self, aspect: Aspect) -> Result<f64> {
        self.aspects.get(aspect).ok_or_else(|| Error::MissingAspect {
            shop: self.name.clone(),
            aspect,
        })
    }

    /// Name without the parenthesised suffix ("Shop A (Kua Gai Nimman)" -> "Shop A")
    pub fn display_name(&self) -> &str {
        let head = self.name.split('(').next().unwrap_or(&self.name).trim();
        if head.is_empty() {
            self.name.trim()
        } else {
            head
        }
    }

    /// Check every data-model constraint
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }

        self.check_score("rating", self.rating)?;
        self.check_score("sentiment_score", self.sentiment_score)?;

        for aspect in Aspect::ALL {
            match self.aspects.get(aspect) {
                Some(score) => self.check_score(aspect.as_str(), score)?,
                None => {
                    return Err(ValidationError::MissingAspect {
                        shop: self.name.clone(),
                        aspect,
                    })
                }
            }
        }

        Ok(())
    }

    fn check_score(&self, field: &str, value: f64) -> std::result::Result<(), ValidationError> {
        // NaN fails the range check too
        if (MIN_SCORE..=MAX_SCORE).contains(&value) {
            Ok(())
        } else {
            Err(ValidationError::ScoreOutOfRange {
                shop: self.name.clone(),
                field: field.to_string(),
                value,
            })
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::str::FromStr;

    pub(crate) fn record_with(aspects: &[(Aspect, f64)]) -> ShopRecord {
        ShopRecord {
            name: "Test Shop (Nimman Soi 1)".to_string(),
            review_count: 10,
            rating: 4.0,
            sentiment_score: 3.5,
            sentiment_trend_pct: 3,
            price_level: PriceLevel::Moderate,
            aspects: aspects.iter().copied().collect(),
            complaints: vec!["Slow".to_string(), "Noisy".to_string()],
        }
    }

    fn full_record() -> ShopRecord {
        record_with(&[
            (Aspect::Food, 4.5),
            (Aspect::Atmosphere, 3.2),
            (Aspect::Service, 2.1),
            (Aspect::Value, 4.0),
        ])
    }

    #[test]
    fn test_aspect_from_str() {
        assert_eq!(Aspect::from_str("food").unwrap(), Aspect::Food);
        assert_eq!(Aspect::from_str(" SERVICE ").unwrap(), Aspect::Service);
        assert!(Aspect::from_str("parking").is_err());
    }

    #[test]
    fn test_price_level_aliases() {
        assert_eq!(PriceLevel::from_str("₭").unwrap(), PriceLevel::Inexpensive);
        assert_eq!(PriceLevel::from_str("฿฿").unwrap(), PriceLevel::Moderate);
        assert_eq!(PriceLevel::from_str("3").unwrap(), PriceLevel::Expensive);
        assert!(PriceLevel::from_str("₭₭₭₭").is_err());
        assert!(PriceLevel::Inexpensive < PriceLevel::Expensive);
    }

    #[test]
    fn test_price_level_serializes_as_symbol() {
        let json = serde_json::to_string(&PriceLevel::Expensive).unwrap();
        assert_eq!(json, "\"₭₭₭\"");
    }

    #[test]
    fn test_aspect_scores_iterate_in_fixed_order() {
        let scores: AspectScores = [
            (Aspect::Value, 1.0),
            (Aspect::Food, 2.0),
            (Aspect::Service, 3.0),
        ]
        .into_iter()
        .collect();

        let order: Vec<Aspect> = scores.iter().map(|(a, _)| a).collect();
        assert_eq!(order, vec![Aspect::Food, Aspect::Service, Aspect::Value]);
    }

    #[test]
    fn test_display_name() {
        let record = full_record();
        assert_eq!(record.display_name(), "Test Shop");

        let mut plain = full_record();
        plain.name = "Plain Name".to_string();
        assert_eq!(plain.display_name(), "Plain Name");

        let mut leading = full_record();
        leading.name = "(Only Parens)".to_string();
        assert_eq!(leading.display_name(), "(Only Parens)");
    }

    #[test]
    fn test_validate_accepts_full_record() {
        assert!(full_record().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range_and_nan() {
        let mut record = full_record();
        record.rating = 5.1;
        assert!(matches!(
            record.validate(),
            Err(ValidationError::ScoreOutOfRange { ref field, .. }) if field == "rating"
        ));

        let mut record = full_record();
        record.aspects.insert(Aspect::Atmosphere, f64::NAN);
        assert!(matches!(
            record.validate(),
            Err(ValidationError::ScoreOutOfRange { ref field, .. }) if field == "Atmosphere"
        ));
    }

    #[test]
    fn test_validate_rejects_missing_aspect_and_empty_name() {
        let record = record_with(&[(Aspect::Food, 4.0)]);
        assert!(matches!(
            record.validate(),
            Err(ValidationError::MissingAspect {
                aspect: Aspect::Atmosphere,
                ..
            })
        ));

        let mut record = full_record();
        record.name = "   ".to_string();
        assert_eq!(record.validate(), Err(ValidationError::EmptyName));
    }

    #[test]
    fn test_aspect_accessor_reports_missing() {
        let record = record_with(&[(Aspect::Food, 4.0)]);
        assert_eq!(record.aspect(Aspect::Food).unwrap(), 4.0);
        assert!(matches!(
            record.aspect(Aspect::Value),
            Err(Error::MissingAspect {
                aspect: Aspect::Value,
                ..
            })
        ));
    }
}
