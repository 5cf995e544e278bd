//! Insight Engine - derives display-ready insights from a shop record

use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{Aspect, ShopRecord};

use super::thresholds::Thresholds;
use super::types::{
    AspectScore, DeltaDirection, Recommendation, RecommendationCategory, SentimentDelta,
    ShopInsights, ValueTier,
};

/// Stateless rule evaluator
///
/// Every operation is a pure function of the record and the thresholds the
/// engine was built with; calling one twice on the same record gives the
/// same answer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InsightEngine {
    thresholds: Thresholds,
}

impl InsightEngine {
    /// Create an engine with the default thresholds
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with custom thresholds
    pub fn with_thresholds(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Aspect with the lowest score; ties go to the earliest in [`Aspect::ALL`]
    pub fn weakest_aspect(&self, record: &ShopRecord) -> Result<AspectScore> {
        let mut weakest: Option<AspectScore> = None;

        for (aspect, score) in record.aspects.iter() {
            match weakest {
                Some(current) if score >= current.score => {}
                _ => weakest = Some(AspectScore { aspect, score }),
            }
        }

        weakest.ok_or_else(|| Error::EmptyAspectSet(record.name.clone()))
    }

    /// Classify the Value aspect; lower bounds are inclusive
    pub fn value_tier(&self, record: &ShopRecord) -> Result<ValueTier> {
        let value = record.aspect(Aspect::Value)?;

        let tier = if value >= self.thresholds.high_value {
            ValueTier::HighValue
        } else if value >= self.thresholds.moderate_value {
            ValueTier::Moderate
        } else {
            ValueTier::LowValue
        };

        Ok(tier)
    }

    /// First matching rule wins: critical service, then food consistency,
    /// then price premium.
    pub fn strategic_recommendation(&self, record: &ShopRecord) -> Result<Recommendation> {
        let service = record.aspect(Aspect::Service)?;
        if service < self.thresholds.critical_service {
            return Ok(Recommendation::new(
                RecommendationCategory::CriticalService,
                Some((Aspect::Service, service).into()),
            ));
        }

        let food = record.aspect(Aspect::Food)?;
        if food < self.thresholds.food_consistency {
            return Ok(Recommendation::new(
                RecommendationCategory::FoodConsistencyWarning,
                Some((Aspect::Food, food).into()),
            ));
        }

        Ok(Recommendation::new(
            RecommendationCategory::ExcellentPricePremium,
            None,
        ))
    }

    /// UP only for a strictly positive trend
    pub fn sentiment_delta_direction(&self, record: &ShopRecord) -> DeltaDirection {
        if record.sentiment_trend_pct > 0 {
            DeltaDirection::Up
        } else {
            DeltaDirection::Down
        }
    }

    /// Run every rule for one render
    pub fn analyze(&self, record: &ShopRecord) -> Result<ShopInsights> {
        let weakest_aspect = self.weakest_aspect(record)?;
        let value_tier = self.value_tier(record)?;
        let recommendation = self.strategic_recommendation(record)?;
        let sentiment = SentimentDelta {
            direction: self.sentiment_delta_direction(record),
            trend_pct: record.sentiment_trend_pct,
        };

        debug!(
            shop = %record.name,
            weakest = weakest_aspect.aspect.as_str(),
            value_tier = value_tier.as_str(),
            recommendation = recommendation.category.as_str(),
            "Insight analysis complete"
        );

        Ok(ShopInsights {
            shop: record.name.clone(),
            weakest_aspect,
            value_tier,
            value_severity: value_tier.severity(),
            recommendation,
            sentiment,
        })
    }
}
