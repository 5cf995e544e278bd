//! Decision thresholds for the insight rules
//!
//! The constants are the calibrated defaults. [`Thresholds`] carries the
//! values actually used by an engine so they can be overridden from config
//! without touching the rules themselves.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{MAX_SCORE, MIN_SCORE};

/// Value score at or above which a shop is HIGH_VALUE
pub const HIGH_VALUE_THRESHOLD: f64 = 4.0;

/// Value score at or above which a shop is at least MODERATE
pub const MODERATE_VALUE_THRESHOLD: f64 = 3.0;

/// Service score below which service needs critical attention
pub const CRITICAL_SERVICE_THRESHOLD: f64 = 3.0;

/// Food score below which food consistency is flagged
pub const FOOD_CONSISTENCY_THRESHOLD: f64 = 4.0;

/// Market average service score quoted in the critical-service advisory
pub const SERVICE_MARKET_BENCHMARK: f64 = 3.5;

/// Estimated weight of service on perceived value (hedonic pricing beta)
pub const SERVICE_VALUE_BETA: f64 = 0.45;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub high_value: f64,
    pub moderate_value: f64,
    pub critical_service: f64,
    pub food_consistency: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            high_value: HIGH_VALUE_THRESHOLD,
            moderate_value: MODERATE_VALUE_THRESHOLD,
            critical_service: CRITICAL_SERVICE_THRESHOLD,
            food_consistency: FOOD_CONSISTENCY_THRESHOLD,
        }
    }
}

impl Thresholds {
    /// Reject thresholds outside the score range or with inverted value tiers
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("high_value", self.high_value),
            ("moderate_value", self.moderate_value),
            ("critical_service", self.critical_service),
            ("food_consistency", self.food_consistency),
        ];
        for (name, value) in fields {
            if !(MIN_SCORE..=MAX_SCORE).contains(&value) {
                return Err(Error::Config(format!(
                    "threshold {} = {} is outside [{}, {}]",
                    name, value, MIN_SCORE, MAX_SCORE
                )));
            }
        }

        if self.moderate_value > self.high_value {
            return Err(Error::Config(format!(
                "moderate_value ({}) must not exceed high_value ({})",
                self.moderate_value, self.high_value
            )));
        }

        Ok(())
    }
}
