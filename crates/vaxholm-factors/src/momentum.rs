//! 12-1 Month Momentum
//!
//! Price change from the oldest close in the window (about 12 months ago) to
//! the close about one month ago. The most recent month is skipped to avoid
//! the short-term reversal effect.

use crate::error::FactorError;
use crate::PriceFactor;
use serde::{Deserialize, Serialize};

/// Configuration for [`Momentum`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MomentumConfig {
    /// Minimum number of closes (default: 220)
    pub min_observations: usize,
    /// Observations counted back from the end to the "one month ago" close,
    /// including the latest one (default: 21)
    pub skip_days: usize,
}

impl Default for MomentumConfig {
    fn default() -> Self {
        Self {
            min_observations: 220,
            skip_days: 21,
        }
    }
}

/// 12-1 month price momentum, in percent.
#[derive(Debug, Default)]
pub struct Momentum {
    config: MomentumConfig,
}

impl Momentum {
    /// Create the factor with a custom configuration.
    pub const fn with_config(config: MomentumConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub const fn config(&self) -> &MomentumConfig {
        &self.config
    }
}

impl PriceFactor for Momentum {
    fn name(&self) -> &str {
        "momentum"
    }

    fn min_observations(&self) -> usize {
        self.config.min_observations.max(self.config.skip_days)
    }

    fn compute(&self, closes: &[f64]) -> Result<f64, FactorError> {
        let required = self.min_observations();
        if closes.len() < required || closes.is_empty() {
            return Err(FactorError::InsufficientData {
                factor: "momentum",
                required,
                actual: closes.len(),
            });
        }

        let price_12m = closes[0];
        if price_12m == 0.0 || !price_12m.is_finite() {
            return Err(FactorError::InvalidPrice {
                factor: "momentum",
                price: price_12m,
            });
        }

        let price_1m = closes[closes.len() - self.config.skip_days.max(1)];
        Ok((price_1m / price_12m - 1.0) * 100.0)
    }
}
