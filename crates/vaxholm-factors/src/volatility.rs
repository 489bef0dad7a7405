//! Historical Volatility
//!
//! Annualized standard deviation of daily simple returns over the whole
//! supplied window, expressed in percent. Lower volatility securities tend to
//! exhibit better risk-adjusted returns (the low-volatility anomaly).

use crate::error::FactorError;
use crate::math::sample_std;
use crate::PriceFactor;
use serde::{Deserialize, Serialize};

/// Configuration for [`HistoricalVolatility`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricalVolatilityConfig {
    /// Minimum number of valid daily returns (default: 50)
    pub min_returns: usize,
    /// Trading days per year used for annualization (default: 252)
    pub trading_days: f64,
}

impl Default for HistoricalVolatilityConfig {
    fn default() -> Self {
        Self {
            min_returns: 50,
            trading_days: 252.0,
        }
    }
}

/// Annualized volatility of daily returns, in percent.
#[derive(Debug, Default)]
pub struct HistoricalVolatility {
    config: HistoricalVolatilityConfig,
}

impl HistoricalVolatility {
    /// Create the factor with a custom configuration.
    pub const fn with_config(config: HistoricalVolatilityConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub const fn config(&self) -> &HistoricalVolatilityConfig {
        &self.config
    }
}

/// Daily simple returns of consecutive closes; non-finite returns are dropped.
pub fn daily_returns(closes: &[f64]) -> Vec<f64> {
    closes
        .windows(2)
        .map(|pair| pair[1] / pair[0] - 1.0)
        .filter(|r| r.is_finite())
        .collect()
}

impl PriceFactor for HistoricalVolatility {
    fn name(&self) -> &str {
        "volatility"
    }

    fn min_observations(&self) -> usize {
        self.config.min_returns + 1
    }

    fn compute(&self, closes: &[f64]) -> Result<f64, FactorError> {
        let returns = daily_returns(closes);
        let insufficient = FactorError::InsufficientData {
            factor: "volatility",
            required: self.config.min_returns,
            actual: returns.len(),
        };

        if returns.len() < self.config.min_returns {
            return Err(insufficient);
        }

        let std = sample_std(&returns).ok_or(insufficient)?;
        Ok(std * self.config.trading_days.sqrt() * 100.0)
    }
}
