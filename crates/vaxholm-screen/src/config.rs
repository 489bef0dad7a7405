//! Screen configuration.

use crate::error::ScreenError;
use serde::{Deserialize, Serialize};

/// Tolerance on the weight sum.
const WEIGHT_TOLERANCE: f64 = 1e-6;

/// Composite score weights; must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompositeWeights {
    /// Weight of the (inverted) volatility rank (default: 0.40)
    pub volatility: f64,
    /// Weight of the (inverted) momentum rank (default: 0.35)
    pub momentum: f64,
    /// Weight of the (inverted) dividend yield rank (default: 0.25)
    pub dividend_yield: f64,
}

impl Default for CompositeWeights {
    fn default() -> Self {
        Self {
            volatility: 0.40,
            momentum: 0.35,
            dividend_yield: 0.25,
        }
    }
}

impl CompositeWeights {
    /// Create a weight set.
    pub const fn new(volatility: f64, momentum: f64, dividend_yield: f64) -> Self {
        Self {
            volatility,
            momentum,
            dividend_yield,
        }
    }

    /// Sum of the three weights.
    pub fn sum(&self) -> f64 {
        self.volatility + self.momentum + self.dividend_yield
    }

    /// Check that every weight is non-negative and the sum is 1.
    pub fn validate(&self) -> Result<(), ScreenError> {
        let weights = [self.volatility, self.momentum, self.dividend_yield];
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(ScreenError::InvalidConfig(format!(
                "weights must be non-negative numbers, got {weights:?}"
            )));
        }
        if (self.sum() - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(ScreenError::InvalidConfig(format!(
                "weights must sum to 1.0, got {:.4}",
                self.sum()
            )));
        }
        Ok(())
    }
}

/// Configuration for [`crate::Screener`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenConfig {
    /// Fraction of the universe kept by the volatility filter (default: 0.30)
    pub volatility_percentile: f64,
    /// Fraction of the survivors removed by the momentum filter (default: 0.25)
    pub momentum_cutoff: f64,
    /// Output size (default: 10)
    pub top_n: usize,
    /// Composite weights
    pub weights: CompositeWeights,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            volatility_percentile: 0.30,
            momentum_cutoff: 0.25,
            top_n: 10,
            weights: CompositeWeights::default(),
        }
    }
}

impl ScreenConfig {
    /// Check every option.
    pub fn validate(&self) -> Result<(), ScreenError> {
        if !(self.volatility_percentile > 0.0 && self.volatility_percentile <= 1.0) {
            return Err(ScreenError::InvalidConfig(format!(
                "volatility_percentile must be in (0, 1], got {}",
                self.volatility_percentile
            )));
        }
        if !(self.momentum_cutoff >= 0.0 && self.momentum_cutoff < 1.0) {
            return Err(ScreenError::InvalidConfig(format!(
                "momentum_cutoff must be in [0, 1), got {}",
                self.momentum_cutoff
            )));
        }
        if self.top_n == 0 {
            return Err(ScreenError::InvalidConfig(
                "top_n must be at least 1".to_string(),
            ));
        }
        self.weights.validate()
    }
}
