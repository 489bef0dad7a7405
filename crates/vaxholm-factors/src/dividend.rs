//! Trailing Dividend Yield
//!
//! Providers occasionally report the dividend yield in the wrong unit (a raw
//! currency amount instead of a fraction), so the yield is preferably derived
//! from the trailing dividend per share and the price, and every candidate is
//! checked against a sanity bound before it is accepted.

use crate::math::round_dp;
use serde::{Deserialize, Serialize};
use vaxholm_data::Fundamentals;

/// Configuration for [`DividendYield`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DividendYieldConfig {
    /// Exclusive upper bound on an accepted yield, in percent (default: 20.0)
    pub max_yield_pct: f64,
}

impl Default for DividendYieldConfig {
    fn default() -> Self {
        Self {
            max_yield_pct: 20.0,
        }
    }
}

/// Trailing annual dividend yield, in percent, rounded to 2 decimals.
#[derive(Debug, Default)]
pub struct DividendYield {
    config: DividendYieldConfig,
}

impl DividendYield {
    /// Create the metric with a custom configuration.
    pub const fn with_config(config: DividendYieldConfig) -> Self {
        Self { config }
    }

    /// Compute the yield; returns 0.0 when no candidate passes the sanity bound.
    pub fn compute(&self, fundamentals: &Fundamentals) -> f64 {
        self.from_dividend_rate(fundamentals)
            .or_else(|| self.from_trailing_yield(fundamentals))
            .map_or(0.0, |pct| round_dp(pct, 2))
    }

    fn accepts(&self, pct: f64) -> bool {
        pct > 0.0 && pct < self.config.max_yield_pct
    }

    fn from_dividend_rate(&self, fundamentals: &Fundamentals) -> Option<f64> {
        let rate = fundamentals
            .trailing_annual_dividend_rate
            .filter(|r| *r > 0.0)?;
        let price = reference_price(fundamentals).filter(|p| *p > 0.0)?;
        Some(rate / price * 100.0).filter(|pct| self.accepts(*pct))
    }

    fn from_trailing_yield(&self, fundamentals: &Fundamentals) -> Option<f64> {
        fundamentals
            .trailing_annual_dividend_yield
            .map(|fraction| fraction * 100.0)
            .filter(|pct| self.accepts(*pct))
    }
}

/// Current price, falling back to the regular market price when absent or zero.
pub fn reference_price(fundamentals: &Fundamentals) -> Option<f64> {
    fundamentals
        .current_price
        .filter(|p| *p != 0.0)
        .or(fundamentals.regular_market_price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn fundamentals(
        rate: Option<f64>,
        price: Option<f64>,
        trailing_yield: Option<f64>,
    ) -> Fundamentals {
        Fundamentals {
            trailing_annual_dividend_rate: rate,
            current_price: price,
            trailing_annual_dividend_yield: trailing_yield,
            ..Fundamentals::empty("TEST.ST")
        }
    }

    #[rstest]
    #[case::from_rate(Some(2.0), Some(50.0), None, 4.0)]
    #[case::rounded(Some(1.0), Some(30.0), None, 3.33)]
    #[case::rate_preferred(Some(3.0), Some(100.0), Some(0.05), 3.0)]
    #[case::fallback_when_no_rate(None, Some(100.0), Some(0.0456), 4.56)]
    #[case::fallback_when_no_price(Some(3.0), None, Some(0.031), 3.1)]
    #[case::nothing(None, None, None, 0.0)]
    #[case::fallback_out_of_bounds(None, None, Some(0.25), 0.0)]
    #[case::zero_yield(Some(0.0), Some(10.0), Some(0.0), 0.0)]
    fn test_yield_strategies(
        #[case] rate: Option<f64>,
        #[case] price: Option<f64>,
        #[case] trailing_yield: Option<f64>,
        #[case] expected: f64,
    ) {
        let dy = DividendYield::default().compute(&fundamentals(rate, price, trailing_yield));
        assert_relative_eq!(dy, expected, epsilon = 1e-9);
    }

    #[test]
    fn test_sanity_bound_rejects_fifty_percent() {
        // 5 / 10 = 50% is a provider error and must not be returned.
        let dy = DividendYield::default().compute(&fundamentals(Some(5.0), Some(10.0), None));
        assert_relative_eq!(dy, 0.0);

        let dy =
            DividendYield::default().compute(&fundamentals(Some(5.0), Some(10.0), Some(0.062)));
        assert_relative_eq!(dy, 6.2, epsilon = 1e-9);
    }

    #[test]
    fn test_regular_market_price_fallback() {
        let data = Fundamentals {
            trailing_annual_dividend_rate: Some(1.5),
            current_price: Some(0.0),
            regular_market_price: Some(60.0),
            ..Fundamentals::empty("TEST.ST")
        };
        assert_relative_eq!(DividendYield::default().compute(&data), 2.5, epsilon = 1e-9);
    }
}
