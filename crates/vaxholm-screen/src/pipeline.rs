//! Ranking Pipeline
//!
//! Turns the collected records of one run into the top-N shortlist:
//!
//! 1. universe check: at least `top_n` valid records
//! 2. volatility filter: keep `volatility <= quantile(volatility, p)`
//! 3. momentum filter: keep `momentum >= quantile(momentum, c)` on the survivors
//! 4. percentile ranks on the doubly-filtered set (`rank / n * 100`)
//! 5. composite score:
//!    `(100 - rank_vol) * w_vol + (100 - rank_mom) * w_mom + (100 - rank_yield) * w_yield`
//! 6. stable descending sort by score, take `top_n`, assign ranks 1..N
//!
//! Records must arrive in universe order; ties in the score keep that order.

use crate::config::ScreenConfig;
use crate::error::ScreenError;
use crate::record::{RankedRecord, RankedSecurity, SecurityRecord};
use crate::stats::{RankOrder, percentile_ranks, quantile};
use vaxholm_factors::math::round_dp;

/// Everything a screen produced, including the intermediate counts.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenOutcome {
    /// Valid records entering the pipeline
    pub universe_count: usize,
    /// Volatility cut-off
    pub volatility_threshold: f64,
    /// Records left after the volatility filter
    pub after_volatility: usize,
    /// Momentum cut-off, computed on the volatility survivors
    pub momentum_threshold: f64,
    /// Records left after the momentum filter
    pub after_momentum: usize,
    /// Every scored record, in universe order
    pub ranked: Vec<RankedRecord>,
    /// The shortlist, best first
    pub top: Vec<RankedSecurity>,
}

/// Low-volatility screen.
#[derive(Debug, Clone)]
pub struct Screener {
    config: ScreenConfig,
}

impl Screener {
    /// Create a screener, rejecting an unusable configuration.
    pub fn new(config: ScreenConfig) -> Result<Self, ScreenError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Get configuration
    pub const fn config(&self) -> &ScreenConfig {
        &self.config
    }

    /// Run the pipeline over `records`, given in universe order.
    pub fn screen(&self, records: Vec<SecurityRecord>) -> Result<ScreenOutcome, ScreenError> {
        let universe_count = records.len();
        if universe_count < self.config.top_n {
            return Err(ScreenError::UniverseTooSmall {
                observed: universe_count,
                required: self.config.top_n,
            });
        }

        let volatilities: Vec<f64> = records.iter().map(|r| r.volatility).collect();
        let volatility_threshold = quantile(&volatilities, self.config.volatility_percentile)
            .ok_or(ScreenError::EmptyStage { stage: "universe" })?;
        let low_vol: Vec<SecurityRecord> = records
            .into_iter()
            .filter(|r| r.volatility <= volatility_threshold)
            .collect();
        tracing::debug!(
            threshold = volatility_threshold,
            remaining = low_vol.len(),
            "volatility filter applied"
        );

        let momenta: Vec<f64> = low_vol.iter().map(|r| r.momentum).collect();
        let momentum_threshold = quantile(&momenta, self.config.momentum_cutoff)
            .ok_or(ScreenError::EmptyStage { stage: "volatility" })?;
        let survivors: Vec<SecurityRecord> = low_vol
            .into_iter()
            .filter(|r| r.momentum >= momentum_threshold)
            .collect();
        tracing::debug!(
            threshold = momentum_threshold,
            remaining = survivors.len(),
            "momentum filter applied"
        );

        if survivors.is_empty() {
            return Err(ScreenError::EmptyStage { stage: "momentum" });
        }

        let after_volatility = momenta.len();
        let after_momentum = survivors.len();
        let ranked = self.rank(survivors);
        let top = self.select(&ranked);

        Ok(ScreenOutcome {
            universe_count,
            volatility_threshold,
            after_volatility,
            momentum_threshold,
            after_momentum,
            ranked,
            top,
        })
    }

    fn rank(&self, records: Vec<SecurityRecord>) -> Vec<RankedRecord> {
        let volatilities: Vec<f64> = records.iter().map(|r| r.volatility).collect();
        let momenta: Vec<f64> = records.iter().map(|r| r.momentum).collect();
        let yields: Vec<f64> = records.iter().map(|r| r.div_yield).collect();

        let rank_vol = percentile_ranks(&volatilities, RankOrder::Ascending);
        let rank_mom = percentile_ranks(&momenta, RankOrder::Descending);
        let rank_yield = percentile_ranks(&yields, RankOrder::Descending);

        let weights = self.config.weights;
        records
            .into_iter()
            .enumerate()
            .map(|(i, record)| {
                let raw = (100.0 - rank_vol[i]) * weights.volatility
                    + (100.0 - rank_mom[i]) * weights.momentum
                    + (100.0 - rank_yield[i]) * weights.dividend_yield;
                RankedRecord {
                    record,
                    rank_vol: rank_vol[i],
                    rank_mom: rank_mom[i],
                    rank_yield: rank_yield[i],
                    score: round_dp(raw, 1),
                }
            })
            .collect()
    }

    fn select(&self, ranked: &[RankedRecord]) -> Vec<RankedSecurity> {
        let mut ordered: Vec<&RankedRecord> = ranked.iter().collect();
        // sort_by is stable, so equal scores stay in universe order
        ordered.sort_by(|a, b| b.score.total_cmp(&a.score));

        ordered
            .into_iter()
            .take(self.config.top_n)
            .enumerate()
            .map(|(i, ranked)| RankedSecurity {
                rank: i + 1,
                ranked: ranked.clone(),
            })
            .collect()
    }
}
