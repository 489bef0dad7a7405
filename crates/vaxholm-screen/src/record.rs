//! Records flowing through the pipeline.

use vaxholm_data::Fundamentals;
use vaxholm_factors::math::round_dp;
use vaxholm_factors::profile::{display_name, sector};
use vaxholm_factors::{DividendYield, FactorError, HistoricalVolatility, Momentum, PriceFactor};

/// One validated security observation.
///
/// Metrics are rounded to 2 decimals on construction; ranking works on the
/// rounded values.
#[derive(Debug, Clone, PartialEq)]
pub struct SecurityRecord {
    /// Exchange-local symbol (suffix stripped)
    pub ticker: String,
    /// Display name
    pub name: String,
    /// Sector label
    pub sector: String,
    /// Annualized volatility, percent
    pub volatility: f64,
    /// 12-1 month momentum, percent
    pub momentum: f64,
    /// Trailing dividend yield, percent
    pub div_yield: f64,
}

impl SecurityRecord {
    /// Create a record, rounding the metrics to 2 decimals.
    pub fn new(
        ticker: impl Into<String>,
        name: impl Into<String>,
        sector: impl Into<String>,
        volatility: f64,
        momentum: f64,
        div_yield: f64,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            name: name.into(),
            sector: sector.into(),
            volatility: round_dp(volatility, 2),
            momentum: round_dp(momentum, 2),
            div_yield: round_dp(div_yield, 2),
        }
    }
}

/// A record with its normalized ranks and composite score.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedRecord {
    /// The underlying record
    pub record: SecurityRecord,
    /// Volatility percentile rank, ascending (low volatility = low rank)
    pub rank_vol: f64,
    /// Momentum percentile rank, descending (high momentum = low rank)
    pub rank_mom: f64,
    /// Dividend yield percentile rank, descending (high yield = low rank)
    pub rank_yield: f64,
    /// Composite score in [0, 100], one decimal
    pub score: f64,
}

/// A member of the final shortlist.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedSecurity {
    /// 1-based position, 1 = best
    pub rank: usize,
    /// Ranked record
    pub ranked: RankedRecord,
}

impl RankedSecurity {
    /// Shorthand for the underlying record.
    pub const fn record(&self) -> &SecurityRecord {
        &self.ranked.record
    }
}

/// Volatility and momentum of one price series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceMetrics {
    /// Annualized volatility, percent
    pub volatility: f64,
    /// 12-1 month momentum, percent
    pub momentum: f64,
}

/// The metric calculators used to turn raw market data into records.
#[derive(Debug, Default)]
pub struct MetricSet {
    /// Volatility calculator
    pub volatility: HistoricalVolatility,
    /// Momentum calculator
    pub momentum: Momentum,
    /// Dividend yield calculator
    pub dividend_yield: DividendYield,
}

impl MetricSet {
    /// Compute both price metrics; either failing drops the security.
    pub fn price_metrics(&self, closes: &[f64]) -> Result<PriceMetrics, FactorError> {
        Ok(PriceMetrics {
            volatility: self.volatility.compute(closes)?,
            momentum: self.momentum.compute(closes)?,
        })
    }

    /// Assemble the record for `symbol`, reported as `ticker`.
    pub fn record(
        &self,
        ticker: &str,
        symbol: &str,
        metrics: PriceMetrics,
        fundamentals: &Fundamentals,
    ) -> SecurityRecord {
        SecurityRecord::new(
            ticker,
            display_name(fundamentals, symbol),
            sector(fundamentals),
            metrics.volatility,
            metrics.momentum,
            self.dividend_yield.compute(fundamentals),
        )
    }
}
