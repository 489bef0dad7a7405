#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/vaxholm/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod dividend;
pub mod error;
pub mod math;
pub mod momentum;
pub mod profile;
pub mod volatility;

pub use dividend::{DividendYield, DividendYieldConfig};
pub use error::FactorError;
pub use momentum::{Momentum, MomentumConfig};
pub use volatility::{HistoricalVolatility, HistoricalVolatilityConfig};

/// A metric computed from a single security's daily close series.
pub trait PriceFactor {
    /// Factor name, used in diagnostics.
    fn name(&self) -> &str;

    /// Minimum number of closes the factor needs.
    fn min_observations(&self) -> usize;

    /// Compute the metric from closes ordered oldest first.
    fn compute(&self, closes: &[f64]) -> Result<f64, FactorError>;
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
