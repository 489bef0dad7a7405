#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/vaxholm/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod pipeline;
pub mod record;
pub mod stats;

pub use config::{CompositeWeights, ScreenConfig};
pub use error::ScreenError;
pub use pipeline::{ScreenOutcome, Screener};
pub use record::{MetricSet, PriceMetrics, RankedRecord, RankedSecurity, SecurityRecord};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
