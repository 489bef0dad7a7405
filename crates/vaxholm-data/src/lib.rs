#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/vaxholm/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod snapshot;
pub mod source;
pub mod throttle;
pub mod yahoo;

pub use error::{DataError, Result};
pub use snapshot::{RecordingSource, Snapshot, SnapshotEntry, SnapshotSource};
pub use source::MarketDataSource;
pub use throttle::RequestPacer;
pub use yahoo::{Fundamentals, YahooFundamentalsProvider, YahooMarketData, YahooQuoteProvider};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
