#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/vaxholm/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod universe;

// Re-export main types from sub-crates
pub use vaxholm_data as data;
pub use vaxholm_factors as factors;
pub use vaxholm_output as output;
pub use vaxholm_screen as screen;

// Re-export common universe types
pub use universe::{
    Universe,
    segment::{MarketSegment, ParseSegmentError},
    stockholm::{Constituent, StockholmUniverse},
};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
