//! Universe management for the Vaxholm screener.
//!
//! This module provides the Nasdaq OMX Stockholm universe and its
//! market-cap segments.

pub mod segment;
pub mod stockholm;

pub use segment::MarketSegment;
pub use stockholm::{Constituent, StockholmUniverse};

/// Trait for stock universes.
pub trait Universe {
    /// Get all provider symbols in the universe, in table order.
    fn symbols(&self) -> Vec<String>;

    /// Suffix the data provider appends to the exchange-local symbol.
    fn exchange_suffix(&self) -> &str;

    /// Check if a symbol is in the universe.
    fn contains(&self, symbol: &str) -> bool {
        self.symbols().iter().any(|s| s == symbol)
    }

    /// Get the number of constituents.
    fn size(&self) -> usize {
        self.symbols().len()
    }

    /// Strip the exchange suffix from a provider symbol.
    ///
    /// Symbols without the suffix are returned unchanged.
    fn local_symbol<'a>(&self, symbol: &'a str) -> &'a str {
        symbol
            .strip_suffix(self.exchange_suffix())
            .unwrap_or(symbol)
    }
}

impl Universe for StockholmUniverse {
    fn symbols(&self) -> Vec<String> {
        self.symbols()
    }

    fn exchange_suffix(&self) -> &str {
        stockholm::EXCHANGE_SUFFIX
    }
}
