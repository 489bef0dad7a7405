//! Yahoo Finance data providers.

pub mod fundamentals;
pub mod quotes;

pub use fundamentals::{Fundamentals, YahooFundamentalsProvider};
pub use quotes::YahooQuoteProvider;

use crate::error::Result;
use crate::source::MarketDataSource;
use crate::throttle::RequestPacer;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Live Yahoo Finance source: history via the chart API, fundamentals via quoteSummary.
///
/// Both providers share one [`RequestPacer`], so the pacing budget holds for
/// the combined request stream.
#[derive(Debug)]
pub struct YahooMarketData {
    quotes: YahooQuoteProvider,
    fundamentals: YahooFundamentalsProvider,
}

impl YahooMarketData {
    /// Create a live source sharing `pacer` between both endpoints.
    pub fn new(pacer: Arc<RequestPacer>) -> Result<Self> {
        Ok(Self {
            quotes: YahooQuoteProvider::new(Arc::clone(&pacer))?,
            fundamentals: YahooFundamentalsProvider::new(pacer)?,
        })
    }
}

impl MarketDataSource for YahooMarketData {
    async fn fetch_closes(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<f64>> {
        let quotes = self.quotes.fetch_quotes(symbol, start, end).await?;
        YahooQuoteProvider::adjusted_closes(&quotes)
    }

    async fn fetch_fundamentals(&self, symbol: &str) -> Result<Fundamentals> {
        self.fundamentals.fetch_fundamentals(symbol).await
    }
}
