//! Quote data fetching from Yahoo Finance.

use crate::error::{DataError, Result};
use crate::throttle::RequestPacer;
use chrono::{DateTime, Utc};
use polars::prelude::*;
use std::sync::Arc;
use yahoo_finance_api as yahoo;

/// Yahoo Finance quote provider with rate limiting.
pub struct YahooQuoteProvider {
    provider: yahoo::YahooConnector,
    pacer: Arc<RequestPacer>,
}

impl std::fmt::Debug for YahooQuoteProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YahooQuoteProvider")
            .field("pacer", &self.pacer)
            .finish_non_exhaustive()
    }
}

impl YahooQuoteProvider {
    /// Create a quote provider whose requests go through `pacer`.
    pub fn new(pacer: Arc<RequestPacer>) -> Result<Self> {
        Ok(Self {
            provider: yahoo::YahooConnector::new()?,
            pacer,
        })
    }

    /// Fetch OHLCV data for a single symbol.
    ///
    /// # Arguments
    /// * `symbol` - The ticker symbol (e.g., "ABB.ST")
    /// * `start` - Start date for the data
    /// * `end` - End date for the data
    ///
    /// # Returns
    /// A Polars DataFrame with columns: symbol, date, open, high, low, close, volume,
    /// adjusted_close
    pub async fn fetch_quotes(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<DataFrame> {
        if start > end {
            return Err(DataError::InvalidDateRange {
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            });
        }

        if symbol.is_empty() {
            return Err(DataError::InvalidSymbol("Empty symbol".to_string()));
        }

        // Convert chrono DateTime to time::OffsetDateTime
        let start_time = time::OffsetDateTime::from_unix_timestamp(start.timestamp())
            .map_err(|e| DataError::TimeConversion(e.to_string()))?;
        let end_time = time::OffsetDateTime::from_unix_timestamp(end.timestamp())
            .map_err(|e| DataError::TimeConversion(e.to_string()))?;

        self.pacer.wait().await;
        tracing::debug!(symbol, %start, %end, "fetching quote history");

        let response = self
            .provider
            .get_quote_history(symbol, start_time, end_time)
            .await?;

        let quotes = response
            .quotes()
            .map_err(|e| DataError::YahooApi(e.to_string()))?;

        if quotes.is_empty() {
            return Err(DataError::missing(
                symbol,
                "No data returned from Yahoo Finance",
            ));
        }

        Self::quotes_to_frame(symbol, &quotes)
    }

    fn quotes_to_frame(symbol: &str, quotes: &[yahoo::Quote]) -> Result<DataFrame> {
        let dates: Vec<i64> = quotes.iter().map(|q| q.timestamp as i64).collect();
        let opens: Vec<f64> = quotes.iter().map(|q| q.open).collect();
        let highs: Vec<f64> = quotes.iter().map(|q| q.high).collect();
        let lows: Vec<f64> = quotes.iter().map(|q| q.low).collect();
        let closes: Vec<f64> = quotes.iter().map(|q| q.close).collect();
        let volumes: Vec<u64> = quotes.iter().map(|q| q.volume).collect();
        let adj_closes: Vec<f64> = quotes.iter().map(|q| q.adjclose).collect();

        let mut df = DataFrame::new(vec![
            Series::new("timestamp".into(), dates).into(),
            Series::new("open".into(), opens).into(),
            Series::new("high".into(), highs).into(),
            Series::new("low".into(), lows).into(),
            Series::new("close".into(), closes).into(),
            Series::new("volume".into(), volumes).into(),
            Series::new("adjusted_close".into(), adj_closes).into(),
        ])?;

        let symbol_col: Column = Series::new("symbol".into(), vec![symbol; df.height()]).into();
        df.with_column(symbol_col)?;

        let df = df
            .lazy()
            .with_column(
                (col("timestamp") * lit(1_000_000_000))
                    .cast(DataType::Datetime(TimeUnit::Nanoseconds, None))
                    .cast(DataType::Date)
                    .alias("date"),
            )
            .select(&[
                col("symbol"),
                col("date"),
                col("open"),
                col("high"),
                col("low"),
                col("close"),
                col("volume"),
                col("adjusted_close"),
            ])
            .collect()?;

        Ok(df)
    }

    /// Extract the adjusted close series, oldest first.
    ///
    /// Rows are sorted by `date`; null and non-finite closes are dropped.
    pub fn adjusted_closes(quotes: &DataFrame) -> Result<Vec<f64>> {
        let sorted = quotes
            .clone()
            .lazy()
            .sort(["date"], SortMultipleOptions::default())
            .select([col("adjusted_close").cast(DataType::Float64)])
            .collect()?;

        let closes = sorted
            .column("adjusted_close")?
            .as_materialized_series()
            .f64()?
            .into_iter()
            .flatten()
            .filter(|value| value.is_finite())
            .collect();

        Ok(closes)
    }
}
