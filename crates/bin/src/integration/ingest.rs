//! Per-ticker ingest: history, metrics and fundamentals into records.
//!
//! Every constituent is evaluated independently; a failure skips that ticker
//! and never aborts the run. Results are put back into universe order before
//! they reach the ranking pipeline, whatever order the fetches completed in.

use chrono::{DateTime, Duration, Utc};
use futures::stream::{self, StreamExt};
use indicatif::ProgressBar;
use vaxholm::{Constituent, StockholmUniverse, Universe};
use vaxholm_data::{DataError, MarketDataSource};
use vaxholm_factors::FactorError;
use vaxholm_output::summary::{progress_prefix, ticker_ok, ticker_skipped};
use vaxholm_screen::{MetricSet, SecurityRecord};

/// Shortest close series worth evaluating.
pub(crate) const MIN_HISTORY: usize = 50;

/// Configuration for data fetching.
#[derive(Debug, Clone)]
pub(crate) struct FetchConfig {
    /// Calendar days of history requested, ending today.
    pub history_days: u32,
    /// Tickers evaluated at the same time.
    pub concurrency: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            history_days: 400,
            concurrency: 1,
        }
    }
}

/// Why a ticker was left out of the run.
#[derive(Debug, thiserror::Error)]
pub(crate) enum SkipReason {
    #[error("Insufficient price history")]
    InsufficientHistory,

    #[error("Could not compute metrics")]
    Metrics(#[source] FactorError),

    #[error("{0}")]
    Data(#[from] DataError),
}

/// Records gathered by [`ingest`], in universe order.
#[derive(Debug, Default)]
pub(crate) struct IngestReport {
    pub records: Vec<SecurityRecord>,
    pub skipped: usize,
}

async fn evaluate<S: MarketDataSource>(
    source: &S,
    metrics: &MetricSet,
    universe: &StockholmUniverse,
    constituent: &Constituent,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<SecurityRecord, SkipReason> {
    let symbol = constituent.symbol.as_str();

    let closes = source.fetch_closes(symbol, start, end).await?;
    if closes.len() < MIN_HISTORY {
        return Err(SkipReason::InsufficientHistory);
    }

    let price = metrics.price_metrics(&closes).map_err(SkipReason::Metrics)?;
    let fundamentals = source.fetch_fundamentals(symbol).await?;

    Ok(metrics.record(universe.local_symbol(symbol), symbol, price, &fundamentals))
}

/// Evaluate every constituent of `universe` against `source`.
pub(crate) async fn ingest<S: MarketDataSource>(
    source: &S,
    universe: &StockholmUniverse,
    config: &FetchConfig,
    progress: &ProgressBar,
) -> IngestReport {
    let end = Utc::now();
    let start = end - Duration::days(i64::from(config.history_days));
    let metrics = MetricSet::default();
    let metrics = &metrics;
    let total = universe.size();

    let mut results: Vec<(usize, Result<SecurityRecord, SkipReason>)> =
        stream::iter(universe.constituents().iter().enumerate())
            .map(move |(index, constituent)| async move {
                let result = evaluate(source, metrics, universe, constituent, start, end).await;

                let line = match &result {
                    Ok(record) => ticker_ok(record.volatility, record.momentum, record.div_yield),
                    Err(reason) => {
                        tracing::debug!(symbol = %constituent.symbol, error = ?reason, "ticker skipped");
                        ticker_skipped(&reason.to_string())
                    }
                };
                progress.println(format!(
                    "{}{line}",
                    progress_prefix(index + 1, total, &constituent.symbol)
                ));
                progress.inc(1);

                (index, result)
            })
            .buffer_unordered(config.concurrency.max(1))
            .collect()
            .await;

    results.sort_by_key(|(index, _)| *index);

    let mut report = IngestReport::default();
    for (_, result) in results {
        match result {
            Ok(record) => report.records.push(record),
            Err(_) => report.skipped += 1,
        }
    }

    tracing::info!(
        valid = report.records.len(),
        skipped = report.skipped,
        "ingest finished"
    );
    report
}
