//! The market data seam used by the screener.

use crate::error::Result;
use crate::yahoo::Fundamentals;
use chrono::{DateTime, Utc};
use std::future::Future;

/// A provider of daily price history and fundamentals snapshots.
///
/// Implementations are expected to be unreliable: every call may fail for a
/// single symbol without affecting the others.
pub trait MarketDataSource {
    /// Fetch split/dividend adjusted daily closes for `[start, end]`,
    /// oldest first.
    fn fetch_closes(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> impl Future<Output = Result<Vec<f64>>> + Send;

    /// Fetch the current fundamentals record for a symbol.
    fn fetch_fundamentals(&self, symbol: &str) -> impl Future<Output = Result<Fundamentals>> + Send;
}
