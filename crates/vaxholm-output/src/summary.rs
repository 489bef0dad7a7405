//! Console reporting.
//!
//! Plain-text blocks printed around a run: the banner, ingest counts, filter
//! counts, the shortlist table and the save confirmation.

use chrono::{DateTime, Local};
use std::fmt;
use std::path::Path;
use vaxholm_screen::{RankedSecurity, ScreenConfig, ScreenOutcome};

const WIDTH: usize = 65;

/// Counts and thresholds of one run, printable as the console summary.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Tickers with valid metrics
    pub valid: usize,
    /// Tickers skipped during ingest
    pub skipped: usize,
    /// Kept share of the volatility filter, as a fraction
    pub volatility_percentile: f64,
    /// Removed share of the momentum filter, as a fraction
    pub momentum_cutoff: f64,
    /// Survivors of the volatility filter
    pub after_volatility: Option<usize>,
    /// Survivors of the momentum filter
    pub after_momentum: Option<usize>,
}

impl RunSummary {
    /// Summary of the ingest phase; filter counts are filled by [`Self::with_outcome`].
    pub const fn new(valid: usize, skipped: usize, config: &ScreenConfig) -> Self {
        Self {
            valid,
            skipped,
            volatility_percentile: config.volatility_percentile,
            momentum_cutoff: config.momentum_cutoff,
            after_volatility: None,
            after_momentum: None,
        }
    }

    /// Add the filter counts of a finished screen.
    pub const fn with_outcome(mut self, outcome: &ScreenOutcome) -> Self {
        self.after_volatility = Some(outcome.after_volatility);
        self.after_momentum = Some(outcome.after_momentum);
        self
    }

    /// The ingest block.
    pub fn ingest_block(&self) -> String {
        let rule = "─".repeat(WIDTH);
        format!(
            "\n{rule}\n  Valid: {} stocks   Skipped: {}\n{rule}",
            self.valid, self.skipped
        )
    }

    /// The filter lines, empty until an outcome is attached.
    pub fn filter_block(&self) -> String {
        let mut output = String::new();
        if let Some(count) = self.after_volatility {
            output.push_str(&format!(
                "\n→ After volatility filter (bottom {}%): {count} stocks",
                percent(self.volatility_percentile)
            ));
        }
        if let Some(count) = self.after_momentum {
            output.push_str(&format!(
                "\n→ After momentum filter (remove bottom {}%): {count} stocks",
                percent(self.momentum_cutoff)
            ));
        }
        output
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ingest_block())?;
        let filters = self.filter_block();
        if !filters.is_empty() {
            write!(f, "\n{filters}")?;
        }
        Ok(())
    }
}

fn percent(fraction: f64) -> i64 {
    (fraction * 100.0).round() as i64
}

/// Opening banner.
pub fn banner(universe_size: usize, scope: &str, now: DateTime<Local>) -> String {
    let rule = "=".repeat(WIDTH);
    format!(
        "\n{rule}\n  Vaxholm Low-Vol Screener · OMX Stockholm\n  Universe: {universe_size} tickers ({scope})\n  Running at: {}\n{rule}\n",
        now.format("%Y-%m-%d %H:%M")
    )
}

/// Progress suffix for a ticker with valid metrics.
pub fn ticker_ok(volatility: f64, momentum: f64, div_yield: f64) -> String {
    format!("✓  Vol={volatility:5.1}%  Mom={momentum:+6.1}%  Yield={div_yield:.1}%")
}

/// Progress suffix for a skipped ticker; long reasons are cut to 50 characters.
pub fn ticker_skipped(reason: &str) -> String {
    let short: String = reason.chars().take(50).collect();
    format!("✗  {short}")
}

/// Prefix of a progress line: `[  3/139] ABB.ST              `.
pub fn progress_prefix(position: usize, total: usize, symbol: &str) -> String {
    format!("[{position:>3}/{total}] {symbol:<20}")
}

/// The shortlist table.
pub fn format_top_table(top: &[RankedSecurity], top_n: usize) -> String {
    let rule = "=".repeat(WIDTH);
    let mut output = String::new();

    output.push_str(&format!("\n{rule}\n"));
    output.push_str(&format!("  TOP {top_n} · LOW-VOL SCREENER\n"));
    output.push_str(&format!("{rule}\n"));

    for security in top {
        let record = security.record();
        output.push_str(&format!(
            "  #{:>2} {:<15} Vol={:5.1}% Mom={:+6.1}% Yield={:.1}% Score={:.0}\n",
            security.rank,
            record.ticker,
            record.volatility,
            record.momentum,
            record.div_yield,
            security.ranked.score.round_ties_even()
        ));
    }

    output.push_str(&format!("{rule}\n"));
    output
}

/// Confirmation printed after the artifact is written.
pub fn saved_message(path: &Path, universe_count: usize, now: DateTime<Local>) -> String {
    format!(
        "✅  Saved → {}\n    Universe screened: {universe_count} stocks\n    Updated: {}\n",
        path.display(),
        now.format("%Y-%m-%d %H:%M")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use vaxholm_screen::{RankedRecord, SecurityRecord};

    fn security(rank: usize, ticker: &str, score: f64) -> RankedSecurity {
        RankedSecurity {
            rank,
            ranked: RankedRecord {
                record: SecurityRecord::new(ticker, ticker, "Utilities", 9.87, -2.5, 4.0),
                rank_vol: 25.0,
                rank_mom: 50.0,
                rank_yield: 75.0,
                score,
            },
        }
    }

    #[test]
    fn test_top_table() {
        let table = format_top_table(&[security(1, "ABB", 52.5), security(2, "SKF-B", 41.0)], 10);

        assert!(table.contains("TOP 10"));
        assert!(table.contains("  # 1 ABB             Vol=  9.9% Mom=  -2.5% Yield=4.0% Score=52\n"));
        assert!(table.contains("# 2 SKF-B"));
    }

    #[test]
    fn test_progress_lines() {
        assert_eq!(progress_prefix(3, 139, "ABB.ST"), "[  3/139] ABB.ST              ");
        assert_eq!(
            ticker_ok(18.456, 7.0, 2.3),
            "✓  Vol= 18.5%  Mom=  +7.0%  Yield=2.3%"
        );

        let long = "x".repeat(80);
        assert_eq!(ticker_skipped(&long).chars().count(), 53);
    }

    #[test]
    fn test_summary_blocks() {
        let config = ScreenConfig::default();
        let summary = RunSummary::new(120, 19, &config);
        assert!(summary.ingest_block().contains("Valid: 120 stocks   Skipped: 19"));
        assert!(summary.filter_block().is_empty());

        let summary = RunSummary {
            after_volatility: Some(36),
            after_momentum: Some(27),
            ..summary
        };
        let text = summary.to_string();
        assert!(text.contains("After volatility filter (bottom 30%): 36 stocks"));
        assert!(text.contains("After momentum filter (remove bottom 25%): 27 stocks"));
    }

    #[test]
    fn test_banner_and_saved_message() {
        let now = Local.with_ymd_and_hms(2024, 5, 1, 8, 15, 0).unwrap();

        let banner = banner(139, "Large + Mid + Small Cap", now);
        assert!(banner.contains("Universe: 139 tickers (Large + Mid + Small Cap)"));
        assert!(banner.contains("Running at: 2024-05-01 08:15"));

        let saved = saved_message(Path::new("data.json"), 120, now);
        assert!(saved.starts_with("✅  Saved → data.json"));
        assert!(saved.contains("Universe screened: 120 stocks"));
    }
}
