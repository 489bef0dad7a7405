//! The persisted artifact of a screening run.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use vaxholm_screen::RankedSecurity;

/// One shortlisted security as written to the artifact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StockEntry {
    /// 1-based rank, 1 = best.
    pub rank: usize,

    /// Exchange-local symbol.
    pub ticker: String,

    /// Display name.
    pub name: String,

    /// Sector label.
    pub sector: String,

    /// Annualized volatility, percent.
    pub volatility: f64,

    /// 12-1 month momentum, percent.
    pub momentum: f64,

    /// Dividend yield, percent.
    pub div_yield: f64,

    /// Composite score rounded to an integer.
    pub score: i64,
}

impl From<&RankedSecurity> for StockEntry {
    fn from(security: &RankedSecurity) -> Self {
        let record = security.record();
        Self {
            rank: security.rank,
            ticker: record.ticker.clone(),
            name: record.name.clone(),
            sector: record.sector.clone(),
            volatility: record.volatility,
            momentum: record.momentum,
            div_yield: record.div_yield,
            score: security.ranked.score.round_ties_even() as i64,
        }
    }
}

/// Result of one run: timestamp, universe size and the ordered shortlist.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunReport {
    /// Generation time, UTC.
    #[serde(with = "timestamp")]
    pub updated: DateTime<Utc>,

    /// Securities with valid data in this run.
    pub universe_count: usize,

    /// Shortlist ordered by rank.
    pub stocks: Vec<StockEntry>,
}

impl RunReport {
    /// Create a report stamped with the current time.
    pub fn new(universe_count: usize, top: &[RankedSecurity]) -> Self {
        Self::at(Utc::now(), universe_count, top)
    }

    /// Create a report with an explicit timestamp.
    pub fn at(updated: DateTime<Utc>, universe_count: usize, top: &[RankedSecurity]) -> Self {
        Self {
            updated,
            universe_count,
            stocks: top.iter().map(StockEntry::from).collect(),
        }
    }
}

/// `2024-05-01T06:30:00.123456Z`: microseconds and a literal `Z`.
mod timestamp {
    use super::*;
    use serde::{Deserializer, Serializer, de::Error};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

    pub(super) fn serialize<S: Serializer>(
        value: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{}Z", value.format(FORMAT)))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let trimmed = raw.strip_suffix('Z').unwrap_or(&raw);
        NaiveDateTime::parse_from_str(trimmed, FORMAT)
            .map(|naive| naive.and_utc())
            .map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use vaxholm_screen::{RankedRecord, SecurityRecord};

    fn shortlist() -> Vec<RankedSecurity> {
        [
            ("INDU-C", "Industrivärden C", 12.34, -1.5, 3.1, 72.5),
            ("AXFO", "Axfood", 14.0, 8.25, 2.6, 61.4),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, (ticker, name, vol, mom, dy, score))| RankedSecurity {
            rank: i + 1,
            ranked: RankedRecord {
                record: SecurityRecord::new(ticker, name, "Financial Services", vol, mom, dy),
                rank_vol: 50.0,
                rank_mom: 50.0,
                rank_yield: 50.0,
                score,
            },
        })
        .collect()
    }

    #[test]
    fn test_score_is_rounded_half_to_even() {
        let top = shortlist();
        let report = RunReport::new(120, &top);

        assert_eq!(report.stocks[0].score, 72);
        assert_eq!(report.stocks[1].score, 61);
        assert_eq!(report.universe_count, 120);
    }

    #[test]
    fn test_timestamp_format() {
        let updated = Utc
            .with_ymd_and_hms(2024, 5, 1, 6, 30, 0)
            .unwrap()
            .checked_add_signed(chrono::Duration::microseconds(123_456))
            .unwrap();
        let report = RunReport::at(updated, 2, &shortlist());
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["updated"], "2024-05-01T06:30:00.123456Z");
    }

    #[test]
    fn test_round_trip_keeps_microseconds() {
        let report = RunReport::new(2, &shortlist());
        let json = serde_json::to_string(&report).unwrap();
        let parsed: RunReport = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.stocks, report.stocks);
        assert_eq!(
            parsed.updated.timestamp_micros(),
            report.updated.timestamp_micros()
        );
    }

    #[test]
    fn test_field_order() {
        let report = RunReport::new(2, &shortlist());
        let json = serde_json::to_string(&report).unwrap();

        let updated = json.find("\"updated\"").unwrap();
        let count = json.find("\"universe_count\"").unwrap();
        let stocks = json.find("\"stocks\"").unwrap();
        assert!(updated < count && count < stocks);

        let rank = json.find("\"rank\"").unwrap();
        let score = json.find("\"score\"").unwrap();
        assert!(rank < score);
    }
}
