//! Frozen market data.
//!
//! A [`Snapshot`] holds the raw inputs of one run (close series and
//! fundamentals per symbol). [`RecordingSource`] captures a snapshot while a
//! live source is being queried; [`SnapshotSource`] replays it offline, so a
//! screen can be reproduced exactly.

use crate::error::{DataError, Result};
use crate::source::MarketDataSource;
use crate::yahoo::Fundamentals;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tokio::sync::Mutex;

/// Raw inputs captured for one symbol.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    /// Adjusted daily closes, oldest first. Empty when the history fetch failed.
    #[serde(default)]
    pub closes: Vec<f64>,
    /// Fundamentals record, when it was fetched.
    #[serde(default)]
    pub fundamentals: Option<Fundamentals>,
}

/// Raw market data for a set of symbols at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// When the data was captured.
    pub created: DateTime<Utc>,
    /// Inputs keyed by provider symbol.
    pub securities: BTreeMap<String, SnapshotEntry>,
}

impl Snapshot {
    /// Create an empty snapshot stamped with the current time.
    pub fn new() -> Self {
        Self {
            created: Utc::now(),
            securities: BTreeMap::new(),
        }
    }

    /// Add or replace the entry for `symbol`.
    pub fn insert(&mut self, symbol: impl Into<String>, entry: SnapshotEntry) {
        self.securities.insert(symbol.into(), entry);
    }

    /// Number of symbols in the snapshot.
    pub fn len(&self) -> usize {
        self.securities.len()
    }

    /// Whether the snapshot holds no symbols.
    pub fn is_empty(&self) -> bool {
        self.securities.is_empty()
    }

    /// Load a snapshot from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Write the snapshot as JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::new()
    }
}

/// Offline source answering from a [`Snapshot`].
#[derive(Debug, Clone)]
pub struct SnapshotSource {
    snapshot: Snapshot,
}

impl SnapshotSource {
    /// Replay `snapshot`.
    pub const fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }

    /// Load and replay the snapshot stored at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        Snapshot::load(path).map(Self::new)
    }

    /// The underlying snapshot.
    pub const fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    fn entry(&self, symbol: &str) -> Result<&SnapshotEntry> {
        self.snapshot
            .securities
            .get(symbol)
            .ok_or_else(|| DataError::missing(symbol, "not present in snapshot"))
    }
}

impl MarketDataSource for SnapshotSource {
    async fn fetch_closes(
        &self,
        symbol: &str,
        _start: DateTime<Utc>,
        _end: DateTime<Utc>,
    ) -> Result<Vec<f64>> {
        let entry = self.entry(symbol)?;
        if entry.closes.is_empty() {
            return Err(DataError::missing(symbol, "no price history in snapshot"));
        }
        Ok(entry.closes.clone())
    }

    async fn fetch_fundamentals(&self, symbol: &str) -> Result<Fundamentals> {
        self.entry(symbol)?
            .fundamentals
            .clone()
            .ok_or_else(|| DataError::missing(symbol, "no fundamentals in snapshot"))
    }
}

/// Wraps a source and records every successful answer into a [`Snapshot`].
#[derive(Debug)]
pub struct RecordingSource<S> {
    inner: S,
    captured: Mutex<BTreeMap<String, SnapshotEntry>>,
}

impl<S> RecordingSource<S> {
    /// Record everything `inner` returns.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            captured: Mutex::new(BTreeMap::new()),
        }
    }

    /// Finish recording.
    pub fn into_snapshot(self) -> Snapshot {
        Snapshot {
            created: Utc::now(),
            securities: self.captured.into_inner(),
        }
    }
}

impl<S> MarketDataSource for RecordingSource<S>
where
    S: MarketDataSource + Sync,
{
    async fn fetch_closes(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<f64>> {
        let closes = self.inner.fetch_closes(symbol, start, end).await?;
        self.captured
            .lock()
            .await
            .entry(symbol.to_string())
            .or_default()
            .closes = closes.clone();
        Ok(closes)
    }

    async fn fetch_fundamentals(&self, symbol: &str) -> Result<Fundamentals> {
        let fundamentals = self.inner.fetch_fundamentals(symbol).await?;
        self.captured
            .lock()
            .await
            .entry(symbol.to_string())
            .or_default()
            .fundamentals = Some(fundamentals.clone());
        Ok(fundamentals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Snapshot {
        let mut snapshot = Snapshot::new();
        snapshot.insert(
            "ABB.ST",
            SnapshotEntry {
                closes: vec![100.0, 101.0, 102.5],
                fundamentals: Some(Fundamentals {
                    short_name: Some("ABB Ltd".to_string()),
                    ..Fundamentals::empty("ABB.ST")
                }),
            },
        );
        snapshot.insert(
            "HALF.ST",
            SnapshotEntry {
                closes: vec![10.0],
                fundamentals: None,
            },
        );
        snapshot
    }

    #[tokio::test]
    async fn test_replay_returns_stored_data() {
        let source = SnapshotSource::new(sample());
        let now = Utc::now();

        let closes = source.fetch_closes("ABB.ST", now, now).await.unwrap();
        assert_eq!(closes, vec![100.0, 101.0, 102.5]);

        let fundamentals = source.fetch_fundamentals("ABB.ST").await.unwrap();
        assert_eq!(fundamentals.short_name.as_deref(), Some("ABB Ltd"));
    }

    #[tokio::test]
    async fn test_replay_missing_symbol() {
        let source = SnapshotSource::new(sample());
        let now = Utc::now();

        let result = source.fetch_closes("NOPE.ST", now, now).await;
        assert!(matches!(result, Err(DataError::MissingData { .. })));

        let result = source.fetch_fundamentals("HALF.ST").await;
        assert!(matches!(result, Err(DataError::MissingData { .. })));
    }

    #[tokio::test]
    async fn test_recording_captures_answers() {
        let recorder = RecordingSource::new(SnapshotSource::new(sample()));
        let now = Utc::now();

        recorder.fetch_closes("ABB.ST", now, now).await.unwrap();
        recorder.fetch_fundamentals("ABB.ST").await.unwrap();
        assert!(recorder.fetch_closes("NOPE.ST", now, now).await.is_err());

        let recorded = recorder.into_snapshot();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded.securities["ABB.ST"], sample().securities["ABB.ST"]);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");

        let snapshot = sample();
        snapshot.save(&path).unwrap();
        let loaded = Snapshot::load(&path).unwrap();

        assert_eq!(loaded, snapshot);
    }

    #[test]
    fn test_saved_closes_reload_bit_for_bit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");

        let closes: Vec<f64> = (1..=500)
            .map(|i| 100.0 * (1.0 + f64::from(i) * 1e-7).powi(i) / 3.0)
            .collect();
        let mut snapshot = Snapshot::new();
        snapshot.insert(
            "VOLV-B.ST",
            SnapshotEntry {
                closes: closes.clone(),
                fundamentals: None,
            },
        );
        snapshot.save(&path).unwrap();

        let loaded = Snapshot::load(&path).unwrap();
        let reloaded = &loaded.securities["VOLV-B.ST"].closes;
        assert_eq!(reloaded.len(), closes.len());
        for (a, b) in reloaded.iter().zip(&closes) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }
}
