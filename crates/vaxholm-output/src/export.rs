//! Export functionality for screening results.
//!
//! JSON is the primary artifact; CSV is a flat copy of the shortlist for
//! spreadsheets. Files are written to a sibling temporary path and renamed
//! into place, so a reader never observes a partial file.

use crate::report::{RunReport, StockEntry};
use derive_more::Display;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Output path is unusable.
    #[error("Invalid output path {}: {reason}", path.display())]
    InvalidPath {
        /// Offending path
        path: PathBuf,
        /// What is wrong with it
        reason: String,
    },
}

/// Export format options.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values format.
    #[display("csv")]
    Csv,

    /// Pretty-printed JSON format, 2-space indentation.
    #[display("pretty json")]
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::PrettyJson => "json",
        }
    }
}

/// Check that `path` can receive an artifact: its parent directory must exist.
pub fn ensure_writable(path: &Path) -> Result<(), ExportError> {
    let invalid = |reason: &str| ExportError::InvalidPath {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };

    if path.file_name().is_none() {
        return Err(invalid("no file name"));
    }
    if path.is_dir() {
        return Err(invalid("is a directory"));
    }
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => {
            Err(invalid("parent directory does not exist"))
        }
        _ => Ok(()),
    }
}

/// Trait for exporting data in various formats.
pub trait Exporter {
    /// Export data to a string in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError>;

    /// Write the export next to `path` without touching `path` itself.
    ///
    /// Nothing is visible at `path` until [`StagedFile::commit`]; dropping
    /// the staged file removes it.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is unusable, or serialization or writing fails.
    fn stage_file(&self, path: &Path, format: ExportFormat) -> Result<StagedFile, ExportError> {
        ensure_writable(path)?;
        let content = self.export_to_string(format)?;

        let staged = StagedFile {
            tmp: temporary_sibling(path),
            target: path.to_path_buf(),
            committed: false,
        };
        let mut file = File::create(&staged.tmp)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
        Ok(staged)
    }

    /// Export data to a file in the specified format, replacing it atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    fn export_to_file(&self, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
        self.stage_file(path, format)?.commit()
    }
}

/// A fully written export waiting to be renamed over its target.
#[derive(Debug)]
#[must_use = "a staged file is removed unless committed"]
pub struct StagedFile {
    tmp: PathBuf,
    target: PathBuf,
    committed: bool,
}

impl StagedFile {
    /// Final location of the export.
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Move the export into place.
    ///
    /// # Errors
    ///
    /// Returns an error if the rename fails; the temporary file is removed.
    pub fn commit(mut self) -> Result<(), ExportError> {
        fs::rename(&self.tmp, &self.target)?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if !self.committed {
            let _ = fs::remove_file(&self.tmp);
        }
    }
}

fn temporary_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    let mut tmp = path.to_path_buf();
    tmp.set_file_name(name);
    tmp
}

fn stocks_to_csv(stocks: &[StockEntry]) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    for stock in stocks {
        wtr.serialize(stock)?;
    }
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    // csv only writes the UTF-8 strings it was given
    String::from_utf8(bytes).map_err(|e| ExportError::Io(std::io::Error::other(e)))
}

impl Exporter for RunReport {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => stocks_to_csv(&self.stocks),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

impl Exporter for Vec<StockEntry> {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => stocks_to_csv(self),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn report() -> RunReport {
        RunReport {
            updated: Utc::now(),
            universe_count: 3,
            stocks: vec![StockEntry {
                rank: 1,
                ticker: "HUFV-A".to_string(),
                name: "Hufvudstaden A".to_string(),
                sector: "Real Estate".to_string(),
                volatility: 14.2,
                momentum: 3.0,
                div_yield: 2.85,
                score: 68,
            }],
        }
    }

    #[test]
    fn test_pretty_json_layout() {
        let json = report().export_to_string(ExportFormat::PrettyJson).unwrap();
        assert!(json.starts_with("{\n  \"updated\": "));
        assert!(json.contains("\n  \"stocks\": [\n    {\n      \"rank\": 1,"));
        assert!(json.contains("\"momentum\": 3.0"));
        assert!(json.contains("\"score\": 68\n"));
    }

    #[test]
    fn test_non_ascii_written_verbatim() {
        let mut report = report();
        report.stocks[0].name = "Diös Fastigheter".to_string();

        let json = report.export_to_string(ExportFormat::PrettyJson).unwrap();
        assert!(json.contains("Diös Fastigheter"));
        assert!(!json.contains("\\u"));
    }

    #[test]
    fn test_csv_export() {
        let csv = report().export_to_string(ExportFormat::Csv).unwrap();
        let mut lines = csv.lines();

        assert_eq!(
            lines.next(),
            Some("rank,ticker,name,sector,volatility,momentum,div_yield,score")
        );
        assert_eq!(
            lines.next(),
            Some("1,HUFV-A,Hufvudstaden A,Real Estate,14.2,3.0,2.85,68")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_export_to_file_replaces_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, "stale").unwrap();

        let report = report();
        report.export_to_file(&path, ExportFormat::PrettyJson).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        let parsed: RunReport = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed.stocks, report.stocks);
        assert!(!dir.path().join("data.json.tmp").exists());
    }

    #[test]
    fn test_export_to_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("data.json");

        let result = report().export_to_file(&path, ExportFormat::PrettyJson);
        assert!(matches!(result, Err(ExportError::InvalidPath { .. })));
        assert!(!path.exists());
    }

    #[test]
    fn test_ensure_writable() {
        let dir = tempfile::tempdir().unwrap();

        assert!(ensure_writable(&dir.path().join("out.json")).is_ok());
        assert!(ensure_writable(Path::new("data.json")).is_ok());
        assert!(ensure_writable(dir.path()).is_err());
    }

    #[test]
    fn test_staged_file_is_invisible_until_committed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");

        let staged = report().stage_file(&path, ExportFormat::PrettyJson).unwrap();
        assert_eq!(staged.target(), path);
        assert!(!path.exists());

        staged.commit().unwrap();
        assert!(path.exists());
        assert!(!dir.path().join("data.json.tmp").exists());
    }

    #[test]
    fn test_dropped_stage_leaves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("top.csv");

        let staged = report().stage_file(&path, ExportFormat::Csv).unwrap();
        drop(staged);

        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_format_extension() {
        assert_eq!(ExportFormat::Csv.extension(), "csv");
        assert_eq!(ExportFormat::PrettyJson.extension(), "json");
        assert_eq!(ExportFormat::PrettyJson.to_string(), "pretty json");
    }
}
