//! Screen the ingested records and write the run's artifacts.
//!
//! Either every requested artifact is replaced or none is: a run that cannot
//! rank, or whose CSV cannot be written, leaves the previous files untouched.

use std::path::Path;
use vaxholm_output::{ExportFormat, Exporter, RunReport};
use vaxholm_screen::{ScreenError, ScreenOutcome, Screener, SecurityRecord};

/// Where the artifacts of a run go.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ArtifactPaths<'a> {
    pub json: &'a Path,
    pub csv: Option<&'a Path>,
}

/// Result of [`screen_and_publish`].
#[derive(Debug)]
pub(crate) enum Publication {
    /// The shortlist was written.
    Written(ScreenOutcome),
    /// Too little data to rank; nothing was written.
    Aborted(ScreenError),
}

pub(crate) fn screen_and_publish(
    screener: &Screener,
    records: Vec<SecurityRecord>,
    paths: ArtifactPaths<'_>,
) -> Result<Publication, Box<dyn std::error::Error>> {
    let outcome = match screener.screen(records) {
        Ok(outcome) => outcome,
        Err(e) if e.is_insufficient_data() => {
            tracing::info!(error = %e, "screen aborted, nothing written");
            return Ok(Publication::Aborted(e));
        }
        Err(e) => return Err(e.into()),
    };

    let report = RunReport::new(outcome.universe_count, &outcome.top);
    let json = report.stage_file(paths.json, ExportFormat::PrettyJson)?;
    let csv = paths
        .csv
        .map(|path| report.stage_file(path, ExportFormat::Csv))
        .transpose()?;

    json.commit()?;
    if let Some(csv) = csv {
        csv.commit()?;
    }
    Ok(Publication::Written(outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use vaxholm_screen::ScreenConfig;

    fn records(count: usize) -> Vec<SecurityRecord> {
        (0..count)
            .map(|i| {
                let x = i as f64;
                SecurityRecord::new(
                    format!("S{i}"),
                    format!("Security {i}"),
                    "Industrials",
                    10.0 + x,
                    20.0 - x,
                    1.0 + x / 10.0,
                )
            })
            .collect()
    }

    fn screener() -> Screener {
        Screener::new(ScreenConfig::default()).unwrap()
    }

    #[test]
    fn test_too_small_universe_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("data.json");
        let csv = dir.path().join("top.csv");
        let paths = ArtifactPaths {
            json: &json,
            csv: Some(&csv),
        };

        let publication = screen_and_publish(&screener(), records(5), paths).unwrap();

        assert!(matches!(
            publication,
            Publication::Aborted(ScreenError::UniverseTooSmall {
                observed: 5,
                required: 10
            })
        ));
        assert!(!json.exists());
        assert!(!csv.exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_abort_keeps_previous_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("data.json");
        fs::write(&json, "previous run").unwrap();
        let paths = ArtifactPaths {
            json: &json,
            csv: None,
        };

        let publication = screen_and_publish(&screener(), Vec::new(), paths).unwrap();

        assert!(matches!(publication, Publication::Aborted(_)));
        assert_eq!(fs::read_to_string(&json).unwrap(), "previous run");
    }

    #[test]
    fn test_valid_run_writes_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("data.json");
        let csv = dir.path().join("top.csv");
        let paths = ArtifactPaths {
            json: &json,
            csv: Some(&csv),
        };

        let publication = screen_and_publish(&screener(), records(12), paths).unwrap();
        let Publication::Written(outcome) = publication else {
            panic!("expected a written shortlist");
        };

        let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&json).unwrap()).unwrap();
        assert_eq!(value["universe_count"], 12);
        let stocks = value["stocks"].as_array().unwrap();
        assert_eq!(stocks.len(), outcome.top.len());
        assert_eq!(stocks[0]["rank"], 1);

        let csv_lines = fs::read_to_string(&csv).unwrap().lines().count();
        assert_eq!(csv_lines, outcome.top.len() + 1);
    }

    #[test]
    fn test_unwritable_csv_leaves_json_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("data.json");
        fs::write(&json, "previous run").unwrap();
        let csv = dir.path().join("missing").join("top.csv");
        let paths = ArtifactPaths {
            json: &json,
            csv: Some(&csv),
        };

        let result = screen_and_publish(&screener(), records(12), paths);

        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&json).unwrap(), "previous run");
        assert!(!dir.path().join("data.json.tmp").exists());
    }
}
