#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/vaxholm/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod export;
pub mod report;
pub mod summary;

pub use export::{ExportError, ExportFormat, Exporter, StagedFile, ensure_writable};
pub use report::{RunReport, StockEntry};
pub use summary::{RunSummary, format_top_table};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
