//! Error types for the ranking pipeline.

use thiserror::Error;

/// Errors raised while configuring or running a screen.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScreenError {
    /// The configuration is unusable.
    #[error("Invalid screen configuration: {0}")]
    InvalidConfig(String),

    /// Fewer valid securities than the requested output size.
    #[error("Only {observed} valid securities, need at least {required}")]
    UniverseTooSmall {
        /// Valid securities available
        observed: usize,
        /// Minimum required
        required: usize,
    },

    /// A filter stage removed every security.
    #[error("No securities left after the {stage} filter")]
    EmptyStage {
        /// Name of the stage that emptied the table
        stage: &'static str,
    },
}

impl ScreenError {
    /// Whether the error means "not enough data to rank", as opposed to a bad configuration.
    pub const fn is_insufficient_data(&self) -> bool {
        matches!(self, Self::UniverseTooSmall { .. } | Self::EmptyStage { .. })
    }
}
