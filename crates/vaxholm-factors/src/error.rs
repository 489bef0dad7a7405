//! Error types for metric computation.

use thiserror::Error;

/// Reasons a metric could not be computed for a security.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FactorError {
    /// Not enough observations in the input series.
    #[error("{factor}: need at least {required} observations, got {actual}")]
    InsufficientData {
        /// Factor that failed
        factor: &'static str,
        /// Observations required
        required: usize,
        /// Observations available
        actual: usize,
    },

    /// The reference price is zero or not a finite number.
    #[error("{factor}: invalid reference price {price}")]
    InvalidPrice {
        /// Factor that failed
        factor: &'static str,
        /// Offending price
        price: f64,
    },
}
