//! Error types for drill-core.

use thiserror::Error;

/// Result type alias using CoreError.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised when a component is configured with unusable parameters.
///
/// Data problems (malformed rows, short lyrics, empty collections) are not
/// errors; components skip, retry or fall back instead.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("invalid score range: min {min} must be finite and below max {max}")]
    InvalidScoreRange { min: f64, max: f64 },

    #[error("invalid max weight {0}: must be finite and at least 1")]
    InvalidMaxWeight(f64),

    #[error("sampler needs at least one attempt")]
    NoAttempts,
}
