//! Error handling for the drill service

use std::time::Duration;

use thiserror::Error;

/// Service error types
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Invalid input: {0}")]
    Input(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Sampler error: {0}")]
    Core(#[from] drill_core::CoreError),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ServiceError {
    /// Stable tag for the error category, used in JSON error output.
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::Input(_) => "bad_request",
            ServiceError::NotFound(_) => "not_found",
            ServiceError::Config(_) => "config_error",
            ServiceError::Provider(_) => "provider_error",
            ServiceError::Store(_) => "store_error",
            ServiceError::Timeout(_) => "timeout",
            ServiceError::Io(_) => "io_error",
            ServiceError::Core(_) | ServiceError::Json(_) => "internal_error",
        }
    }
}

/// Result type alias for service operations
pub type Result<T> = std::result::Result<T, ServiceError>;
