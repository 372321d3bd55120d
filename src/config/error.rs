//! Configuration error types.

use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Trailing window must not exceed the eviction horizon")]
    WindowExceedsHorizon,

    #[error("Eviction horizon must be positive")]
    ZeroHorizon,

    #[error("Default currency must be a 3-letter ISO code")]
    InvalidCurrency,
}
