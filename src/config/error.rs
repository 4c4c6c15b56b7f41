//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid timeout for {0}: must be between 1 and 300 seconds")]
    InvalidTimeout(&'static str),

    #[error("Invalid limit for {field}: must be between 1 and {max}")]
    InvalidLimit { field: &'static str, max: u64 },

    #[error("Provider max results must be at least the number of options shown")]
    ProviderResultsBelowShown,

    #[error("Invalid currency code: {0}")]
    InvalidCurrency(String),

    #[error("Document base URL must start with http:// or https://")]
    InvalidBaseUrl,
}
