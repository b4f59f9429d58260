//! Error types
//!
//! `ApiError` covers hard failures: configuration defects, malformed provider
//! setup, unknown entities on batch calls, and CLI output failures. Expected
//! environmental failures inside a tier never become an `ApiError`; they are
//! carried as soft failures on the resolution outcome instead.

use thiserror::Error;

/// Crate-wide error for hard (non-recoverable) failures.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Unknown entity: {0}")]
    UnknownEntity(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

/// Failure to turn raw content into a structured value.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("table has no header row")]
    EmptyTable,

    #[error("invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("{0}")]
    Custom(String),
}
