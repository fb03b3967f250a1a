//! Error types for tracking lookups.

use thiserror::Error;

/// Errors from a single tracking lookup.
///
/// These never escape the cache; they are absorbed into negative entries.
#[derive(Debug, Error)]
pub enum LookupError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// The lookup source answered with an unexpected status code.
    #[error("Unexpected HTTP status: {0}")]
    UnexpectedStatus(u16),

    /// JSON deserialization failed.
    #[error("Failed to parse tracking response: {0}")]
    JsonError(String),
}

impl From<reqwest::Error> for LookupError {
    fn from(e: reqwest::Error) -> Self {
        LookupError::HttpError(e.to_string())
    }
}

impl From<serde_json::Error> for LookupError {
    fn from(e: serde_json::Error) -> Self {
        LookupError::JsonError(e.to_string())
    }
}
