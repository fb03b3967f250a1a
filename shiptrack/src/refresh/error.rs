//! Error types for the shipment listing backend.

use thiserror::Error;

/// Errors that can occur when listing shipments from the backend.
#[derive(Debug, Error)]
pub enum ListingError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Backend answered with a non-success status.
    #[error("Unexpected status code: {0}")]
    UnexpectedStatus(u16),

    /// Response body was not a shipment list.
    #[error("JSON parse error: {0}")]
    JsonError(String),
}

impl From<reqwest::Error> for ListingError {
    fn from(err: reqwest::Error) -> Self {
        ListingError::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for ListingError {
    fn from(err: serde_json::Error) -> Self {
        ListingError::JsonError(err.to_string())
    }
}
