//! Error types for the Firestore gateway.

use thiserror::Error;

/// Errors surfaced by the Firestore REST gateway.
///
/// A 404 on a single-document read is not an error; it is returned as an
/// absence value (`Ok(None)`). Everything here is a genuine failure.
#[derive(Error, Debug)]
pub enum FirestoreError {
    /// Network-level failure, including the request timeout firing.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body could not be parsed as JSON.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Non-2xx, non-404 status from the remote service.
    #[error("Firestore returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Missing or invalid gateway configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl FirestoreError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }
}

/// Result type for Firestore gateway operations.
pub type FirestoreResult<T> = std::result::Result<T, FirestoreError>;
