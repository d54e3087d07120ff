//! Error types for repo-harness.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::session::SessionError;

/// Result type alias for harness operations.
pub type Result<T> = std::result::Result<T, HarnessError>;

/// Errors surfaced by the harness endpoints and server wiring.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    /// A configuration change was submitted but the matching change event
    /// never arrived.
    #[error("change event counter did not reach {target}, waited {waited_ms} msec")]
    AckTimeout {
        /// Counter value the wait needed to observe.
        target: u64,
        /// Total time waited, in milliseconds.
        waited_ms: u64,
    },

    /// A repository session call failed while producing a response.
    #[error("unable to output namespace mappings: {0}")]
    Repository(#[from] SessionError),

    /// Harness settings could not be loaded.
    #[error("failed to load harness settings: {0}")]
    Settings(String),

    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for HarnessError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request aborted");
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}
