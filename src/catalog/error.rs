//! Error taxonomy for the catalog transport layer.

use thiserror::Error;

/// Classified failure from the backend API.
///
/// The split drives caller behavior: network and server errors are worth
/// retrying, client errors are not (the criteria or resource is wrong), and
/// 404 gets its own variant so callers can show "not found" instead of a
/// generic failure.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// No HTTP status was reachable (DNS failure, refused connection, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// 4xx response other than 404. Not retried.
    #[error("request rejected (status {status}): {message}")]
    Client { status: u16, message: String },

    /// 5xx response. The transport retries these with backoff before
    /// surfacing the error.
    #[error("server error (status {0})")]
    Server(u16),

    /// 404 specialization of a client error.
    #[error("{resource} not found")]
    NotFound { resource: String },

    /// The backend answered 200 but the body could not be decoded or carried
    /// `success: false` without a usable payload.
    #[error("invalid response from backend: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// Classifies an HTTP status code, using `message` for client errors and
    /// `resource` for the 404 variant.
    pub fn from_status(status: u16, message: String, resource: &str) -> Self {
        match status {
            404 => ApiError::NotFound { resource: resource.to_string() },
            400..=499 => ApiError::Client { status, message },
            _ => ApiError::Server(status),
        }
    }

    /// True when a retry action makes sense for the user.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApiError::Network(_) | ApiError::Server(_))
    }

    /// True when the failure may stem from the criteria themselves, so the
    /// caller should also offer to reset filters. An overly narrow criteria
    /// set is indistinguishable from a genuine zero-result state.
    pub fn suggests_filter_reset(&self) -> bool {
        matches!(self, ApiError::Client { .. } | ApiError::NotFound { .. })
    }

    /// One-line action hint for the user.
    pub fn hint(&self) -> &'static str {
        if self.is_retryable() {
            "Try again in a moment."
        } else if self.suggests_filter_reset() {
            "Check the request, or run `perks-cli filter clear` to reset filters."
        } else {
            "The backend sent an unexpected response."
        }
    }
}
