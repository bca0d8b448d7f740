//! Error types for the CommunityConnect client

use thiserror::Error;

/// Errors that can occur when talking to the portal backend
#[derive(Debug, Error)]
pub enum ClientError {
    /// The session lacks the admin flag; no request was sent
    #[error("Forbidden: {0} requires an admin session")]
    Forbidden(&'static str),

    /// HTTP request failed before a response arrived
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Response parsing failed
    #[error("Response parsing failed: {0}")]
    ResponseParseFailed(String),

    /// Backend answered with a non-success status
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Message from the response body, or the raw body
        message: String,
    },
}

impl ClientError {
    /// Whether the backend reported the resource as missing.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::ApiError { status: 404, .. })
    }
}
