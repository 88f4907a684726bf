//! Gateway error types
//!
//! Transport failures (the request never produced a usable response) are kept
//! apart from application-level failures so the views can show
//! "could not connect" for the former and an operation-specific message for
//! the latter.

use thiserror::Error;

/// Errors talking to the remote endpoints
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Request timed out
    #[error("Request timed out")]
    Timeout,

    /// Could not reach the endpoint
    #[error("Endpoint unavailable")]
    Unavailable,

    /// Other transport failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// Endpoint answered with an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body was not the expected JSON
    #[error("Decode error: {0}")]
    Decode(String),
}

impl GatewayError {
    /// Whether the failure happened below the application layer
    pub fn is_connection_failure(&self) -> bool {
        matches!(
            self,
            GatewayError::Timeout | GatewayError::Unavailable | GatewayError::Transport(_)
        )
    }
}

#[cfg(feature = "native")]
impl From<reqwest::Error> for GatewayError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            GatewayError::Timeout
        } else if e.is_connect() {
            GatewayError::Unavailable
        } else if e.is_decode() {
            GatewayError::Decode(e.to_string())
        } else {
            GatewayError::Transport(e.to_string())
        }
    }
}

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;
