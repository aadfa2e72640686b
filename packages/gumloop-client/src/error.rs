//! Error types for the Gumloop client.

use thiserror::Error;

/// Result type for Gumloop client operations.
pub type Result<T> = std::result::Result<T, GumloopError>;

/// Gumloop client errors.
#[derive(Debug, Clone, Error)]
pub enum GumloopError {
    /// Network error (connection refused, timeout, TLS)
    #[error("Network error: {0}")]
    Network(String),

    /// API error (non-2xx response)
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Parse error (invalid JSON, unexpected response format)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl GumloopError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Api { status, .. } if *status >= 500)
    }
}
