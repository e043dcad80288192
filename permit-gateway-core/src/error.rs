//! Error types for the gateway core

use thiserror::Error;

/// Errors raised while preparing or performing a Permit.io call
#[derive(Error, Debug)]
pub enum GatewayError {
    /// One or more required configuration values are absent or empty
    #[error("Permit.io configuration is incomplete (missing: {})", missing.join(", "))]
    IncompleteConfig {
        /// Names of the missing environment variables
        missing: Vec<&'static str>,
    },

    /// Transport-level failure talking to Permit.io
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Permit.io answered with a non-success status
    #[error("Permit.io returned {status}: {body}")]
    UpstreamStatus {
        /// HTTP status code returned upstream
        status: u16,
        /// Raw response body, kept for the server log
        body: String,
    },

    /// Response body was not valid JSON
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Configured base URL could not be used to build a request URL
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),
}

/// Result type alias for gateway core operations
pub type Result<T> = std::result::Result<T, GatewayError>;
