//! Error types for rate-limit-probe

use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required credential is missing or empty
    #[error("missing credential: {0}")]
    MissingCredential(&'static str),

    /// Invalid request count
    #[error("Invalid request count: {0}")]
    InvalidRequestCount(String),

    /// Invalid concurrency value
    #[error("Invalid concurrency: {0}")]
    InvalidConcurrency(String),

    /// Invalid endpoint path
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

/// Errors from the vendor authentication exchange
///
/// Every variant is fatal: no probe request can be made without a token.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Network failure while talking to the auth endpoint
    #[error("authentication request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The auth endpoint answered with a non-success status
    #[error("authentication rejected ({status}): {body}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Response body, if any
        body: String,
    },

    /// The response body carried no usable `token` field
    #[error("authentication response did not contain a token")]
    MissingToken,
}

impl AuthError {
    /// HTTP status of a rejected exchange, if there was one
    pub fn status(&self) -> Option<u16> {
        match self {
            AuthError::Rejected { status, .. } => Some(*status),
            AuthError::Http(e) => e.status().map(|s| s.as_u16()),
            AuthError::MissingToken => None,
        }
    }
}

/// Failure below the HTTP-response level: no status code was obtained
#[derive(Debug, Error)]
pub enum TransportError {
    /// Error raised by the HTTP client (connect, timeout, protocol)
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// Connection-level failure from a `ProbeTarget` that is not backed by
    /// reqwest, such as an in-process mock or a custom transport
    #[error("connection error: {0}")]
    Connection(String),
}
