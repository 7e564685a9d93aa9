//! Thordata API client error types.

use std::sync::Arc;

/// Errors from the Thordata SERP and Universal scraping APIs.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ThordataError {
    /// Authentication failed (invalid or revoked token).
    #[error("authentication failed: HTTP {status}")]
    AuthError { status: u16 },

    /// Rate limited or out of quota.
    #[error("rate limited: too many requests")]
    RateLimited,

    /// HTTP error response.
    #[error("HTTP error: {status}: {message}")]
    HttpError { status: u16, message: String },

    /// HTTP success carrying an application-level error payload.
    #[error("API error {code}: {message}")]
    Api { code: i64, message: String },

    /// Request timeout.
    #[error("request timeout: {message}")]
    Timeout {
        message: String,
        #[source]
        source: Option<Arc<reqwest::Error>>,
    },

    /// Network error.
    #[error("network error: {0}")]
    Network(#[source] Arc<reqwest::Error>),

    /// Response parse error.
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for ThordataError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ThordataError::Timeout { message: err.to_string(), source: Some(Arc::new(err)) }
        } else {
            ThordataError::Network(Arc::new(err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ThordataError::AuthError { status: 401 };
        assert!(err.to_string().contains("authentication failed"));

        let err = ThordataError::Api { code: 402, message: "insufficient balance".into() };
        assert_eq!(err.to_string(), "API error 402: insufficient balance");

        let err = ThordataError::Timeout { message: "operation timed out".into(), source: None };
        assert!(err.to_string().contains("operation timed out"));
    }
}
