//! Unified error types for the Thordata tool adapters.
//!
//! Validation failures are raised before any network call; vendor failures
//! always keep the originating error as their `source()`.

use rmcp::model::{ErrorCode, ErrorData as McpError};

use crate::config::ConfigError;

/// Boxed vendor-side cause attached to [`Error::Upstream`].
pub type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Unified error types for the adapters.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required credential is absent or empty (construction time).
    #[error("MISSING_CREDENTIAL: {var} is not set")]
    MissingCredential { var: &'static str },

    /// A caller-supplied field violates a stated constraint (call time).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// The vendor call failed or returned unusable data.
    #[error("UPSTREAM_ERROR: {context}: {source}")]
    Upstream {
        context: String,
        #[source]
        source: BoxedCause,
    },

    /// Configuration could not be loaded or failed validation.
    #[error("CONFIG_ERROR: {0}")]
    Config(#[from] ConfigError),
}

/// Vendor response that was delivered but cannot be used.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct MalformedResponse(pub String);

impl Error {
    /// Wrap a vendor-side failure, keeping it as the error source.
    pub fn upstream<E>(context: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Upstream { context: context.into(), source: Box::new(source) }
    }

    /// Upstream failure for a response that arrived but was unusable.
    pub fn malformed(context: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::upstream(context, MalformedResponse(detail.into()))
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let code = match &err {
            Error::InvalidInput(_) => -32602,
            Error::MissingCredential { .. } => -32001,
            Error::Upstream { .. } => -32002,
            Error::Config(_) => -32003,
        };

        McpError { code: ErrorCode(code), message: err.to_string().into(), data: None }
    }
}
