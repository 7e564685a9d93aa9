//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Largest HTML bound accepted from configuration (characters).
const MAX_HTML_CHARS_LIMIT: usize = 5_000_000;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `max_html_chars` is 0 or exceeds 5 million
    /// - `default_num_results` is 0 or above `max_num_results`
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `user_agent` is empty
    /// - either base URL is not an absolute http(s) URL
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_html_chars == 0 {
            return Err(ConfigError::Invalid {
                field: "max_html_chars".into(),
                reason: "must be greater than 0".into(),
            });
        }
        if self.max_html_chars > MAX_HTML_CHARS_LIMIT {
            return Err(ConfigError::Invalid {
                field: "max_html_chars".into(),
                reason: format!("must not exceed {MAX_HTML_CHARS_LIMIT}"),
            });
        }

        if self.max_num_results == 0 {
            return Err(ConfigError::Invalid {
                field: "max_num_results".into(),
                reason: "must be greater than 0".into(),
            });
        }
        if self.default_num_results == 0 || self.default_num_results > self.max_num_results {
            return Err(ConfigError::Invalid {
                field: "default_num_results".into(),
                reason: format!("must be between 1 and {}", self.max_num_results),
            });
        }

        if self.timeout_ms < 100 {
            return Err(ConfigError::Invalid { field: "timeout_ms".into(), reason: "must be at least 100ms".into() });
        }
        if self.timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        validate_base_url("serp_base_url", &self.serp_base_url)?;
        validate_base_url("universal_base_url", &self.universal_base_url)?;

        if self.scraper_token.is_none() {
            tracing::debug!("THORDATA_SCRAPER_TOKEN not set; adapters cannot be constructed");
        }

        Ok(())
    }
}

fn validate_base_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let parsed =
        url::Url::parse(value).map_err(|e| ConfigError::Invalid { field: field.into(), reason: e.to_string() })?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(ConfigError::Invalid { field: field.into(), reason: format!("unsupported scheme: {scheme}") }),
    }
}
