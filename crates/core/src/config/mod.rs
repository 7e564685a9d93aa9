//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (THORDATA_*)
//! 2. TOML override file (if THORDATA_CONFIG_FILE set)
//! 3. Built-in defaults

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Environment variable naming the TOML override file.
pub const CONFIG_FILE_VAR: &str = "THORDATA_CONFIG_FILE";

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (THORDATA_*)
/// 2. TOML override file (if THORDATA_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Token for the SERP and Universal scraping APIs.
    ///
    /// Set via THORDATA_SCRAPER_TOKEN. Required to build either adapter.
    #[serde(default)]
    pub scraper_token: Option<String>,

    /// Public API token (account-level endpoints).
    ///
    /// Set via THORDATA_PUBLIC_TOKEN.
    #[serde(default)]
    pub public_token: Option<String>,

    /// Public API key (account-level endpoints).
    ///
    /// Set via THORDATA_PUBLIC_KEY.
    #[serde(default)]
    pub public_key: Option<String>,

    /// Hard upper bound on characters of HTML returned by a scrape.
    ///
    /// Set via THORDATA_MAX_HTML_CHARS.
    #[serde(default = "default_max_html_chars")]
    pub max_html_chars: usize,

    /// Number of search results requested when the caller gives none.
    #[serde(default = "default_num_results")]
    pub default_num_results: u32,

    /// Requested result counts above this are clamped to it.
    #[serde(default = "default_max_num_results")]
    pub max_num_results: u32,

    /// Vendor request timeout in milliseconds.
    ///
    /// Set via THORDATA_TIMEOUT_MS.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// User-Agent string for vendor requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// SERP API endpoint.
    #[serde(default = "default_serp_base_url")]
    pub serp_base_url: String,

    /// Universal scraping API endpoint.
    #[serde(default = "default_universal_base_url")]
    pub universal_base_url: String,
}

fn default_max_html_chars() -> usize {
    50_000
}

fn default_num_results() -> u32 {
    10
}

fn default_max_num_results() -> u32 {
    100
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_user_agent() -> String {
    concat!("thordata-mcp/", env!("CARGO_PKG_VERSION")).into()
}

fn default_serp_base_url() -> String {
    "https://scraperapi.thordata.com".into()
}

fn default_universal_base_url() -> String {
    "https://universalapi.thordata.com".into()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            scraper_token: None,
            public_token: None,
            public_key: None,
            max_html_chars: default_max_html_chars(),
            default_num_results: default_num_results(),
            max_num_results: default_max_num_results(),
            timeout_ms: default_timeout_ms(),
            user_agent: default_user_agent(),
            serp_base_url: default_serp_base_url(),
            universal_base_url: default_universal_base_url(),
        }
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn redact(v: &Option<String>) -> &'static str {
            if v.is_some() { "<redacted>" } else { "<unset>" }
        }

        f.debug_struct("AppConfig")
            .field("scraper_token", &redact(&self.scraper_token))
            .field("public_token", &redact(&self.public_token))
            .field("public_key", &redact(&self.public_key))
            .field("max_html_chars", &self.max_html_chars)
            .field("default_num_results", &self.default_num_results)
            .field("max_num_results", &self.max_num_results)
            .field("timeout_ms", &self.timeout_ms)
            .field("user_agent", &self.user_agent)
            .field("serp_base_url", &self.serp_base_url)
            .field("universal_base_url", &self.universal_base_url)
            .finish()
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - The override file cannot be read or parsed
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var(CONFIG_FILE_VAR) {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(Env::prefixed("THORDATA_").map(|key| key.as_str().to_lowercase().into()));

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}
