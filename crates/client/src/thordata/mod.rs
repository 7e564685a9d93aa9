//! Thordata API client.
//!
//! ### Endpoints
//!
//! - **SERP**: `POST {serp_base_url}/request`, form body, JSON response.
//! - **Universal**: `POST {universal_base_url}/request`, form body, JSON
//!   envelope (`{code, html}` or `{code, png}`) or a raw body.
//! - **Authentication**: `Authorization: Bearer {scraper_token}`.
//!
//! One HTTP round-trip per call. Retries are left to the caller.

pub mod error;
pub mod request;
pub mod response;

pub use error::ThordataError;
pub use request::{SerpParams, UniversalParams, search_type_code};
pub use response::ScrapePayload;

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header;
use serde_json::{Map, Value};
use thordata_core::{AppConfig, Credentials, truncate_chars};

/// Longest error body snippet kept in `ThordataError::HttpError`.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// The vendor surface the adapters call.
///
/// Implementations must be reentrant: adapters may be invoked concurrently.
#[async_trait]
pub trait VendorClient: Send + Sync {
    /// Run one SERP query and return the vendor's JSON object.
    async fn serp_search(&self, params: &SerpParams) -> Result<Map<String, Value>, ThordataError>;

    /// Fetch one page through the Universal scraping API.
    async fn universal_scrape(&self, params: &UniversalParams) -> Result<ScrapePayload, ThordataError>;
}

/// Thordata client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// SERP API base URL.
    pub serp_base_url: String,
    /// Universal scraping API base URL.
    pub universal_base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// User-agent string.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for ClientConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            serp_base_url: config.serp_base_url.trim_end_matches('/').to_string(),
            universal_base_url: config.universal_base_url.trim_end_matches('/').to_string(),
            timeout: config.timeout(),
            user_agent: config.user_agent.clone(),
        }
    }
}

/// reqwest-backed Thordata client.
#[derive(Debug, Clone)]
pub struct ThordataClient {
    http: reqwest::Client,
    config: ClientConfig,
    credentials: Arc<Credentials>,
}

impl ThordataClient {
    /// Create a new client from resolved credentials.
    pub fn new(credentials: Credentials, config: ClientConfig) -> Result<Self, ThordataError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| ThordataError::Network(Arc::new(e)))?;

        Ok(Self { http, config, credentials: Arc::new(credentials) })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn post_form<T: serde::Serialize + ?Sized>(
        &self, endpoint: &str, form: &T,
    ) -> Result<reqwest::Response, ThordataError> {
        let response = self
            .http
            .post(endpoint)
            .bearer_auth(self.credentials.scraper_token())
            .form(form)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(endpoint, status = status.as_u16(), "Thordata API response");

        if status == 401 || status == 403 {
            return Err(ThordataError::AuthError { status: status.as_u16() });
        }

        if status == 429 {
            return Err(ThordataError::RateLimited);
        }

        if status.is_client_error() || status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            let message = truncate_chars(body.trim(), MAX_ERROR_BODY_CHARS).text.into_owned();
            return Err(ThordataError::HttpError { status: status.as_u16(), message });
        }

        Ok(response)
    }
}

#[async_trait]
impl VendorClient for ThordataClient {
    async fn serp_search(&self, params: &SerpParams) -> Result<Map<String, Value>, ThordataError> {
        let start = Instant::now();
        let endpoint = format!("{}/request", self.config.serp_base_url);

        tracing::debug!(engine = %params.engine, num = params.num, "searching Thordata SERP API");

        let bytes = self.post_form(&endpoint, params).await?.bytes().await?;
        let map = response::parse_serp(&bytes)?;

        let organic = map.get("organic").and_then(Value::as_array).map_or(0, Vec::len);
        tracing::debug!(elapsed_ms = start.elapsed().as_millis() as u64, organic, "SERP search completed");

        Ok(map)
    }

    async fn universal_scrape(&self, params: &UniversalParams) -> Result<ScrapePayload, ThordataError> {
        let start = Instant::now();
        let endpoint = format!("{}/request", self.config.universal_base_url);

        tracing::debug!(
            url = %params.url,
            output = params.output_type,
            js_render = params.js_render,
            "scraping via Thordata Universal API"
        );

        let response = self.post_form(&endpoint, params).await?;
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await?;

        let payload = response::parse_universal(content_type.as_deref(), bytes)?;
        if payload.is_empty() {
            tracing::warn!(url = %params.url, "Thordata Universal API returned an empty body");
        }

        tracing::debug!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            bytes = payload.len(),
            "universal scrape completed"
        );

        Ok(payload)
    }
}
