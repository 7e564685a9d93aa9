//! Universal scrape adapter.
//!
//! Fetches a page through the Universal scraping API and bounds the result:
//! HTML is cut to a fixed character count, screenshots pass through as bytes.

use async_trait::async_trait;
use bytes::Bytes;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thordata_core::coerce::{self, JsonObject};
use thordata_core::{AppConfig, CredentialResolver, Error, truncate_chars};

use super::{ToolAdapter, ToolOutput, schema_object};
use crate::target::parse_target;
use crate::thordata::{ClientConfig, ScrapePayload, ThordataClient, UniversalParams, VendorClient};

pub const TOOL_NAME: &str = "thordata_universal_scrape";

const TOOL_DESCRIPTION: &str = "Scrape a webpage through the Thordata Universal API and return its HTML content. \
     Automatically bypasses anti-bot protections. \
     Set jsRender=true for JavaScript-heavy pages, or outputFormat=png for a screenshot. \
     Use this when you need to read the content of a specific webpage.";

const CONTEXT: &str = "universal scrape failed";

/// Requested output of a scrape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Html,
    Png,
}

impl OutputFormat {
    /// Parse `html` or `png`, case-insensitively.
    pub fn parse(value: &str) -> Result<Self, Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "html" => Ok(OutputFormat::Html),
            "png" => Ok(OutputFormat::Png),
            _ => Err(Error::invalid_input(format!("outputFormat must be \"html\" or \"png\", got {value:?}"))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
            OutputFormat::Png => "png",
        }
    }
}

/// Typed scrape request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapeRequest {
    pub url: String,
    pub js_render: bool,
    pub output_format: OutputFormat,
    pub country: Option<String>,
    pub wait_for: Option<String>,
    /// Per-call HTML bound; never raises the adapter's own bound.
    pub max_chars: Option<usize>,
}

impl ScrapeRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into(), ..Default::default() }
    }

    /// Coerce a loose argument record into a typed request.
    pub fn from_args(args: &JsonObject) -> Result<Self, Error> {
        let url = coerce::required_str(args, &["url"])?;
        let output_format = match coerce::optional_str(args, &["outputFormat", "output_format"])? {
            Some(format) => OutputFormat::parse(&format)?,
            None => OutputFormat::default(),
        };
        let max_chars = coerce::optional_positive(args, &["maxChars", "max_chars", "max_length"])?
            .map(|n| usize::try_from(n).unwrap_or(usize::MAX));

        Ok(Self {
            url,
            js_render: coerce::optional_bool(args, &["jsRender", "js_render"])?.unwrap_or(false),
            output_format,
            country: coerce::non_empty(coerce::optional_str(args, &["country"])?),
            wait_for: coerce::non_empty(coerce::optional_str(args, &["waitFor", "wait_for"])?),
            max_chars,
        })
    }
}

/// Argument schema advertised to the agent framework.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeInput {
    /// The absolute http(s) URL of the webpage to scrape.
    pub url: String,

    /// Whether to render JavaScript with a headless browser (default false).
    #[serde(default)]
    pub js_render: Option<bool>,

    /// Output format: "html" (default) for page content or "png" for a screenshot.
    #[serde(default)]
    pub output_format: Option<OutputFormat>,

    /// Country code for a geo-targeted fetch (e.g., "us", "gb").
    #[serde(default)]
    pub country: Option<String>,

    /// CSS selector to wait for before capturing the page.
    #[serde(default)]
    pub wait_for: Option<String>,

    /// Maximum characters of HTML to return (capped by the server limit).
    #[serde(default)]
    pub max_chars: Option<u64>,
}

/// Bounded scrape output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrapeResult {
    /// HTML text, at most the effective character bound.
    Html { html: String, truncated: bool },
    /// Screenshot bytes, exactly as returned by the vendor.
    Png { data: Bytes },
}

impl ScrapeResult {
    pub fn output_format(&self) -> OutputFormat {
        match self {
            ScrapeResult::Html { .. } => OutputFormat::Html,
            ScrapeResult::Png { .. } => OutputFormat::Png,
        }
    }

    pub fn as_html(&self) -> Option<&str> {
        match self {
            ScrapeResult::Html { html, .. } => Some(html),
            ScrapeResult::Png { .. } => None,
        }
    }

    pub fn as_png(&self) -> Option<&Bytes> {
        match self {
            ScrapeResult::Png { data } => Some(data),
            ScrapeResult::Html { .. } => None,
        }
    }
}

/// Universal scrape adapter.
#[derive(Debug, Clone)]
pub struct ScrapeAdapter<C = ThordataClient> {
    client: C,
    max_html_chars: usize,
}

impl ScrapeAdapter<ThordataClient> {
    /// Build an adapter backed by the Thordata HTTP client.
    ///
    /// # Errors
    ///
    /// Returns `Error::MissingCredential` if the scraper token is not
    /// configured.
    pub fn from_config(config: &AppConfig) -> Result<Self, Error> {
        let credentials = CredentialResolver.resolve_from(config)?;
        let client = ThordataClient::new(credentials, ClientConfig::from(config))
            .map_err(|e| Error::upstream("failed to build Thordata client", e))?;

        Ok(Self::new(client).with_max_html_chars(config.max_html_chars))
    }
}

impl<C: VendorClient> ScrapeAdapter<C> {
    pub fn new(client: C) -> Self {
        Self { client, max_html_chars: AppConfig::default().max_html_chars }
    }

    /// Override the HTML character bound (minimum 1).
    pub fn with_max_html_chars(mut self, max_html_chars: usize) -> Self {
        self.max_html_chars = max_html_chars.max(1);
        self
    }

    pub fn max_html_chars(&self) -> usize {
        self.max_html_chars
    }

    /// Validate the request and build the vendor form body.
    fn build_params(&self, req: &ScrapeRequest) -> Result<(UniversalParams, usize), Error> {
        let url = parse_target(&req.url).map_err(|e| Error::invalid_input(format!("url: {e}")))?;

        let bound = match req.max_chars {
            None => self.max_html_chars,
            Some(0) => return Err(Error::invalid_input("maxChars must be a positive integer")),
            Some(n) => n.min(self.max_html_chars),
        };

        let params = UniversalParams {
            url: url.to_string(),
            output_type: req.output_format.as_str(),
            js_render: req.js_render,
            country: req.country.clone(),
            wait_for: req.wait_for.clone(),
        };

        Ok((params, bound))
    }

    /// Scrape one page.
    ///
    /// Input errors are returned before any network call. An empty payload, or
    /// one whose kind does not match the requested format, is an upstream
    /// error rather than an empty result.
    pub async fn invoke(&self, req: &ScrapeRequest) -> Result<ScrapeResult, Error> {
        let (params, bound) = self.build_params(req)?;

        let payload = self
            .client
            .universal_scrape(&params)
            .await
            .map_err(|e| Error::upstream(CONTEXT, e))?;

        normalize(req.output_format, payload, bound)
    }
}

/// Shape a vendor payload into the requested format, bounding HTML.
fn normalize(format: OutputFormat, payload: ScrapePayload, bound: usize) -> Result<ScrapeResult, Error> {
    match (format, payload) {
        (OutputFormat::Html, ScrapePayload::Text(text)) => {
            if text.is_empty() {
                return Err(Error::malformed(CONTEXT, "vendor returned an empty HTML payload"));
            }
            let cut = {
                let bounded = truncate_chars(&text, bound);
                bounded.truncated.then(|| bounded.text.into_owned())
            };
            Ok(match cut {
                Some(html) => ScrapeResult::Html { html, truncated: true },
                None => ScrapeResult::Html { html: text, truncated: false },
            })
        }
        (OutputFormat::Html, ScrapePayload::Binary(_)) => {
            Err(Error::malformed(CONTEXT, "vendor returned binary data for an HTML request"))
        }
        (OutputFormat::Png, ScrapePayload::Binary(data)) => {
            if data.is_empty() {
                return Err(Error::malformed(CONTEXT, "vendor returned an empty PNG payload"));
            }
            Ok(ScrapeResult::Png { data })
        }
        (OutputFormat::Png, ScrapePayload::Text(_)) => {
            Err(Error::malformed(CONTEXT, "vendor returned text for a PNG request"))
        }
    }
}

#[async_trait]
impl<C: VendorClient> ToolAdapter for ScrapeAdapter<C> {
    fn name(&self) -> &'static str {
        TOOL_NAME
    }

    fn description(&self) -> &'static str {
        TOOL_DESCRIPTION
    }

    fn input_schema(&self) -> JsonObject {
        schema_object::<ScrapeInput>()
    }

    async fn invoke_value(&self, args: JsonObject) -> Result<ToolOutput, Error> {
        let req = ScrapeRequest::from_args(&args)?;
        match self.invoke(&req).await? {
            ScrapeResult::Html { html, truncated } => {
                if truncated {
                    tracing::debug!(url = %req.url, bound = self.max_html_chars, "HTML truncated");
                }
                Ok(ToolOutput::Text(html))
            }
            ScrapeResult::Png { data } => Ok(ToolOutput::Image { data, mime_type: "image/png" }),
        }
    }
}
