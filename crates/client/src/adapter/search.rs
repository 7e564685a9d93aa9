//! SERP search adapter.
//!
//! Validates a search request, forwards it to the SERP API, and returns the
//! vendor's JSON untouched apart from guaranteeing an `organic` list.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thordata_core::coerce::{self, JsonObject};
use thordata_core::{AppConfig, CredentialResolver, Error};

use super::{ToolAdapter, ToolOutput, schema_object};
use crate::thordata::{ClientConfig, SerpParams, ThordataClient, VendorClient, search_type_code};

pub const TOOL_NAME: &str = "thordata_serp_search";

const TOOL_DESCRIPTION: &str = "Search the web using the Thordata SERP API. \
     Supports Google, Bing, Yandex, DuckDuckGo, and Baidu. \
     Returns structured search results including titles, links, and snippets. \
     Use this when you need to find information on the web.";

/// Search engines with first-class support. Anything else is forwarded as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Engine {
    #[default]
    Google,
    Bing,
    Yandex,
    DuckDuckGo,
    Baidu,
    Other(String),
}

impl Engine {
    /// Parse an engine name. Blank input selects the default engine.
    pub fn parse(name: &str) -> Self {
        let trimmed = name.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "" | "google" => Engine::Google,
            "bing" => Engine::Bing,
            "yandex" => Engine::Yandex,
            "duckduckgo" => Engine::DuckDuckGo,
            "baidu" => Engine::Baidu,
            _ => Engine::Other(trimmed.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Engine::Google => "google",
            Engine::Bing => "bing",
            Engine::Yandex => "yandex",
            Engine::DuckDuckGo => "duckduckgo",
            Engine::Baidu => "baidu",
            Engine::Other(name) => name,
        }
    }
}

/// Typed search request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub engine: Engine,
    /// Requested result count; `None` uses the adapter default.
    pub num_results: Option<u32>,
    pub location: Option<String>,
    pub search_type: Option<String>,
    pub country: Option<String>,
    pub language: Option<String>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self { query: query.into(), ..Default::default() }
    }

    /// Coerce a loose argument record into a typed request.
    ///
    /// Blank optional strings count as absent. `numResults` must be a
    /// positive integer when present.
    pub fn from_args(args: &JsonObject) -> Result<Self, Error> {
        let query = coerce::required_str(args, &["query", "q"])?;
        let engine = coerce::optional_str(args, &["engine"])?
            .map(|e| Engine::parse(&e))
            .unwrap_or_default();
        let num_results = coerce::optional_positive(args, &["numResults", "num_results", "num"])?
            .map(|n| u32::try_from(n).unwrap_or(u32::MAX));

        Ok(Self {
            query,
            engine,
            num_results,
            location: coerce::non_empty(coerce::optional_str(args, &["location"])?),
            search_type: coerce::non_empty(coerce::optional_str(args, &["searchType", "search_type"])?),
            country: coerce::non_empty(coerce::optional_str(args, &["country"])?),
            language: coerce::non_empty(coerce::optional_str(args, &["language"])?),
        })
    }
}

/// Argument schema advertised to the agent framework.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchInput {
    /// The search query/keywords to search for.
    pub query: String,

    /// Search engine: google (default), bing, yandex, duckduckgo, baidu.
    #[serde(default)]
    pub engine: Option<String>,

    /// Number of results to return (positive integer, default 10, max 100).
    #[serde(default)]
    pub num_results: Option<u32>,

    /// Location for localized results (e.g., "Austin, Texas").
    #[serde(default)]
    pub location: Option<String>,

    /// Type of search: images, news, shopping, videos.
    #[serde(default)]
    pub search_type: Option<String>,

    /// Country code for localized results (e.g., "us", "gb").
    #[serde(default)]
    pub country: Option<String>,

    /// Language code for results (e.g., "en", "es").
    #[serde(default)]
    pub language: Option<String>,
}

/// Vendor SERP JSON, passed through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SearchResult(Map<String, Value>);

impl SearchResult {
    /// Wrap a vendor object, inserting an empty `organic` list if the vendor
    /// omitted one.
    pub fn from_vendor(mut map: Map<String, Value>) -> Result<Self, Error> {
        match map.get("organic") {
            None | Some(Value::Null) => {
                map.insert("organic".into(), Value::Array(Vec::new()));
            }
            Some(Value::Array(_)) => {}
            Some(_) => return Err(Error::malformed("SERP search failed", "`organic` is not a list")),
        }
        Ok(Self(map))
    }

    /// The raw `organic` entries.
    pub fn organic(&self) -> &[Value] {
        self.0
            .get("organic")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

/// SERP search adapter.
#[derive(Debug, Clone)]
pub struct SearchAdapter<C = ThordataClient> {
    client: C,
    default_num_results: u32,
    max_num_results: u32,
}

impl SearchAdapter<ThordataClient> {
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

        Ok(Self::new(client).with_limits(config.default_num_results, config.max_num_results))
    }
}

impl<C: VendorClient> SearchAdapter<C> {
    pub fn new(client: C) -> Self {
        let defaults = AppConfig::default();
        Self { client, default_num_results: defaults.default_num_results, max_num_results: defaults.max_num_results }
    }

    /// Override the default and maximum result counts.
    pub fn with_limits(mut self, default_num_results: u32, max_num_results: u32) -> Self {
        self.max_num_results = max_num_results.max(1);
        self.default_num_results = default_num_results.clamp(1, self.max_num_results);
        self
    }

    /// Validate the request and build the vendor form body.
    fn build_params(&self, req: &SearchRequest) -> Result<SerpParams, Error> {
        if req.query.trim().is_empty() {
            return Err(Error::invalid_input("query cannot be empty"));
        }

        let num = match req.num_results {
            None => self.default_num_results,
            Some(0) => return Err(Error::invalid_input("numResults must be a positive integer")),
            Some(n) => n.min(self.max_num_results),
        };

        let mut params = SerpParams::new(req.engine.as_str(), req.query.clone(), num);
        params.gl = req.country.clone();
        params.hl = req.language.clone();
        params.location = req.location.clone();
        params.tbm = req.search_type.as_deref().map(search_type_code);

        Ok(params)
    }

    /// Run one search.
    ///
    /// Input errors are returned before any network call. Vendor failures are
    /// wrapped in `Error::Upstream` with the vendor error as source.
    pub async fn invoke(&self, req: &SearchRequest) -> Result<SearchResult, Error> {
        let params = self.build_params(req)?;

        let map = self
            .client
            .serp_search(&params)
            .await
            .map_err(|e| Error::upstream("SERP search failed", e))?;

        SearchResult::from_vendor(map)
    }
}

#[async_trait]
impl<C: VendorClient> ToolAdapter for SearchAdapter<C> {
    fn name(&self) -> &'static str {
        TOOL_NAME
    }

    fn description(&self) -> &'static str {
        TOOL_DESCRIPTION
    }

    fn input_schema(&self) -> JsonObject {
        schema_object::<SearchInput>()
    }

    async fn invoke_value(&self, args: JsonObject) -> Result<ToolOutput, Error> {
        let req = SearchRequest::from_args(&args)?;
        let result = self.invoke(&req).await?;
        Ok(ToolOutput::Json(Value::Object(result.into_inner())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thordata::{ScrapePayload, ThordataError, UniversalParams};
    use serde_json::json;
    use std::error::Error as _;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Vendor double recording every SERP call.
    struct FakeVendor {
        calls: AtomicUsize,
        last: Mutex<Option<SerpParams>>,
        reply: Result<Value, ThordataError>,
    }

    impl FakeVendor {
        fn replying(reply: Result<Value, ThordataError>) -> Self {
            Self { calls: AtomicUsize::new(0), last: Mutex::new(None), reply }
        }

        fn ok() -> Self {
            Self::replying(Ok(json!({
                "organic": [
                    {"position": 1, "title": "Test Result", "link": "https://example.com"}
                ],
                "related_searches": [{"query": "more"}]
            })))
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn last(&self) -> SerpParams {
            self.last.lock().unwrap().clone().expect("vendor was called")
        }
    }

    #[async_trait]
    impl VendorClient for FakeVendor {
        async fn serp_search(&self, params: &SerpParams) -> Result<Map<String, Value>, ThordataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last.lock().unwrap() = Some(params.clone());
            match &self.reply {
                Ok(Value::Object(map)) => Ok(map.clone()),
                Ok(_) => Err(ThordataError::Parse("not an object".into())),
                Err(e) => Err(e.clone()),
            }
        }

        async fn universal_scrape(&self, _params: &UniversalParams) -> Result<ScrapePayload, ThordataError> {
            unreachable!("search adapter never scrapes")
        }
    }

    fn args(value: Value) -> JsonObject {
        match value {
            Value::Object(map) => map,
            _ => panic!("test args must be an object"),
        }
    }

    #[tokio::test]
    async fn test_invoke_success() {
        let adapter = SearchAdapter::new(FakeVendor::ok());
        let req = SearchRequest { engine: Engine::Google, num_results: Some(5), ..SearchRequest::new("test query") };

        let result = adapter.invoke(&req).await.unwrap();
        assert_eq!(result.organic().len(), 1);
        assert_eq!(result.organic()[0]["title"], "Test Result");
        assert_eq!(result.organic()[0]["position"], 1);
        assert!(result.get("related_searches").is_some());
        assert_eq!(adapter.client.calls(), 1);

        let sent = adapter.client.last();
        assert_eq!(sent.engine, "google");
        assert_eq!(sent.q, "test query");
        assert_eq!(sent.num, 5);
    }

    #[tokio::test]
    async fn test_blank_query_makes_no_call() {
        let adapter = SearchAdapter::new(FakeVendor::ok());

        for query in ["", " ", "\t\n  "] {
            let result = adapter.invoke(&SearchRequest::new(query)).await;
            assert!(matches!(result, Err(Error::InvalidInput(_))), "query {query:?} should be rejected");
        }
        assert_eq!(adapter.client.calls(), 0);
    }

    #[tokio::test]
    async fn test_zero_num_results_rejected() {
        let adapter = SearchAdapter::new(FakeVendor::ok());
        let req = SearchRequest { num_results: Some(0), ..SearchRequest::new("rust") };

        assert!(matches!(adapter.invoke(&req).await, Err(Error::InvalidInput(_))));
        assert_eq!(adapter.client.calls(), 0);
    }

    #[tokio::test]
    async fn test_loose_num_results_rejected() {
        let adapter = SearchAdapter::new(FakeVendor::ok());

        for num in [json!(0), json!(-3), json!(2.5), json!("ten"), json!(true), json!([5])] {
            let result = adapter.invoke_value(args(json!({"query": "rust", "numResults": num}))).await;
            assert!(matches!(result, Err(Error::InvalidInput(_))), "numResults {num} should be rejected");
        }
        assert_eq!(adapter.client.calls(), 0);
    }

    #[tokio::test]
    async fn test_defaults_and_clamping() {
        let adapter = SearchAdapter::new(FakeVendor::ok()).with_limits(10, 100);

        adapter.invoke(&SearchRequest::new("rust")).await.unwrap();
        assert_eq!(adapter.client.last().num, 10);

        let req = SearchRequest { num_results: Some(500), ..SearchRequest::new("rust") };
        adapter.invoke(&req).await.unwrap();
        assert_eq!(adapter.client.last().num, 100);
    }

    #[tokio::test]
    async fn test_engine_passthrough_and_default() {
        let adapter = SearchAdapter::new(FakeVendor::ok());

        adapter
            .invoke_value(args(json!({"query": "rust", "engine": "naver"})))
            .await
            .unwrap();
        assert_eq!(adapter.client.last().engine, "naver");

        adapter
            .invoke_value(args(json!({"query": "rust", "engine": ""})))
            .await
            .unwrap();
        assert_eq!(adapter.client.last().engine, "google");

        adapter
            .invoke_value(args(json!({"query": "rust", "engine": "DuckDuckGo"})))
            .await
            .unwrap();
        assert_eq!(adapter.client.last().engine, "duckduckgo");
    }

    #[tokio::test]
    async fn test_optional_fields_forwarded() {
        let adapter = SearchAdapter::new(FakeVendor::ok());
        let loose = args(json!({
            "query": "coffee",
            "num": "3",
            "location": "Austin, Texas",
            "search_type": "news",
            "country": "us",
            "language": "",
        }));

        adapter.invoke_value(loose).await.unwrap();
        let sent = adapter.client.last();
        assert_eq!(sent.num, 3);
        assert_eq!(sent.location.as_deref(), Some("Austin, Texas"));
        assert_eq!(sent.tbm.as_deref(), Some("nws"));
        assert_eq!(sent.gl.as_deref(), Some("us"));
        assert_eq!(sent.hl, None);
    }

    #[tokio::test]
    async fn test_missing_organic_becomes_empty() {
        let adapter = SearchAdapter::new(FakeVendor::replying(Ok(json!({"knowledge_graph": {"title": "Rust"}}))));

        let result = adapter.invoke(&SearchRequest::new("rust")).await.unwrap();
        assert!(result.organic().is_empty());
        assert!(result.get("knowledge_graph").is_some());
    }

    #[tokio::test]
    async fn test_timeout_wrapped_as_upstream() {
        let timeout = ThordataError::Timeout { message: "operation timed out".into(), source: None };
        let adapter = SearchAdapter::new(FakeVendor::replying(Err(timeout)));

        let err = adapter.invoke(&SearchRequest::new("rust")).await.unwrap_err();
        assert!(matches!(err, Error::Upstream { .. }));
        assert!(err.to_string().contains("operation timed out"));

        let source = err.source().and_then(|s| s.downcast_ref::<ThordataError>());
        assert!(matches!(source, Some(ThordataError::Timeout { .. })));
        assert_eq!(adapter.client.calls(), 1);
    }

    #[tokio::test]
    async fn test_application_error_is_upstream() {
        let adapter = SearchAdapter::new(FakeVendor::replying(Err(ThordataError::Api {
            code: 402,
            message: "Insufficient balance".into(),
        })));

        let err = adapter.invoke(&SearchRequest::new("rust")).await.unwrap_err();
        assert!(matches!(err, Error::Upstream { .. }));
        assert!(err.to_string().contains("Insufficient balance"));
    }

    #[tokio::test]
    async fn test_no_caching() {
        let adapter = SearchAdapter::new(FakeVendor::ok());
        let req = SearchRequest::new("same query");

        adapter.invoke(&req).await.unwrap();
        adapter.invoke(&req).await.unwrap();
        assert_eq!(adapter.client.calls(), 2);
    }

    #[test]
    fn test_from_config_requires_token() {
        let result = SearchAdapter::from_config(&AppConfig::default());
        assert!(matches!(result, Err(Error::MissingCredential { .. })));
    }

    #[test]
    fn test_from_config_with_token() {
        let config = AppConfig { scraper_token: Some("token".into()), ..Default::default() };
        assert!(SearchAdapter::from_config(&config).is_ok());
    }

    #[test]
    fn test_tool_metadata() {
        let adapter = SearchAdapter::new(FakeVendor::ok());
        assert_eq!(adapter.name(), "thordata_serp_search");
        assert!(adapter.description().to_lowercase().contains("search"));

        let schema = adapter.input_schema();
        let props = schema["properties"].as_object().unwrap();
        assert!(props.contains_key("query"));
        assert!(props.contains_key("numResults"));
        assert_eq!(schema["required"], json!(["query"]));
    }

    #[test]
    fn test_engine_parse() {
        assert_eq!(Engine::parse("  "), Engine::Google);
        assert_eq!(Engine::parse("BING"), Engine::Bing);
        assert_eq!(Engine::parse("yandex").as_str(), "yandex");
        assert_eq!(Engine::parse(" naver "), Engine::Other("naver".into()));
    }
}
