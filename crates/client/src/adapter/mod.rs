//! Tool adapters between an agent framework and the Thordata APIs.
//!
//! Each adapter has a typed `invoke` (validate, call the vendor once, shape
//! the result) and implements [`ToolAdapter`], the loose-record surface an
//! agent framework drives: name, description, JSON schema, and
//! `invoke_value`.

pub mod scrape;
pub mod search;

pub use scrape::{OutputFormat, ScrapeAdapter, ScrapeInput, ScrapeRequest, ScrapeResult};
pub use search::{Engine, SearchAdapter, SearchInput, SearchRequest, SearchResult};

use async_trait::async_trait;
use bytes::Bytes;
use schemars::JsonSchema;
use serde_json::Value;
use thordata_core::Error;
use thordata_core::coerce::JsonObject;

/// Value handed back to the agent framework.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutput {
    /// Structured JSON (search results).
    Json(Value),
    /// Plain text (HTML).
    Text(String),
    /// Binary image with its MIME type.
    Image { data: Bytes, mime_type: &'static str },
}

/// Framework-facing tool surface.
#[async_trait]
pub trait ToolAdapter: Send + Sync {
    /// Stable tool name.
    fn name(&self) -> &'static str;

    /// Description shown to the model.
    fn description(&self) -> &'static str;

    /// JSON schema of the accepted argument record.
    fn input_schema(&self) -> JsonObject;

    /// Coerce a loose argument record and run the tool.
    async fn invoke_value(&self, args: JsonObject) -> Result<ToolOutput, Error>;
}

/// Render the JSON schema of `T` as a plain JSON object.
pub(crate) fn schema_object<T: JsonSchema>() -> JsonObject {
    match serde_json::to_value(schemars::schema_for!(T)) {
        Ok(Value::Object(map)) => map,
        _ => JsonObject::new(),
    }
}
