//! MCP tool registry.
//!
//! Wraps the Thordata adapters as MCP tools: listing comes from each
//! adapter's name, description, and schema; calls forward the raw argument
//! object to `invoke_value`.

mod output;

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, JsonObject, Tool},
};
use thordata_client::{ScrapeAdapter, SearchAdapter, ToolAdapter};
use thordata_core::{AppConfig, Error};

pub use output::render;

/// The set of tools exposed by the server.
#[derive(Clone)]
pub struct Toolbox {
    tools: Vec<Arc<dyn ToolAdapter>>,
}

impl Toolbox {
    pub fn new(tools: Vec<Arc<dyn ToolAdapter>>) -> Self {
        Self { tools }
    }

    /// Build the search and scrape tools from configuration.
    ///
    /// # Errors
    ///
    /// Fails with `Error::MissingCredential` when the scraper token is absent,
    /// so a misconfigured server never starts.
    pub fn from_config(config: &AppConfig) -> Result<Self, Error> {
        let search = SearchAdapter::from_config(config)?;
        let scrape = ScrapeAdapter::from_config(config)?;

        let tools: Vec<Arc<dyn ToolAdapter>> = vec![Arc::new(search), Arc::new(scrape)];
        Ok(Self::new(tools))
    }

    /// MCP descriptors for every registered tool.
    pub fn list(&self) -> Vec<Tool> {
        self.tools
            .iter()
            .map(|t| Tool::new(t.name(), t.description(), Arc::new(t.input_schema())))
            .collect()
    }

    /// Route a call to the named tool.
    pub async fn call(&self, name: &str, arguments: Option<JsonObject>) -> Result<CallToolResult, McpError> {
        let tool = self
            .tools
            .iter()
            .find(|t| t.name() == name)
            .ok_or_else(|| McpError::invalid_params(format!("unknown tool: {name}"), None))?;

        tracing::debug!(tool = name, "tool call");

        let output = tool.invoke_value(arguments.unwrap_or_default()).await.map_err(|e| {
            tracing::debug!(tool = name, error = %e, "tool call failed");
            McpError::from(e)
        })?;

        Ok(render(output))
    }
}
