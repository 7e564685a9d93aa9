//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the Thordata adapters.
use crate::tools::Toolbox;

use rmcp::{
    ServerHandler,
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
};

/// The main MCP server handler.
#[derive(Clone)]
pub struct ThordataServer {
    toolbox: Toolbox,
}

impl ThordataServer {
    /// Create a new server handler around a built toolbox.
    pub fn new(toolbox: Toolbox) -> Self {
        Self { toolbox }
    }
}

impl ServerHandler for ThordataServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "thordata-mcp".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(
                "Search the web with thordata_serp_search, then read pages with thordata_universal_scrape.".into(),
            ),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.toolbox.list(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.toolbox.call(&request.name, request.arguments).await
    }
}
