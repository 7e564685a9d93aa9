//! thordata-mcp server entry point.
//!
//! Boots an MCP server on stdio transport exposing the Thordata search and
//! scrape tools. Logging goes to stderr to avoid interfering with the
//! JSON-RPC protocol on stdout.

use anyhow::Result;
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use thordata_core::AppConfig;
use tracing_subscriber::EnvFilter;

mod handler;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load()?;
    tracing::debug!(?config, "configuration loaded");

    let toolbox = tools::Toolbox::from_config(&config)?;

    tracing::info!("Starting thordata-mcp server on stdio transport");

    let handler = handler::ThordataServer::new(toolbox);
    let transport = stdio();
    let server = serve_server(handler, transport).await?;

    server.waiting().await?;

    Ok(())
}
