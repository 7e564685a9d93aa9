//! Client code for the Thordata tool adapters.
//!
//! This crate provides the Thordata API client and the search and scrape
//! adapters that sit between an agent framework and that client.

pub mod adapter;
pub mod target;
pub mod thordata;

pub use adapter::{
    Engine, OutputFormat, ScrapeAdapter, ScrapeRequest, ScrapeResult, SearchAdapter, SearchRequest,
    SearchResult, ToolAdapter, ToolOutput,
};
pub use target::{UrlError, parse_target};
pub use thordata::{ClientConfig, ScrapePayload, ThordataClient, ThordataError, VendorClient};
