//! Core types and shared functionality for the Thordata tool adapters.
//!
//! This crate provides:
//! - Unified error types
//! - Layered configuration and credential resolution
//! - Output bounding (HTML truncation) and loose-input coercion helpers

pub mod coerce;
pub mod config;
pub mod credentials;
pub mod error;
pub mod truncate;

pub use config::{AppConfig, ConfigError};
pub use credentials::{CredentialResolver, Credentials};
pub use error::Error;
pub use truncate::{Truncated, truncate_chars};
