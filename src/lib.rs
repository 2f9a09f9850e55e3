//! devgate - HTTP gateway for developer data sources
//!
//! Exposes three unrelated external data sources behind one local
//! REST interface:
//!
//! - GitHub repository browsing (directory listings, decoded blobs)
//! - OpenAPI schema serving (local files or remote URLs)
//! - Stack Overflow search (fixed advanced-search projection)
//!
//! # Architecture
//!
//! - **core**: configuration, error taxonomy, DTOs, service container
//! - **providers**: one concrete component per upstream API
//! - **http**: Axum route table, handlers, request-logging middleware
//!
//! Each request is stateless: route → extract parameters → one
//! provider call → JSON response. Providers share nothing but the
//! immutable configuration snapshot and their own `reqwest::Client`.

// Core domain logic (protocol-agnostic)
pub mod core;

// Upstream API providers
pub mod providers;

// HTTP REST adapter
pub mod http;

// Re-export commonly used types for convenience
pub use crate::core::config::Config;
pub use crate::core::error::{GatewayError, Result};
pub use crate::core::services::Services;
