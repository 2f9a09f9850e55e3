//! Unified service container for devgate.
//!
//! Holds the configuration snapshot and the three providers. Built
//! once at startup, shared read-only across request handlers.

use crate::core::config::Config;
use crate::core::error::Result;
use crate::providers::github::GithubProvider;
use crate::providers::openapi::SchemaProvider;
use crate::providers::stackoverflow::StackSearchProvider;
use std::sync::Arc;

/// Immutable container shared by all request handlers
pub struct Services {
    /// Application configuration
    pub config: Arc<Config>,

    /// GitHub repository browser
    pub github: GithubProvider,

    /// Stack Overflow search proxy
    pub stack: StackSearchProvider,

    /// OpenAPI schema server; None when no schemas are configured,
    /// which routes the whole namespace to a "feature not configured"
    /// handler at router construction time
    pub openapi: Option<SchemaProvider>,
}

impl Services {
    /// Create services from configuration
    pub fn new(config: Config) -> Result<Self> {
        let github = GithubProvider::new(&config.github)?;
        tracing::info!("GitHub provider initialized");

        let stack = StackSearchProvider::new(&config.stack_exchange);
        tracing::info!("Stack Overflow provider initialized");

        let openapi = if config.openapi.schemas.is_empty() {
            tracing::warn!(
                "OpenAPI provider not configured (no schemas listed). This feature will be disabled."
            );
            None
        } else {
            tracing::info!("OpenAPI provider initialized with configured schemas");
            Some(SchemaProvider::new(&config.openapi))
        };

        Ok(Self {
            config: Arc::new(config),
            github,
            stack,
            openapi,
        })
    }
}
