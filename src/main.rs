//! devgate HTTP server entry point.
//!
//! Starts the REST gateway fronting GitHub, Stack Overflow search,
//! and the configured OpenAPI schemas.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use devgate::core::config::Config;
use devgate::core::services::Services;
use devgate::http::build_router;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "devgate=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting devgate");
    tracing::info!("Version: {}", env!("CARGO_PKG_VERSION"));

    // Load configuration; a parse error here aborts startup
    let config = Config::load()?;
    config.log_config();

    // Wire providers into the shared service container
    let services = Arc::new(Services::new(config.clone())?);

    let app = build_router(services);

    // Bind to address and start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Listening on {}", addr);
    tracing::info!("Service ready - Health check at http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
