//! HTTP REST adapter.
//!
//! Depends only on core/ and providers/. Exposes the whole route
//! table via Axum so the binary and the integration tests share one
//! router definition.

pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{middleware as axum_middleware, routing::get, Router};
use tower_http::cors::CorsLayer;

use crate::core::services::Services;

/// Build the application router.
///
/// The OpenAPI routes are decided here from the optional provider:
/// when no schemas are configured, the namespace gets a catch-all
/// "feature not configured" handler and the bare `/openapi` route is
/// not registered at all.
pub fn build_router(services: Arc<Services>) -> Router {
    let mut api = Router::new()
        .route("/repos", get(handlers::list_repos))
        // The wildcard doesn't match the bare or slash-terminated
        // prefix, so the root listing needs its own routes.
        .route("/repos/:repo/tree", get(handlers::tree_root))
        .route("/repos/:repo/tree/", get(handlers::tree_root))
        .route("/repos/:repo/tree/*path", get(handlers::tree))
        .route("/repos/:repo/blob/*path", get(handlers::blob))
        .route("/stackoverflow/search", get(handlers::stack_search));

    api = if services.openapi.is_some() {
        api.route("/openapi", get(handlers::list_schemas))
            .route("/openapi/:name", get(handlers::get_schema))
    } else {
        api.route("/openapi/", get(handlers::openapi_not_configured))
            .route("/openapi/*rest", get(handlers::openapi_not_configured))
    };

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api/v1", api)
        .layer(axum_middleware::from_fn(middleware::log_request))
        .layer(CorsLayer::permissive())
        .with_state(services)
}
