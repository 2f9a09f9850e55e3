//! HTTP request handlers for the devgate API.
//!
//! Each handler extracts parameters, calls the corresponding
//! provider, and maps the result (or a `GatewayError`) to JSON.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::core::error::{GatewayError, Result};
use crate::core::services::Services;
use crate::core::types::*;

/// Health check handler
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// List the configured repository short names
pub async fn list_repos(State(services): State<Arc<Services>>) -> Json<HashMap<String, String>> {
    Json(services.github.repositories().clone())
}

/// List directory entries at the repository root
///
/// Registered for the bare `/tree` path, which the wildcard route
/// cannot match.
pub async fn tree_root(
    State(services): State<Arc<Services>>,
    Path(repo): Path<String>,
) -> Result<Json<Vec<FileEntry>>> {
    let entries = services.github.list_files(&repo, "").await?;
    Ok(Json(entries))
}

/// List directory entries at a path within a repository
pub async fn tree(
    State(services): State<Arc<Services>>,
    Path((repo, path)): Path<(String, String)>,
) -> Result<Json<Vec<FileEntry>>> {
    let path = path.trim_start_matches('/');
    let entries = services.github.list_files(&repo, path).await?;
    Ok(Json(entries))
}

/// Return the decoded content of a single file
///
/// # Errors
///
/// - `RepoNotConfigured` / `InvalidRepoFormat`: short-name resolution failed
/// - `IsDirectory`: the path is a directory
/// - `Decode`: the upstream payload carried no usable content
pub async fn blob(
    State(services): State<Arc<Services>>,
    Path((repo, path)): Path<(String, String)>,
) -> Result<Json<BlobResponse>> {
    let path = path.trim_start_matches('/');
    let content = services.github.file_content(&repo, path).await?;
    Ok(Json(BlobResponse { content }))
}

/// List the names of the configured OpenAPI schemas
pub async fn list_schemas(
    State(services): State<Arc<Services>>,
) -> Result<Json<SchemaListResponse>> {
    let provider = services
        .openapi
        .as_ref()
        .ok_or(GatewayError::FeatureNotConfigured("OpenAPI"))?;

    Ok(Json(SchemaListResponse {
        available_schemas: provider.schema_names(),
    }))
}

/// Fetch a named schema and return it as parsed JSON
///
/// The provider hands back raw bytes; validating that they are
/// well-formed JSON happens here, so a broken document surfaces as
/// `InvalidSchemaFormat` rather than a provider error.
pub async fn get_schema(
    State(services): State<Arc<Services>>,
    Path(name): Path<String>,
) -> Result<Json<serde_json::Value>> {
    let provider = services
        .openapi
        .as_ref()
        .ok_or(GatewayError::FeatureNotConfigured("OpenAPI"))?;

    let bytes = provider.schema_bytes(&name).await?;

    let document: serde_json::Value = serde_json::from_slice(&bytes)
        .map_err(|e| GatewayError::InvalidSchemaFormat(e.to_string()))?;

    Ok(Json(document))
}

/// Catch-all handler bound to the OpenAPI namespace when no schemas
/// are configured
pub async fn openapi_not_configured() -> GatewayError {
    GatewayError::FeatureNotConfigured("OpenAPI")
}

/// Query parameters for the search endpoint
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
}

/// Proxy a search to the Stack Exchange API
///
/// An empty or missing `q` is rejected here with 400 before the
/// provider is called.
pub async fn stack_search(
    State(services): State<Arc<Services>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>> {
    let query = params.q.as_deref().unwrap_or("").trim();
    if query.is_empty() {
        return Err(GatewayError::InvalidQuery(
            "query parameter 'q' is required".to_string(),
        ));
    }

    let results = services.stack.search(query).await?;
    Ok(Json(results))
}
