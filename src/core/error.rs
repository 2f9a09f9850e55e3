//! Error types and error handling for the devgate service.
//!
//! This module defines the error taxonomy used throughout the
//! application and provides conversion to HTTP status codes for
//! API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type alias for devgate operations
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Main error type for the devgate service
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("repository '{0}' not configured")]
    RepoNotConfigured(String),

    #[error("invalid repository format for '{name}': expected 'owner/repo', got '{value}'")]
    InvalidRepoFormat { name: String, value: String },

    #[error("path '{0}' is a directory, not a file")]
    IsDirectory(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("schema '{0}' not configured")]
    SchemaNotConfigured(String),

    #[error("{0} feature not configured")]
    FeatureNotConfigured(&'static str),

    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("upstream API error: {0}")]
    Upstream(String),

    #[error("failed to decode content: {0}")]
    Decode(String),

    #[error("fetched schema is not valid JSON: {0}")]
    InvalidSchemaFormat(String),

    #[error("failed to read schema '{name}': {source}")]
    SchemaRead {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to fetch schema '{name}': {reason}")]
    SchemaFetch { name: String, reason: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl GatewayError {
    /// Convert error to appropriate HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::RepoNotConfigured(_)
            | GatewayError::SchemaNotConfigured(_)
            | GatewayError::FeatureNotConfigured(_)
            | GatewayError::NotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::InvalidQuery(_) | GatewayError::IsDirectory(_) => {
                StatusCode::BAD_REQUEST
            }
            GatewayError::Upstream(_) | GatewayError::SchemaFetch { .. } => {
                StatusCode::BAD_GATEWAY
            }
            GatewayError::InvalidRepoFormat { .. }
            | GatewayError::Decode(_)
            | GatewayError::InvalidSchemaFormat(_)
            | GatewayError::SchemaRead { .. }
            | GatewayError::Config(_)
            | GatewayError::Io(_)
            | GatewayError::Serde(_)
            | GatewayError::Yaml(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-friendly error message
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Implement IntoResponse for automatic error conversion in Axum
impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.message();

        let body = Json(json!({
            "error": message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_not_configured_status() {
        let err = GatewayError::RepoNotConfigured("demo".to_string());
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_invalid_repo_format_status() {
        let err = GatewayError::InvalidRepoFormat {
            name: "demo".to_string(),
            value: "noslash".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_is_directory_status() {
        let err = GatewayError::IsDirectory("src".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_feature_not_configured_status() {
        let err = GatewayError::FeatureNotConfigured("OpenAPI");
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert!(err.message().contains("not configured"));
    }

    #[test]
    fn test_upstream_status() {
        let err = GatewayError::Upstream("connection refused".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_schema_read_status() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = GatewayError::SchemaRead {
            name: "petstore".to_string(),
            source: io_err,
        };
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.message().contains("petstore"));
    }

    #[test]
    fn test_error_message() {
        let err = GatewayError::RepoNotConfigured("my-repo".to_string());
        assert!(err.message().contains("my-repo"));
        assert!(err.message().contains("not configured"));
    }
}
