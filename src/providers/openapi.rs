//! OpenAPI schema provider.
//!
//! Maps configured schema names to locations and fetches the raw
//! bytes, either from disk or over HTTP. JSON validation of the
//! fetched bytes is the handler's job, not the provider's.

use std::collections::HashMap;

use crate::core::config::OpenApiConfig;
use crate::core::error::{GatewayError, Result};

/// Provider serving named OpenAPI schema documents
pub struct SchemaProvider {
    client: reqwest::Client,
    schemas: HashMap<String, String>,
}

impl SchemaProvider {
    pub fn new(cfg: &OpenApiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            schemas: cfg.schemas.clone(),
        }
    }

    /// Names of all configured schemas, sorted for stable output
    pub fn schema_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.schemas.keys().cloned().collect();
        names.sort();
        names
    }

    /// Fetch the raw bytes of a named schema.
    ///
    /// Locations with an `http://` or `https://` prefix are fetched
    /// over HTTP; anything else is treated as a local file path.
    pub async fn schema_bytes(&self, name: &str) -> Result<Vec<u8>> {
        let location = self
            .schemas
            .get(name)
            .ok_or_else(|| GatewayError::SchemaNotConfigured(name.to_string()))?;

        if location.starts_with("http://") || location.starts_with("https://") {
            self.fetch_remote(name, location).await
        } else {
            tokio::fs::read(location)
                .await
                .map_err(|source| GatewayError::SchemaRead {
                    name: name.to_string(),
                    source,
                })
        }
    }

    async fn fetch_remote(&self, name: &str, url: &str) -> Result<Vec<u8>> {
        let response =
            self.client
                .get(url)
                .send()
                .await
                .map_err(|e| GatewayError::SchemaFetch {
                    name: name.to_string(),
                    reason: e.to_string(),
                })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::SchemaFetch {
                name: name.to_string(),
                reason: format!("upstream returned {status}"),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| GatewayError::SchemaFetch {
                name: name.to_string(),
                reason: e.to_string(),
            })?;

        Ok(bytes.to_vec())
    }
}
