//! Configuration management for the devgate service.
//!
//! This module handles loading configuration from a YAML file and
//! environment variables, with sensible defaults for all settings.
//! A missing config file is not an error; a malformed one aborts
//! startup.

use crate::core::error::{GatewayError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub github: GithubConfig,
    #[serde(default)]
    pub stack_exchange: StackExchangeConfig,
    #[serde(default)]
    pub openapi: OpenApiConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Host interface to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port to listen on (kept as a string, must parse as u16)
    #[serde(default = "default_port")]
    pub port: String,
}

/// GitHub provider configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GithubConfig {
    /// Personal access token; optional, unauthenticated requests
    /// get a lower rate limit
    #[serde(default)]
    pub api_key: Option<String>,

    /// API endpoint, overridable for tests or GitHub Enterprise
    #[serde(default = "default_github_api_url")]
    pub api_url: String,

    /// Short name -> "owner/repo" table
    #[serde(default)]
    pub repositories: HashMap<String, String>,
}

/// Stack Exchange provider configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StackExchangeConfig {
    /// API key; optional, keyless requests get a lower quota
    #[serde(default)]
    pub api_key: Option<String>,

    /// Site parameter passed to the search endpoint
    #[serde(default = "default_stack_site")]
    pub site: String,

    /// API endpoint, overridable for tests
    #[serde(default = "default_stack_api_url")]
    pub api_url: String,
}

/// OpenAPI schema provider configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OpenApiConfig {
    /// Schema name -> location (file path or http(s) URL)
    #[serde(default)]
    pub schemas: HashMap<String, String>,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> String {
    "8080".to_string()
}

fn default_github_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_stack_site() -> String {
    "stackoverflow".to_string()
}

fn default_stack_api_url() -> String {
    "https://api.stackexchange.com/2.3".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: default_github_api_url(),
            repositories: HashMap::new(),
        }
    }
}

impl Default for StackExchangeConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            site: default_stack_site(),
            api_url: default_stack_api_url(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| GatewayError::Config(format!("Failed to read config file: {e}")))?;

        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config with priority: env vars > YAML > defaults
    ///
    /// File resolution order:
    /// 1. DEVGATE_CONFIG env var (must exist if set)
    /// 2. ./config.yaml if present
    /// 3. Defaults
    pub fn load() -> Result<Self> {
        let mut config = if let Ok(config_path) = env::var("DEVGATE_CONFIG") {
            Self::from_file(config_path)?
        } else if Path::new("config.yaml").exists() {
            Self::from_file("config.yaml")?
        } else {
            Self::default()
        };

        config.merge_env();
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) {
        if let Ok(port) = env::var("DEVGATE_PORT") {
            self.server.port = port;
        }
        if let Ok(key) = env::var("DEVGATE_GITHUB_API_KEY") {
            self.github.api_key = Some(key);
        }
        if let Ok(key) = env::var("DEVGATE_STACK_EXCHANGE_API_KEY") {
            self.stack_exchange.api_key = Some(key);
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.server.port.parse::<u16>().is_err() {
            return Err(GatewayError::Config(format!(
                "Server port must be a valid TCP port, got '{}'",
                self.server.port
            )));
        }

        if self.stack_exchange.site.trim().is_empty() {
            return Err(GatewayError::Config(
                "Stack Exchange site must be non-empty".to_string(),
            ));
        }

        // Repository table values are validated at lookup time so a
        // single bad entry does not take the whole service down.
        Ok(())
    }

    /// Log configuration (redacting sensitive values)
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen: {}:{}", self.server.host, self.server.port);
        tracing::info!(
            "  GitHub token: {}",
            if self.github.api_key.is_some() {
                "set"
            } else {
                "not set"
            }
        );
        tracing::info!(
            "  Repositories: {} configured",
            self.github.repositories.len()
        );
        tracing::info!(
            "  Stack Exchange key: {}",
            if self.stack_exchange.api_key.is_some() {
                "set"
            } else {
                "not set"
            }
        );
        tracing::info!("  Stack Exchange site: {}", self.stack_exchange.site);
        tracing::info!("  Schemas: {} configured", self.openapi.schemas.len());
    }
}
