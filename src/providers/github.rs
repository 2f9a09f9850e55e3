//! GitHub repository provider.
//!
//! Resolves configured short names to owner/repo pairs and talks to
//! the GitHub Contents API to list directories and fetch file blobs.
//! Blob payloads arrive base64-encoded; for large files the API omits
//! inline content entirely, which surfaces as a decode error.

use std::collections::HashMap;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::Deserialize;

use crate::core::config::GithubConfig;
use crate::core::error::{GatewayError, Result};
use crate::core::types::FileEntry;

/// Raw entry shape returned by the Contents API
#[derive(Debug, Deserialize)]
struct RawContent {
    name: String,
    path: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    encoding: Option<String>,
}

/// The Contents API returns an array for directories and a single
/// object for files.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ContentsResponse {
    Listing(Vec<RawContent>),
    Single(Box<RawContent>),
}

/// Provider for browsing configured GitHub repositories
pub struct GithubProvider {
    client: reqwest::Client,
    api_url: String,
    repos: HashMap<String, String>,
}

impl GithubProvider {
    /// Create a provider with a reusable HTTP client.
    ///
    /// The client carries the API media-type header, a User-Agent
    /// (required by GitHub), and a bearer token when one is
    /// configured. Without a token requests still work but hit the
    /// unauthenticated rate limit.
    pub fn new(cfg: &GithubConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("devgate/", env!("CARGO_PKG_VERSION"))),
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );

        if let Some(key) = &cfg.api_key {
            let mut value = HeaderValue::from_str(&format!("Bearer {key}"))
                .map_err(|e| GatewayError::Config(format!("Invalid GitHub API key: {e}")))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
            tracing::info!("GitHub API key found, using authenticated client");
        } else {
            tracing::warn!(
                "GitHub API key not found, using unauthenticated client. Rate limits will be lower."
            );
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| GatewayError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_url: cfg.api_url.trim_end_matches('/').to_string(),
            repos: cfg.repositories.clone(),
        })
    }

    /// The configured short-name -> "owner/repo" table
    pub fn repositories(&self) -> &HashMap<String, String> {
        &self.repos
    }

    /// Resolve a short name to its (owner, repo) pair
    fn resolve(&self, short_name: &str) -> Result<(String, String)> {
        let full_name = self
            .repos
            .get(short_name)
            .ok_or_else(|| GatewayError::RepoNotConfigured(short_name.to_string()))?;

        let mut parts = full_name.splitn(2, '/');
        match (parts.next(), parts.next()) {
            (Some(owner), Some(repo)) if !owner.is_empty() && !repo.is_empty() => {
                Ok((owner.to_string(), repo.to_string()))
            }
            _ => Err(GatewayError::InvalidRepoFormat {
                name: short_name.to_string(),
                value: full_name.clone(),
            }),
        }
    }

    /// Issue a Contents API request for a path within a repository
    async fn get_contents(&self, short_name: &str, path: &str) -> Result<ContentsResponse> {
        let (owner, repo) = self.resolve(short_name)?;
        let url = format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_url, owner, repo, path
        );

        let response = self.client.get(&url).send().await.map_err(|e| {
            GatewayError::Upstream(format!(
                "could not get contents for {owner}/{repo} at path '{path}': {e}"
            ))
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(GatewayError::NotFound(format!(
                "{owner}/{repo} has no path '{path}'"
            )));
        }
        if !status.is_success() {
            return Err(GatewayError::Upstream(format!(
                "GitHub API returned {status} for {owner}/{repo} at path '{path}'"
            )));
        }

        response.json::<ContentsResponse>().await.map_err(|e| {
            GatewayError::Upstream(format!(
                "failed to decode GitHub contents response for '{path}': {e}"
            ))
        })
    }

    /// List directory entries at a path.
    ///
    /// A file path yields a single-entry listing rather than an error,
    /// keeping the response shape stable for clients.
    pub async fn list_files(&self, short_name: &str, path: &str) -> Result<Vec<FileEntry>> {
        let contents = self.get_contents(short_name, path).await?;

        let raw = match contents {
            ContentsResponse::Listing(entries) => entries,
            ContentsResponse::Single(entry) => vec![*entry],
        };

        Ok(raw
            .into_iter()
            .map(|e| FileEntry {
                name: e.name,
                path: e.path,
                kind: e.kind,
            })
            .collect())
    }

    /// Fetch and decode the content of a single file.
    ///
    /// # Errors
    ///
    /// - `IsDirectory`: the path resolves to a directory
    /// - `Decode`: the payload carried no usable content
    pub async fn file_content(&self, short_name: &str, path: &str) -> Result<String> {
        let contents = self.get_contents(short_name, path).await?;

        let entry = match contents {
            ContentsResponse::Listing(_) => {
                return Err(GatewayError::IsDirectory(path.to_string()));
            }
            ContentsResponse::Single(entry) => *entry,
        };

        if entry.kind == "dir" {
            return Err(GatewayError::IsDirectory(path.to_string()));
        }

        decode_content(&entry, path)
    }
}

/// Decode the content field of a Contents API file object.
///
/// GitHub marks inline payloads with an `encoding` field: `base64`
/// (wrapped at 60 columns) for regular files, `none` with empty
/// content for blobs too large to inline.
fn decode_content(entry: &RawContent, path: &str) -> Result<String> {
    match (entry.encoding.as_deref(), entry.content.as_deref()) {
        (Some("base64"), Some(content)) => {
            let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
            let bytes = BASE64.decode(compact.as_bytes()).map_err(|e| {
                GatewayError::Decode(format!("base64 decoding failed for path '{path}': {e}"))
            })?;
            String::from_utf8(bytes).map_err(|e| {
                GatewayError::Decode(format!("content for '{path}' is not valid UTF-8: {e}"))
            })
        }
        (_, Some(content)) if !content.is_empty() => Ok(content.to_string()),
        _ => Err(GatewayError::Decode(format!(
            "no content returned for path '{path}' (encoding: {:?})",
            entry.encoding
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider_with(repos: &[(&str, &str)]) -> GithubProvider {
        let cfg = GithubConfig {
            repositories: repos
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            ..GithubConfig::default()
        };
        GithubProvider::new(&cfg).unwrap()
    }

    fn raw(content: Option<&str>, encoding: Option<&str>) -> RawContent {
        RawContent {
            name: "file.txt".to_string(),
            path: "file.txt".to_string(),
            kind: "file".to_string(),
            content: content.map(String::from),
            encoding: encoding.map(String::from),
        }
    }

    #[test]
    fn test_resolve_configured_repo() {
        let provider = provider_with(&[("demo", "octocat/Hello-World")]);
        let (owner, repo) = provider.resolve("demo").unwrap();
        assert_eq!(owner, "octocat");
        assert_eq!(repo, "Hello-World");
    }

    #[test]
    fn test_resolve_unconfigured_repo() {
        let provider = provider_with(&[("demo", "octocat/Hello-World")]);
        let err = provider.resolve("other").unwrap_err();
        assert!(matches!(err, GatewayError::RepoNotConfigured(_)));
    }

    #[test]
    fn test_resolve_missing_slash() {
        let provider = provider_with(&[("bad", "noslash")]);
        let err = provider.resolve("bad").unwrap_err();
        assert!(matches!(err, GatewayError::InvalidRepoFormat { .. }));
    }

    #[test]
    fn test_resolve_empty_segments() {
        for value in ["/repo", "owner/", "/"] {
            let provider = provider_with(&[("bad", value)]);
            let err = provider.resolve("bad").unwrap_err();
            assert!(
                matches!(err, GatewayError::InvalidRepoFormat { .. }),
                "value {value:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_resolve_extra_slash_goes_to_repo() {
        // splitn(2) keeps everything after the first slash as the
        // repo segment, matching the upstream path layout.
        let provider = provider_with(&[("demo", "owner/repo/extra")]);
        let (owner, repo) = provider.resolve("demo").unwrap();
        assert_eq!(owner, "owner");
        assert_eq!(repo, "repo/extra");
    }

    #[test]
    fn test_decode_base64_content() {
        let entry = raw(Some("aGVsbG8gd29ybGQ="), Some("base64"));
        assert_eq!(decode_content(&entry, "f").unwrap(), "hello world");
    }

    #[test]
    fn test_decode_base64_with_line_wraps() {
        // GitHub wraps base64 payloads with newlines every 60 chars
        let entry = raw(Some("aGVsbG8g\nd29ybGQ=\n"), Some("base64"));
        assert_eq!(decode_content(&entry, "f").unwrap(), "hello world");
    }

    #[test]
    fn test_decode_plain_content() {
        let entry = raw(Some("plain text"), None);
        assert_eq!(decode_content(&entry, "f").unwrap(), "plain text");
    }

    #[test]
    fn test_decode_invalid_base64() {
        let entry = raw(Some("!!! not base64 !!!"), Some("base64"));
        let err = decode_content(&entry, "f").unwrap_err();
        assert!(matches!(err, GatewayError::Decode(_)));
    }

    #[test]
    fn test_decode_empty_content_none_encoding() {
        // Large files: encoding "none", no inline content
        let entry = raw(Some(""), Some("none"));
        let err = decode_content(&entry, "f").unwrap_err();
        assert!(matches!(err, GatewayError::Decode(_)));
    }

    #[test]
    fn test_contents_response_untagged_decode() {
        let dir: ContentsResponse = serde_json::from_str(
            r#"[{"name": "src", "path": "src", "type": "dir"}]"#,
        )
        .unwrap();
        assert!(matches!(dir, ContentsResponse::Listing(_)));

        let file: ContentsResponse = serde_json::from_str(
            r#"{"name": "a.txt", "path": "a.txt", "type": "file", "content": "", "encoding": "base64"}"#,
        )
        .unwrap();
        assert!(matches!(file, ContentsResponse::Single(_)));
    }
}
