//! Stack Overflow search provider.
//!
//! Issues a fixed advanced-search query against the Stack Exchange
//! API and decodes the filtered result shape. No pagination, caching,
//! or retry.

use url::Url;

use crate::core::config::StackExchangeConfig;
use crate::core::error::{GatewayError, Result};
use crate::core::types::SearchResponse;

/// Response-shaping filter created via the Stack Exchange filter
/// builder. Selects: .items plus question/answer/comment bodies,
/// scores, and question titles.
const SEARCH_FILTER: &str = "!nKzQURF6Y5";

/// Results per search; the gateway does not paginate
const PAGE_SIZE: &str = "10";

/// Provider proxying searches to the Stack Exchange API
pub struct StackSearchProvider {
    client: reqwest::Client,
    api_url: String,
    site: String,
    api_key: Option<String>,
}

impl StackSearchProvider {
    pub fn new(cfg: &StackExchangeConfig) -> Self {
        if cfg.api_key.is_none() {
            tracing::warn!(
                "Stack Exchange API key is missing. Requests will have a lower rate limit."
            );
        }

        Self {
            client: reqwest::Client::new(),
            api_url: cfg.api_url.trim_end_matches('/').to_string(),
            site: cfg.site.clone(),
            api_key: cfg.api_key.clone(),
        }
    }

    /// Build the advanced-search URL for a query
    fn search_url(&self, query: &str) -> Result<Url> {
        let mut url = Url::parse(&format!("{}/search/advanced", self.api_url))
            .map_err(|e| GatewayError::Config(format!("Invalid Stack Exchange API URL: {e}")))?;

        url.query_pairs_mut()
            .append_pair("order", "desc")
            .append_pair("sort", "relevance")
            .append_pair("site", &self.site)
            .append_pair("pagesize", PAGE_SIZE)
            .append_pair("q", query)
            .append_pair("filter", SEARCH_FILTER);

        if let Some(key) = &self.api_key {
            url.query_pairs_mut().append_pair("key", key);
        }

        Ok(url)
    }

    /// Execute a search.
    ///
    /// Transport failures, non-200 statuses, and undecodable bodies
    /// all surface as upstream errors.
    pub async fn search(&self, query: &str) -> Result<SearchResponse> {
        let url = self.search_url(query)?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| GatewayError::Upstream(format!("failed to call Stack Exchange API: {e}")))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(GatewayError::Upstream(format!(
                "Stack Exchange API returned non-200 status: {status}"
            )));
        }

        response.json::<SearchResponse>().await.map_err(|e| {
            GatewayError::Upstream(format!("failed to decode Stack Exchange API response: {e}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(api_key: Option<&str>, site: &str) -> StackSearchProvider {
        StackSearchProvider::new(&StackExchangeConfig {
            api_key: api_key.map(String::from),
            site: site.to_string(),
            ..StackExchangeConfig::default()
        })
    }

    fn query_pairs(url: &Url) -> Vec<(String, String)> {
        url.query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn test_search_url_fixed_parameters() {
        let url = provider(None, "stackoverflow")
            .search_url("borrow checker")
            .unwrap();
        let pairs = query_pairs(&url);

        assert!(url.as_str().starts_with(
            "https://api.stackexchange.com/2.3/search/advanced?"
        ));
        assert!(pairs.contains(&("order".to_string(), "desc".to_string())));
        assert!(pairs.contains(&("sort".to_string(), "relevance".to_string())));
        assert!(pairs.contains(&("site".to_string(), "stackoverflow".to_string())));
        assert!(pairs.contains(&("pagesize".to_string(), "10".to_string())));
        assert!(pairs.contains(&("q".to_string(), "borrow checker".to_string())));
        assert!(pairs.contains(&("filter".to_string(), SEARCH_FILTER.to_string())));
    }

    #[test]
    fn test_search_url_key_only_when_configured() {
        let without = provider(None, "stackoverflow").search_url("q").unwrap();
        assert!(!query_pairs(&without).iter().any(|(k, _)| k == "key"));

        let with = provider(Some("abc123"), "stackoverflow")
            .search_url("q")
            .unwrap();
        assert!(query_pairs(&with).contains(&("key".to_string(), "abc123".to_string())));
    }

    #[test]
    fn test_search_url_site_from_config() {
        let url = provider(None, "serverfault").search_url("q").unwrap();
        assert!(query_pairs(&url).contains(&("site".to_string(), "serverfault".to_string())));
    }

    #[tokio::test]
    async fn test_search_transport_failure() {
        let prov = StackSearchProvider::new(&StackExchangeConfig {
            api_url: "http://127.0.0.1:1".to_string(),
            ..StackExchangeConfig::default()
        });

        let err = prov.search("anything").await.unwrap_err();
        assert!(matches!(err, GatewayError::Upstream(_)));
    }
}
