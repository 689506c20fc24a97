//! Brave Search API web searcher

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::domain::{DomainError, SearchSnippet, WebSearcher};
use crate::infrastructure::http_client::HttpClientTrait;

const DEFAULT_BRAVE_URL: &str = "https://api.search.brave.com/res/v1/web/search";

/// Brave caps `count` at 20
const MAX_RESULT_COUNT: u32 = 20;

/// Web searcher backed by the Brave Search API
#[derive(Debug)]
pub struct BraveWebSearcher<C: HttpClientTrait> {
    client: C,
    api_key: String,
    base_url: String,
    result_count: u32,
    language: String,
}

impl<C: HttpClientTrait> BraveWebSearcher<C> {
    pub fn new(client: C, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: DEFAULT_BRAVE_URL.to_string(),
            result_count: 5,
            language: "en".to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_result_count(mut self, count: u32) -> Self {
        self.result_count = count.clamp(1, MAX_RESULT_COUNT);
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("Accept", "application/json"),
            ("X-Subscription-Token", self.api_key.as_str()),
        ]
    }

    fn parse_response(&self, json: serde_json::Value) -> Result<Vec<SearchSnippet>, DomainError> {
        let response: BraveResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::search("brave", format!("Failed to parse search response: {}", e))
        })?;

        let results = response.web.map(|w| w.results).unwrap_or_default();

        Ok(results
            .into_iter()
            .map(|r| {
                SearchSnippet::new(
                    r.title.unwrap_or_else(|| "No title".to_string()),
                    r.url.unwrap_or_else(|| "No URL".to_string()),
                    r.description.unwrap_or_else(|| "No description".to_string()),
                )
            })
            .collect())
    }
}

#[async_trait]
impl<C: HttpClientTrait> WebSearcher for BraveWebSearcher<C> {
    async fn search(&self, query: &str) -> Result<Vec<SearchSnippet>, DomainError> {
        let params = vec![
            ("q", query.to_string()),
            ("count", self.result_count.to_string()),
            ("search_lang", self.language.clone()),
        ];

        let response = self
            .client
            .get_json(&self.base_url, self.headers(), params)
            .await
            .map_err(|e| DomainError::search("brave", e.to_string()))?;

        let snippets = self.parse_response(response)?;
        debug!(results = snippets.len(), "Brave search completed");

        Ok(snippets)
    }

    fn provider_name(&self) -> &'static str {
        "brave"
    }
}

#[derive(Debug, Deserialize)]
struct BraveResponse {
    #[serde(default)]
    web: Option<BraveWebResults>,
}

#[derive(Debug, Deserialize)]
struct BraveWebResults {
    #[serde(default)]
    results: Vec<BraveResult>,
}

#[derive(Debug, Deserialize)]
struct BraveResult {
    title: Option<String>,
    url: Option<String>,
    description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::http_client::mock::MockHttpClient;

    #[tokio::test]
    async fn test_search_parses_results() {
        let client = MockHttpClient::new().with_response(
            DEFAULT_BRAVE_URL,
            serde_json::json!({
                "web": { "results": [
                    { "title": "NVIDIA Q3", "url": "https://nvidia.example", "description": "Record revenue" },
                    { "url": "https://untitled.example" }
                ]}
            }),
        );
        let searcher = BraveWebSearcher::new(client, "bsa-test").with_result_count(50);

        let snippets = searcher.search("nvidia latest revenue").await.unwrap();

        assert_eq!(snippets.len(), 2);
        assert_eq!(snippets[0].title, "NVIDIA Q3");
        assert_eq!(snippets[1].title, "No title");
        assert_eq!(snippets[1].description, "No description");

        let requests = searcher.client.requests();
        assert!(requests[0]
            .query
            .contains(&("count".to_string(), "20".to_string())));
        assert!(requests[0]
            .query
            .contains(&("q".to_string(), "nvidia latest revenue".to_string())));
        assert!(requests[0]
            .headers
            .contains(&("X-Subscription-Token".to_string(), "bsa-test".to_string())));
    }

    #[tokio::test]
    async fn test_no_web_section_is_empty() {
        let client =
            MockHttpClient::new().with_response(DEFAULT_BRAVE_URL, serde_json::json!({}));
        let searcher = BraveWebSearcher::new(client, "k");

        assert!(searcher.search("q").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_api_failure_is_search_error() {
        let client = MockHttpClient::new().with_status_error(DEFAULT_BRAVE_URL, 401);
        let searcher = BraveWebSearcher::new(client, "bad-key");

        let result = searcher.search("q").await;

        assert!(matches!(result, Err(DomainError::Search { .. })));
    }

    #[tokio::test]
    async fn test_custom_base_url_and_language() {
        let url = "http://localhost:9000/search";
        let client = MockHttpClient::new()
            .with_response(url, serde_json::json!({ "web": { "results": [] } }));
        let searcher = BraveWebSearcher::new(client, "k")
            .with_base_url(url)
            .with_language("de");

        searcher.search("q").await.unwrap();

        assert!(searcher.client.requests()[0]
            .query
            .contains(&("search_lang".to_string(), "de".to_string())));
    }
}
