//! JSON-over-HTTP client shared by the embedding, LLM and search adapters

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Transport-level failure; adapters map it to their own stage error
#[derive(Debug, Error)]
pub enum HttpClientError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Failed to build HTTP client: {0}")]
    Build(String),
}

/// Trait for HTTP client operations (for mocking)
#[async_trait]
pub trait HttpClientTrait: Send + Sync + std::fmt::Debug {
    async fn post_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, HttpClientError>;

    async fn get_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        query: Vec<(&str, String)>,
    ) -> Result<serde_json::Value, HttpClientError>;
}

/// Real HTTP client using reqwest
#[derive(Debug, Clone, Default)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, HttpClientError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HttpClientError::Build(e.to_string()))?;

        Ok(Self { client })
    }

    async fn read_json(response: reqwest::Response) -> Result<serde_json::Value, HttpClientError> {
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(HttpClientError::Status { status, body });
        }

        response
            .json()
            .await
            .map_err(|e| HttpClientError::Decode(e.to_string()))
    }
}

#[async_trait]
impl HttpClientTrait for HttpClient {
    async fn post_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, HttpClientError> {
        let mut request = self.client.post(url);

        for (key, value) in headers {
            request = request.header(key, value);
        }

        let response = request
            .json(body)
            .send()
            .await
            .map_err(|e| HttpClientError::Request(e.to_string()))?;

        Self::read_json(response).await
    }

    async fn get_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        query: Vec<(&str, String)>,
    ) -> Result<serde_json::Value, HttpClientError> {
        let mut request = self.client.get(url).query(&query);

        for (key, value) in headers {
            request = request.header(key, value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| HttpClientError::Request(e.to_string()))?;

        Self::read_json(response).await
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = HttpClientError::Status {
            status: 429,
            body: "rate limited".to_string(),
        };

        assert_eq!(error.to_string(), "HTTP 429: rate limited");
    }

    #[test]
    fn test_with_timeout_builds() {
        assert!(HttpClient::with_timeout(Duration::from_secs(5)).is_ok());
    }
}
