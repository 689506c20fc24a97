//! OpenAI-compatible embedding provider

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::embedding::{
    Embedding, EmbeddingProvider, EmbeddingRequest, EmbeddingResponse, EmbeddingUsage,
};
use crate::domain::DomainError;
use crate::infrastructure::http_client::HttpClientTrait;

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";

/// Known OpenAI embedding models and their dimensions
const EMBEDDING_MODELS: &[(&str, usize)] = &[
    ("text-embedding-3-small", 1536),
    ("text-embedding-3-large", 3072),
    ("text-embedding-ada-002", 1536),
];

/// OpenAI embedding provider
#[derive(Debug)]
pub struct OpenAiEmbeddingProvider<C: HttpClientTrait> {
    client: C,
    auth_header: String,
    base_url: String,
}

impl<C: HttpClientTrait> OpenAiEmbeddingProvider<C> {
    pub fn new(client: C, api_key: impl Into<String>) -> Self {
        Self::with_base_url(client, api_key, DEFAULT_OPENAI_BASE_URL)
    }

    /// Point at any server speaking the OpenAI embeddings API
    pub fn with_base_url(
        client: C,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            auth_header: format!("Bearer {}", api_key.into()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn embeddings_url(&self) -> String {
        format!("{}/v1/embeddings", self.base_url)
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("Authorization", self.auth_header.as_str()),
            ("Content-Type", "application/json"),
        ]
    }

    fn build_request(&self, request: &EmbeddingRequest) -> serde_json::Value {
        let mut body = serde_json::json!({
            "model": request.model(),
            "input": request.texts(),
            "encoding_format": "float",
        });

        if let Some(dims) = request.dimensions() {
            body["dimensions"] = serde_json::json!(dims);
        }

        body
    }

    fn parse_response(&self, json: serde_json::Value) -> Result<EmbeddingResponse, DomainError> {
        let response: OpenAiEmbeddingResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::embedding("openai", format!("Failed to parse embedding response: {}", e))
        })?;

        let mut data = response.data;
        data.sort_by_key(|d| d.index);

        let embeddings = data
            .into_iter()
            .map(|d| Embedding::new(d.index, d.embedding))
            .collect();

        let mut parsed = EmbeddingResponse::new(response.model, embeddings);
        if let Some(usage) = response.usage {
            parsed = parsed.with_usage(EmbeddingUsage::new(usage.total_tokens));
        }

        Ok(parsed)
    }
}

#[async_trait]
impl<C: HttpClientTrait> EmbeddingProvider for OpenAiEmbeddingProvider<C> {
    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, DomainError> {
        if request.is_empty() {
            return Err(DomainError::validation("Embedding request has no input"));
        }

        let body = self.build_request(&request);

        let response = self
            .client
            .post_json(&self.embeddings_url(), self.headers(), &body)
            .await
            .map_err(|e| DomainError::embedding("openai", e.to_string()))?;

        self.parse_response(response)
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn default_model(&self) -> &'static str {
        "text-embedding-3-small"
    }

    fn dimensions(&self, model: &str) -> Option<usize> {
        EMBEDDING_MODELS
            .iter()
            .find(|(name, _)| *name == model)
            .map(|(_, dims)| *dims)
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiEmbeddingResponse {
    model: String,
    data: Vec<OpenAiEmbeddingData>,
    #[serde(default)]
    usage: Option<OpenAiEmbeddingUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAiEmbeddingData {
    index: usize,
    embedding: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct OpenAiEmbeddingUsage {
    total_tokens: u32,
}
