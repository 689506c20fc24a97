//! Nomic Atlas embedding provider

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::embedding::{
    Embedding, EmbeddingProvider, EmbeddingRequest, EmbeddingResponse, EmbeddingUsage,
};
use crate::domain::DomainError;
use crate::infrastructure::http_client::HttpClientTrait;

const DEFAULT_NOMIC_BASE_URL: &str = "https://api-atlas.nomic.ai";

const EMBEDDING_MODELS: &[(&str, usize)] = &[
    ("nomic-embed-text-v1.5", 768),
    ("nomic-embed-text-v1", 768),
];

/// Nomic embedding provider
#[derive(Debug)]
pub struct NomicEmbeddingProvider<C: HttpClientTrait> {
    client: C,
    auth_header: String,
    base_url: String,
}

impl<C: HttpClientTrait> NomicEmbeddingProvider<C> {
    pub fn new(client: C, api_key: impl Into<String>) -> Self {
        Self::with_base_url(client, api_key, DEFAULT_NOMIC_BASE_URL)
    }

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
        format!("{}/v1/embedding/text", self.base_url)
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
            "texts": request.texts(),
        });

        if let Some(dims) = request.dimensions() {
            body["dimensionality"] = serde_json::json!(dims);
        }

        body
    }

    fn parse_response(
        &self,
        model: &str,
        json: serde_json::Value,
    ) -> Result<EmbeddingResponse, DomainError> {
        let response: NomicEmbeddingResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::embedding("nomic", format!("Failed to parse embedding response: {}", e))
        })?;

        let embeddings = response
            .embeddings
            .into_iter()
            .enumerate()
            .map(|(idx, vector)| Embedding::new(idx, vector))
            .collect();

        let mut parsed = EmbeddingResponse::new(model, embeddings);
        if let Some(usage) = response.usage {
            parsed = parsed.with_usage(EmbeddingUsage::new(usage.total_tokens));
        }

        Ok(parsed)
    }
}

#[async_trait]
impl<C: HttpClientTrait> EmbeddingProvider for NomicEmbeddingProvider<C> {
    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, DomainError> {
        if request.is_empty() {
            return Err(DomainError::validation("Embedding request has no input"));
        }

        let body = self.build_request(&request);

        let response = self
            .client
            .post_json(&self.embeddings_url(), self.headers(), &body)
            .await
            .map_err(|e| DomainError::embedding("nomic", e.to_string()))?;

        let parsed = self.parse_response(request.model(), response)?;

        if parsed.embeddings().len() != request.texts().len() {
            return Err(DomainError::embedding(
                "nomic",
                format!(
                    "Expected {} embeddings, got {}",
                    request.texts().len(),
                    parsed.embeddings().len()
                ),
            ));
        }

        Ok(parsed)
    }

    fn provider_name(&self) -> &'static str {
        "nomic"
    }

    fn default_model(&self) -> &'static str {
        "nomic-embed-text-v1.5"
    }

    fn dimensions(&self, model: &str) -> Option<usize> {
        EMBEDDING_MODELS
            .iter()
            .find(|(name, _)| *name == model)
            .map(|(_, dims)| *dims)
    }
}

#[derive(Debug, Deserialize)]
struct NomicEmbeddingResponse {
    embeddings: Vec<Vec<f32>>,
    #[serde(default)]
    usage: Option<NomicUsage>,
}

#[derive(Debug, Deserialize)]
struct NomicUsage {
    total_tokens: u32,
}
