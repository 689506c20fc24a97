use std::sync::Arc;
use std::time::Duration;

use super::{NomicEmbeddingProvider, OpenAiEmbeddingProvider};
use crate::config::{EmbeddingConfig, EmbeddingProviderKind, Secrets};
use crate::domain::{DomainError, EmbeddingProvider, TextEmbedder};
use crate::infrastructure::http_client::HttpClient;

/// Factory for the configured embedding provider
#[derive(Debug)]
pub struct EmbeddingProviderFactory;

impl EmbeddingProviderFactory {
    pub fn create(
        config: &EmbeddingConfig,
        secrets: &Secrets,
    ) -> Result<Arc<dyn EmbeddingProvider>, DomainError> {
        let http_client = HttpClient::with_timeout(Duration::from_secs(config.timeout_secs))
            .map_err(|e| DomainError::configuration(e.to_string()))?;

        match config.provider {
            EmbeddingProviderKind::OpenAi => {
                let api_key = secrets.openai_api_key.as_deref().ok_or_else(|| {
                    DomainError::configuration("OPENAI_API_KEY is required for OpenAI embeddings")
                })?;

                let provider = match &config.base_url {
                    Some(url) => OpenAiEmbeddingProvider::with_base_url(http_client, api_key, url),
                    None => OpenAiEmbeddingProvider::new(http_client, api_key),
                };
                Ok(Arc::new(provider))
            }

            EmbeddingProviderKind::Nomic => {
                let api_key = secrets.nomic_api_key.as_deref().ok_or_else(|| {
                    DomainError::configuration("NOMIC_API_KEY is required for Nomic embeddings")
                })?;

                let provider = match &config.base_url {
                    Some(url) => NomicEmbeddingProvider::with_base_url(http_client, api_key, url),
                    None => NomicEmbeddingProvider::new(http_client, api_key),
                };
                Ok(Arc::new(provider))
            }
        }
    }

    /// Provider wrapped with the configured model and output dimension
    pub fn create_embedder(
        config: &EmbeddingConfig,
        secrets: &Secrets,
    ) -> Result<TextEmbedder, DomainError> {
        let provider = Self::create(config, secrets)?;
        let model = config
            .model
            .clone()
            .unwrap_or_else(|| provider.default_model().to_string());

        Ok(TextEmbedder::new(provider, model, config.dimensions))
    }
}
