use std::sync::Arc;
use std::time::Duration;

use super::{LlmAnswerGenerator, OpenAiProvider};
use crate::config::{LlmConfig, Secrets};
use crate::domain::{AnswerGenerator, DomainError, LlmProvider};
use crate::infrastructure::http_client::HttpClient;

/// Factory for the chat model behind answer generation
#[derive(Debug)]
pub struct LlmProviderFactory;

impl LlmProviderFactory {
    pub fn create(config: &LlmConfig, secrets: &Secrets) -> Result<Arc<dyn LlmProvider>, DomainError> {
        let api_key = secrets
            .openai_api_key
            .as_deref()
            .ok_or_else(|| DomainError::configuration("OPENAI_API_KEY is required for answer generation"))?;

        let http_client = HttpClient::with_timeout(Duration::from_secs(config.timeout_secs))
            .map_err(|e| DomainError::configuration(e.to_string()))?;

        let provider = match &config.base_url {
            Some(url) => OpenAiProvider::with_base_url(http_client, api_key, url),
            None => OpenAiProvider::new(http_client, api_key),
        };

        Ok(Arc::new(provider))
    }

    pub fn create_answer_generator(
        config: &LlmConfig,
        secrets: &Secrets,
    ) -> Result<Arc<dyn AnswerGenerator>, DomainError> {
        let provider = Self::create(config, secrets)?;

        Ok(Arc::new(
            LlmAnswerGenerator::new(provider, &config.model)
                .with_temperature(config.temperature)
                .with_max_tokens(config.max_tokens),
        ))
    }
}
