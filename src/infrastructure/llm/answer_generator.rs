//! LLM-backed answer generation

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::{AnswerContext, AnswerGenerator, DomainError, LlmProvider, LlmRequest};

const SYSTEM_PROMPT: &str = "You are a helpful financial research assistant.";

/// Answers from context with a chat model
#[derive(Debug)]
pub struct LlmAnswerGenerator {
    provider: Arc<dyn LlmProvider>,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl LlmAnswerGenerator {
    pub fn new(provider: Arc<dyn LlmProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature: 0.3,
            max_tokens: 1000,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    fn user_prompt(context: &str, query: &str) -> String {
        format!(
            "Context information:\n\n{}\n\nQuestion: {}\n\n\
             Answer the question based on the context information above. \
             If the context doesn't contain the information needed, say so. \
             Always cite your sources from the context. \
             Be concise and accurate.",
            context, query
        )
    }
}

#[async_trait]
impl AnswerGenerator for LlmAnswerGenerator {
    async fn generate(&self, context: &AnswerContext, query: &str) -> Result<String, DomainError> {
        let request = LlmRequest::builder()
            .system(SYSTEM_PROMPT)
            .user(Self::user_prompt(&context.render(), query))
            .temperature(self.temperature)
            .max_tokens(self.max_tokens)
            .build();

        let response = self.provider.chat(&self.model, request).await?;

        debug!(
            model = %self.model,
            provider = self.provider.provider_name(),
            tokens = response.usage.map(|u| u.total_tokens),
            "Answer generated"
        );

        response
            .content()
            .map(str::to_string)
            .ok_or_else(|| {
                DomainError::generation(self.provider.provider_name(), "Model returned an empty answer")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::llm::{LlmResponse, Message, MessageRole, MockLlmProvider};

    #[tokio::test]
    async fn test_generate_builds_prompt() {
        let provider = Arc::new(MockLlmProvider::new("mock").with_response(LlmResponse::new(
            "1",
            "gpt-4.1-mini",
            Message::assistant("  Apple earned $383B. "),
        )));
        let generator = LlmAnswerGenerator::new(provider.clone(), "gpt-4.1-mini");

        let answer = generator
            .generate(
                &AnswerContext::from_web_results("Web Search Results: x"),
                "Apple revenue?",
            )
            .await
            .unwrap();

        assert_eq!(answer, "Apple earned $383B.");

        let requests = provider.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].messages[0].role, MessageRole::System);
        assert!(requests[0].messages[1].content.contains("Web Information: Web Search Results: x"));
        assert!(requests[0].messages[1].content.contains("Question: Apple revenue?"));
        assert_eq!(requests[0].temperature, Some(0.3));
        assert_eq!(requests[0].max_tokens, Some(1000));
    }

    #[tokio::test]
    async fn test_empty_answer_is_generation_error() {
        let provider = Arc::new(
            MockLlmProvider::new("mock")
                .with_response(LlmResponse::new("1", "m", Message::assistant("   "))),
        );
        let generator = LlmAnswerGenerator::new(provider, "m");

        let result = generator.generate(&AnswerContext::default(), "q").await;

        assert!(matches!(result, Err(DomainError::Generation { .. })));
    }

    #[tokio::test]
    async fn test_provider_error_propagates() {
        let provider = Arc::new(MockLlmProvider::new("mock").with_error("overloaded"));
        let generator = LlmAnswerGenerator::new(provider, "m").with_max_tokens(10);

        let result = generator.generate(&AnswerContext::default(), "q").await;

        assert!(matches!(result, Err(DomainError::Generation { .. })));
    }
}
