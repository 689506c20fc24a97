//! Single-text embedding with dimension enforcement

use std::sync::Arc;

use super::{EmbeddingProvider, EmbeddingRequest};
use crate::domain::DomainError;

/// Embeds one text at a time against a fixed model and output dimension.
///
/// Every vector that reaches a store goes through here, so stored documents
/// and cache entries always share the system-wide dimension.
#[derive(Debug, Clone)]
pub struct TextEmbedder {
    provider: Arc<dyn EmbeddingProvider>,
    model: String,
    dimensions: usize,
}

impl TextEmbedder {
    pub fn new(
        provider: Arc<dyn EmbeddingProvider>,
        model: impl Into<String>,
        dimensions: usize,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            dimensions,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.provider_name()
    }

    pub async fn embed(&self, text: &str) -> Result<Vec<f32>, DomainError> {
        let mut request = EmbeddingRequest::single(&self.model, text);
        if self.provider.dimensions(&self.model) != Some(self.dimensions) {
            request = request.with_dimensions(self.dimensions);
        }

        let response = self.provider.embed(request).await?;

        let vector = response.into_first_vector().ok_or_else(|| {
            DomainError::embedding(self.provider.provider_name(), "Provider returned no embedding")
        })?;

        if vector.len() != self.dimensions {
            return Err(DomainError::embedding(
                self.provider.provider_name(),
                format!(
                    "Expected {} dimensions, got {}",
                    self.dimensions,
                    vector.len()
                ),
            ));
        }

        Ok(vector)
    }
}
