//! Embedding request types

use serde::{Deserialize, Serialize};

/// Request to embed one or more texts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingRequest {
    model: String,
    texts: Vec<String>,
    /// Requested output size, for models that support truncation
    #[serde(skip_serializing_if = "Option::is_none")]
    dimensions: Option<usize>,
}

impl EmbeddingRequest {
    pub fn new(model: impl Into<String>, texts: Vec<String>) -> Self {
        Self {
            model: model.into(),
            texts,
            dimensions: None,
        }
    }

    /// Create a request for a single text
    pub fn single(model: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(model, vec![text.into()])
    }

    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    pub fn dimensions(&self) -> Option<usize> {
        self.dimensions
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}
