//! Embedding response types

use serde::{Deserialize, Serialize};

/// A single embedding vector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Embedding {
    /// Position of the source text in the request
    index: usize,
    embedding: Vec<f32>,
}

impl Embedding {
    pub fn new(index: usize, embedding: Vec<f32>) -> Self {
        Self { index, embedding }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn vector(&self) -> &[f32] {
        &self.embedding
    }

    pub fn dimensions(&self) -> usize {
        self.embedding.len()
    }

    pub fn into_vector(self) -> Vec<f32> {
        self.embedding
    }
}

/// Cosine similarity between two vectors.
///
/// Mismatched lengths, empty input and zero-norm vectors score 0.0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}

/// Token accounting reported by the provider, when available
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct EmbeddingUsage {
    total_tokens: u32,
}

impl EmbeddingUsage {
    pub fn new(total_tokens: u32) -> Self {
        Self { total_tokens }
    }

    pub fn total_tokens(&self) -> u32 {
        self.total_tokens
    }
}

/// Response from an embedding request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingResponse {
    model: String,
    data: Vec<Embedding>,
    usage: Option<EmbeddingUsage>,
}

impl EmbeddingResponse {
    pub fn new(model: impl Into<String>, data: Vec<Embedding>) -> Self {
        Self {
            model: model.into(),
            data,
            usage: None,
        }
    }

    pub fn with_usage(mut self, usage: EmbeddingUsage) -> Self {
        self.usage = Some(usage);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn embeddings(&self) -> &[Embedding] {
        &self.data
    }

    /// Get the first embedding (for single input requests)
    pub fn first(&self) -> Option<&Embedding> {
        self.data.first()
    }

    pub fn usage(&self) -> Option<&EmbeddingUsage> {
        self.usage.as_ref()
    }

    /// Consume the response, keeping only the vector of the first input
    pub fn into_first_vector(self) -> Option<Vec<f32>> {
        self.data.into_iter().next().map(Embedding::into_vector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity_identical() {
        let a = vec![1.0, 0.0, 0.0];

        let similarity = cosine_similarity(&a, &a);

        assert!((similarity - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_cosine_similarity_orthogonal() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![0.0, 1.0, 0.0];

        assert!(cosine_similarity(&a, &b).abs() < 0.0001);
    }

    #[test]
    fn test_cosine_similarity_opposite() {
        let a = vec![1.0, 0.0];
        let b = vec![-1.0, 0.0];

        assert!((cosine_similarity(&a, &b) + 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_cosine_similarity_degenerate_inputs() {
        let empty: Vec<f32> = vec![];
        let zero = vec![0.0, 0.0];

        assert_eq!(cosine_similarity(&empty, &[1.0, 2.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0, 2.0], &[1.0, 2.0, 3.0]), 0.0);
        assert_eq!(cosine_similarity(&zero, &[1.0, 2.0]), 0.0);
    }

    #[test]
    fn test_into_first_vector() {
        let response = EmbeddingResponse::new(
            "nomic-embed-text-v1.5",
            vec![
                Embedding::new(0, vec![0.1, 0.2]),
                Embedding::new(1, vec![0.3, 0.4]),
            ],
        )
        .with_usage(EmbeddingUsage::new(12));

        assert_eq!(response.usage().map(|u| u.total_tokens()), Some(12));
        assert_eq!(response.into_first_vector(), Some(vec![0.1, 0.2]));
    }

    #[test]
    fn test_into_first_vector_empty() {
        let response = EmbeddingResponse::new("model", vec![]);

        assert!(response.first().is_none());
        assert_eq!(response.into_first_vector(), None);
    }
}
