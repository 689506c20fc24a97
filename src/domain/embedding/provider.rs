//! Embedding provider trait definition

use async_trait::async_trait;
use std::fmt::Debug;

use super::{EmbeddingRequest, EmbeddingResponse};
use crate::domain::DomainError;

/// Trait for embedding providers (OpenAI-compatible, Nomic, ...)
#[async_trait]
pub trait EmbeddingProvider: Send + Sync + Debug {
    /// Generate embeddings for the given texts
    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, DomainError>;

    fn provider_name(&self) -> &'static str;

    fn default_model(&self) -> &'static str;

    /// Output dimensions of a known model
    fn dimensions(&self, model: &str) -> Option<usize>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use crate::domain::embedding::Embedding;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Deterministic embedding provider.
    ///
    /// Unknown texts map to pseudo-random vectors seeded from the text, so two
    /// different texts are nearly orthogonal while equal texts embed identically.
    /// Explicit vectors can be pinned per text to build near-duplicates.
    #[derive(Debug)]
    pub struct MockEmbeddingProvider {
        name: &'static str,
        dimensions: usize,
        error: Option<String>,
        pinned: HashMap<String, Vec<f32>>,
        calls: AtomicUsize,
    }

    impl MockEmbeddingProvider {
        pub fn new(name: &'static str, dimensions: usize) -> Self {
            Self {
                name,
                dimensions,
                error: None,
                pinned: HashMap::new(),
                calls: AtomicUsize::new(0),
            }
        }

        pub fn with_error(mut self, error: impl Into<String>) -> Self {
            self.error = Some(error.into());
            self
        }

        /// Pin the vector returned for a text (matched after trim + lowercase)
        pub fn with_vector(mut self, text: &str, vector: Vec<f32>) -> Self {
            self.pinned.insert(text.trim().to_lowercase(), vector);
            self
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn seeded_vector(&self, text: &str) -> Vec<f32> {
            // FNV-1a seed, splitmix64 per dimension
            let seed = text.bytes().fold(0xcbf29ce484222325u64, |acc, b| {
                (acc ^ b as u64).wrapping_mul(0x100000001b3)
            });

            (0..self.dimensions as u64)
                .map(|i| {
                    let mut z = (seed ^ i).wrapping_add(0x9E3779B97F4A7C15);
                    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
                    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
                    z ^= z >> 31;
                    (z as f64 / u64::MAX as f64) as f32 - 0.5
                })
                .collect()
        }
    }

    /// Unit vector along one axis
    pub fn axis(dimensions: usize, index: usize) -> Vec<f32> {
        let mut vector = vec![0.0; dimensions];
        vector[index] = 1.0;
        vector
    }

    /// Unit-ish vector along `index`, tilted slightly towards `towards`
    pub fn tilted(dimensions: usize, index: usize, towards: usize, amount: f32) -> Vec<f32> {
        let mut vector = axis(dimensions, index);
        vector[towards] = amount;
        vector
    }

    #[async_trait]
    impl EmbeddingProvider for MockEmbeddingProvider {
        async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);

            if let Some(ref error) = self.error {
                return Err(DomainError::embedding(self.name, error));
            }

            let embeddings = request
                .texts()
                .iter()
                .enumerate()
                .map(|(idx, text)| {
                    let vector = self
                        .pinned
                        .get(&text.trim().to_lowercase())
                        .cloned()
                        .unwrap_or_else(|| self.seeded_vector(text));
                    Embedding::new(idx, vector)
                })
                .collect();

            Ok(EmbeddingResponse::new(request.model(), embeddings))
        }

        fn provider_name(&self) -> &'static str {
            self.name
        }

        fn default_model(&self) -> &'static str {
            "mock-embedding"
        }

        fn dimensions(&self, _model: &str) -> Option<usize> {
            Some(self.dimensions)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::domain::embedding::cosine_similarity;

        #[tokio::test]
        async fn test_deterministic_embeddings() {
            let provider = MockEmbeddingProvider::new("test", 64);

            let first = provider
                .embed(EmbeddingRequest::single("mock-embedding", "Hello"))
                .await
                .unwrap();
            let second = provider
                .embed(EmbeddingRequest::single("mock-embedding", "Hello"))
                .await
                .unwrap();

            assert_eq!(first.embeddings()[0].vector(), second.embeddings()[0].vector());
            assert_eq!(first.embeddings()[0].dimensions(), 64);
            assert_eq!(provider.calls(), 2);
        }

        #[tokio::test]
        async fn test_distinct_texts_are_dissimilar() {
            let provider = MockEmbeddingProvider::new("test", 64);

            let response = provider
                .embed(EmbeddingRequest::new(
                    "mock-embedding",
                    vec!["apple revenue".into(), "tell me a joke".into()],
                ))
                .await
                .unwrap();

            let similarity = cosine_similarity(
                response.embeddings()[0].vector(),
                response.embeddings()[1].vector(),
            );
            assert!(similarity < 0.8);
        }

        #[tokio::test]
        async fn test_pinned_vector() {
            let provider =
                MockEmbeddingProvider::new("test", 4).with_vector("Pinned", axis(4, 2));

            let response = provider
                .embed(EmbeddingRequest::single("mock-embedding", "  pinned "))
                .await
                .unwrap();

            assert_eq!(response.embeddings()[0].vector(), &[0.0, 0.0, 1.0, 0.0]);
        }

        #[tokio::test]
        async fn test_error() {
            let provider = MockEmbeddingProvider::new("test", 4).with_error("API error");

            let result = provider
                .embed(EmbeddingRequest::single("mock-embedding", "Hello"))
                .await;

            assert!(matches!(result, Err(DomainError::Embedding { .. })));
        }
    }
}
