//! Embedding provider domain models and traits

mod embedder;
mod provider;
mod request;
mod response;

pub use embedder::TextEmbedder;
pub use provider::EmbeddingProvider;
pub use request::EmbeddingRequest;
pub use response::{cosine_similarity, Embedding, EmbeddingResponse, EmbeddingUsage};

#[cfg(test)]
pub use provider::mock::{axis, tilted, MockEmbeddingProvider};
