//! Embedding provider implementations

mod factory;
mod nomic;
mod openai;

pub use factory::EmbeddingProviderFactory;
pub use nomic::NomicEmbeddingProvider;
pub use openai::OpenAiEmbeddingProvider;
