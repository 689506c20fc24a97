//! Domain layer - Core entities, contracts and pure policy

pub mod answer;
pub mod document;
pub mod embedding;
pub mod error;
pub mod llm;
pub mod recency;
pub mod routing;
pub mod semantic_cache;
pub mod web_search;

pub use answer::{AnswerContext, AnswerGenerator, NO_CONTEXT_ANSWER};
pub use document::{document_id_for, Document, DocumentStore, ScoredDocument};
pub use embedding::{EmbeddingProvider, TextEmbedder};
pub use error::DomainError;
pub use llm::{LlmProvider, LlmRequest, LlmResponse, Message, MessageRole};
pub use recency::{classify_recency, RecencyClassification, RecencyConfig, RecencyPolicy};
pub use routing::{RouteDecision, RouteStrategy, RouterConfig};
pub use semantic_cache::{
    CacheEntry, CacheHit, CacheLookup, CacheMiss, CacheStats, MissReason, SemanticCacheConfig,
    SemanticCacheStore,
};
pub use web_search::{SearchSnippet, WebSearcher};
