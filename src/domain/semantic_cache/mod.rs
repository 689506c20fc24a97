//! Semantic cache domain models and traits
//!
//! Answers are keyed by the embedding of the query that produced them, so a
//! sufficiently similar later query can reuse the answer without a new LLM
//! call. Time-sensitive queries are guarded by invalidation rules.

mod config;
mod entry;
mod invalidation;
mod repository;

pub use config::SemanticCacheConfig;
pub use entry::{normalize_query, query_hash, CacheEntry};
pub use invalidation::{check_invalidation, MissReason};
pub use repository::{
    CacheHit, CacheLookup, CacheMatch, CacheMiss, CacheStats, SemanticCacheStore,
};

#[cfg(test)]
pub use repository::MockSemanticCacheStore;
