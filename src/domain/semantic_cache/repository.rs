//! Semantic cache store trait and lookup types

use async_trait::async_trait;
use chrono::{DateTime, Utc};
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use super::{CacheEntry, MissReason};
use crate::domain::DomainError;

/// Best candidate returned by a similarity query
#[derive(Debug, Clone)]
pub struct CacheMatch {
    pub entry: CacheEntry,
    /// Cosine similarity to the query embedding
    pub similarity: f32,
}

impl CacheMatch {
    pub fn new(entry: CacheEntry, similarity: f32) -> Self {
        Self { entry, similarity }
    }
}

/// Persisted cache statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Number of distinct entries
    pub total_entries: u64,
    /// Sum of `hit_count` across entries
    pub total_hits: u64,
}

/// Accepted cache candidate
#[derive(Debug, Clone)]
pub struct CacheHit {
    /// Entry after its hit count and timestamp were refreshed
    pub entry: CacheEntry,
    pub similarity: f32,
}

/// Rejected lookup; carries the query embedding so later stages can reuse it
#[derive(Debug, Clone)]
pub struct CacheMiss {
    pub reason: MissReason,
    pub query_embedding: Vec<f32>,
}

/// Outcome of a cache lookup. A miss is not an error.
#[derive(Debug, Clone)]
pub enum CacheLookup {
    Hit(CacheHit),
    Miss(CacheMiss),
}

impl CacheLookup {
    pub fn is_hit(&self) -> bool {
        matches!(self, Self::Hit(_))
    }

    pub fn hit(&self) -> Option<&CacheHit> {
        match self {
            Self::Hit(hit) => Some(hit),
            Self::Miss(_) => None,
        }
    }

    pub fn miss(&self) -> Option<&CacheMiss> {
        match self {
            Self::Hit(_) => None,
            Self::Miss(miss) => Some(miss),
        }
    }
}

/// Storage for cache entries.
///
/// Implementations must give read-after-write visibility, last-writer-wins
/// upserts keyed by `query_hash`, and an all-or-nothing truncate.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SemanticCacheStore: Send + Sync {
    /// Insert a new entry or overwrite query, embedding, response,
    /// timestamp and capture time of the entry with the same hash. Hit
    /// counts are kept.
    async fn upsert_cache(&self, entry: CacheEntry) -> Result<(), DomainError>;

    /// Single most similar entry with similarity >= `threshold`
    async fn best_match_cache(
        &self,
        embedding: &[f32],
        threshold: f32,
    ) -> Result<Option<CacheMatch>, DomainError>;

    /// Atomically increment `hit_count` and set `timestamp = now`.
    /// `captured_at` is left unchanged.
    ///
    /// Returns the refreshed entry, or `None` if it no longer exists.
    async fn record_hit(&self, query_hash: &str) -> Result<Option<CacheEntry>, DomainError>;

    /// Remove the entry only if it still holds the answer captured at
    /// `captured_at`, so a concurrent re-store survives. Returns whether
    /// a row was removed.
    async fn delete_cache(
        &self,
        query_hash: &str,
        captured_at: DateTime<Utc>,
    ) -> Result<bool, DomainError>;

    /// Remove every entry in a single atomic operation
    async fn truncate_cache(&self) -> Result<(), DomainError>;

    async fn cache_stats(&self) -> Result<CacheStats, DomainError>;
}
