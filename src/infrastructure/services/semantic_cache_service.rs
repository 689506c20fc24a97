//! Semantic cache service
//!
//! Answers are reused for queries whose embeddings are close enough to a
//! previously answered query, unless the two queries are anchored to
//! different points in time.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info};

use crate::domain::semantic_cache::{
    check_invalidation, normalize_query, CacheEntry, CacheHit, CacheLookup, CacheMiss,
    CacheStats, MissReason, SemanticCacheConfig, SemanticCacheStore,
};
use crate::domain::{DomainError, RecencyPolicy, TextEmbedder};
use crate::infrastructure::observability::{record_cache_invalidation, record_cache_lookup};

/// Lookup, store, clear and stats over a semantic cache store
#[derive(Clone)]
pub struct SemanticCacheService {
    store: Arc<dyn SemanticCacheStore>,
    embedder: TextEmbedder,
    recency: Arc<RecencyPolicy>,
    config: SemanticCacheConfig,
}

impl std::fmt::Debug for SemanticCacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SemanticCacheService")
            .field("embedder", &self.embedder)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SemanticCacheService {
    pub fn new(
        store: Arc<dyn SemanticCacheStore>,
        embedder: TextEmbedder,
        recency: Arc<RecencyPolicy>,
        config: SemanticCacheConfig,
    ) -> Self {
        Self {
            store,
            embedder,
            recency,
            config,
        }
    }

    pub fn config(&self) -> &SemanticCacheConfig {
        &self.config
    }

    pub fn embedder(&self) -> &TextEmbedder {
        &self.embedder
    }

    fn validate_query(query: &str) -> Result<(), DomainError> {
        if query.trim().is_empty() {
            return Err(DomainError::validation("Query must not be empty"));
        }
        Ok(())
    }

    /// Embed the normalized form of a query
    pub async fn embed_query(&self, query: &str) -> Result<Vec<f32>, DomainError> {
        Self::validate_query(query)?;
        self.embedder.embed(&normalize_query(query)).await
    }

    /// Find a reusable answer for `query`.
    ///
    /// A miss is a normal outcome. Errors are only returned when embedding
    /// or the store fails.
    pub async fn lookup(&self, query: &str) -> Result<CacheLookup, DomainError> {
        let embedding = self.embed_query(query).await?;
        self.lookup_embedded(query, embedding).await
    }

    /// Lookup with an embedding the caller already computed
    pub async fn lookup_embedded(
        &self,
        query: &str,
        embedding: Vec<f32>,
    ) -> Result<CacheLookup, DomainError> {
        let candidate = self
            .store
            .best_match_cache(&embedding, self.config.similarity_threshold)
            .await?;

        let Some(candidate) = candidate else {
            debug!(threshold = self.config.similarity_threshold, "No cache candidate");
            return Ok(self.miss(MissReason::NoMatch, embedding));
        };

        let entry_age = candidate
            .entry
            .age(Utc::now())
            .to_std()
            .unwrap_or(Duration::ZERO);

        if let Some(reason) = check_invalidation(
            &self.recency,
            query,
            candidate.entry.query(),
            entry_age,
            self.config.relative_term_max_age(),
        ) {
            record_cache_invalidation(&reason);
            info!(
                cached_query = %candidate.entry.query(),
                similarity = candidate.similarity,
                rule = reason.rule(),
                "Cache candidate invalidated"
            );

            if reason.is_stale() {
                self.store
                    .delete_cache(
                        candidate.entry.query_hash(),
                        candidate.entry.captured_at(),
                    )
                    .await?;
            }

            return Ok(self.miss(reason, embedding));
        }

        match self.store.record_hit(candidate.entry.query_hash()).await? {
            Some(entry) => {
                record_cache_lookup(true);
                info!(
                    similarity = candidate.similarity,
                    hit_count = entry.hit_count(),
                    cached_query = %entry.query(),
                    "Semantic cache hit"
                );
                Ok(CacheLookup::Hit(CacheHit {
                    entry,
                    similarity: candidate.similarity,
                }))
            }
            // Removed by a concurrent clear between match and refresh
            None => Ok(self.miss(MissReason::NoMatch, embedding)),
        }
    }

    fn miss(&self, reason: MissReason, query_embedding: Vec<f32>) -> CacheLookup {
        record_cache_lookup(false);
        CacheLookup::Miss(CacheMiss {
            reason,
            query_embedding,
        })
    }

    /// Cache `response` as the answer to `query`
    pub async fn store(&self, query: &str, response: &str) -> Result<CacheEntry, DomainError> {
        let embedding = self.embed_query(query).await?;
        self.store_embedded(query, embedding, response).await
    }

    /// Store with an embedding the caller already computed
    pub async fn store_embedded(
        &self,
        query: &str,
        embedding: Vec<f32>,
        response: &str,
    ) -> Result<CacheEntry, DomainError> {
        Self::validate_query(query)?;

        let entry = CacheEntry::new(query.trim(), embedding, response);
        self.store.upsert_cache(entry.clone()).await?;

        debug!(query_hash = %entry.query_hash(), "Cached answer");
        Ok(entry)
    }

    /// Remove every entry
    pub async fn clear(&self) -> Result<(), DomainError> {
        self.store.truncate_cache().await?;
        info!("Semantic cache cleared");
        Ok(())
    }

    pub async fn stats(&self) -> Result<CacheStats, DomainError> {
        self.store.cache_stats().await
    }
}
