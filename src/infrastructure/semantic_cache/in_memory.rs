//! In-memory semantic cache store

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::embedding::cosine_similarity;
use crate::domain::semantic_cache::{CacheEntry, CacheMatch, CacheStats, SemanticCacheStore};
use crate::domain::DomainError;

/// Semantic cache store using a linear scan over all entries.
///
/// Suitable for development, tests and the CLI. Use
/// `PgvectorSemanticCacheStore` when entries must survive restarts.
#[derive(Debug, Default)]
pub struct InMemorySemanticCacheStore {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl InMemorySemanticCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_error(e: impl std::fmt::Display) -> DomainError {
        DomainError::store(format!("Semantic cache lock poisoned: {}", e))
    }
}

#[async_trait]
impl SemanticCacheStore for InMemorySemanticCacheStore {
    async fn upsert_cache(&self, entry: CacheEntry) -> Result<(), DomainError> {
        let mut entries = self.entries.write().map_err(Self::lock_error)?;

        match entries.get_mut(entry.query_hash()) {
            Some(existing) => existing.overwrite_with(entry),
            None => {
                entries.insert(entry.query_hash().to_string(), entry);
            }
        }

        Ok(())
    }

    async fn best_match_cache(
        &self,
        embedding: &[f32],
        threshold: f32,
    ) -> Result<Option<CacheMatch>, DomainError> {
        let entries = self.entries.read().map_err(Self::lock_error)?;

        let best = entries
            .values()
            .map(|entry| (entry, cosine_similarity(embedding, entry.query_embedding())))
            .filter(|(_, similarity)| *similarity >= threshold)
            .max_by(|a, b| a.1.total_cmp(&b.1));

        Ok(best.map(|(entry, similarity)| CacheMatch::new(entry.clone(), similarity)))
    }

    async fn record_hit(&self, query_hash: &str) -> Result<Option<CacheEntry>, DomainError> {
        let mut entries = self.entries.write().map_err(Self::lock_error)?;

        Ok(entries.get_mut(query_hash).map(|entry| {
            entry.record_hit(Utc::now());
            entry.clone()
        }))
    }

    async fn delete_cache(
        &self,
        query_hash: &str,
        captured_at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let mut entries = self.entries.write().map_err(Self::lock_error)?;

        let matches = entries
            .get(query_hash)
            .is_some_and(|entry| entry.captured_at() == captured_at);
        if matches {
            entries.remove(query_hash);
        }

        Ok(matches)
    }

    async fn truncate_cache(&self) -> Result<(), DomainError> {
        let mut entries = self.entries.write().map_err(Self::lock_error)?;

        entries.clear();
        Ok(())
    }

    async fn cache_stats(&self) -> Result<CacheStats, DomainError> {
        let entries = self.entries.read().map_err(Self::lock_error)?;

        Ok(CacheStats {
            total_entries: entries.len() as u64,
            total_hits: entries.values().map(|e| u64::from(e.hit_count())).sum(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_best_match_picks_highest_above_threshold() {
        let store = InMemorySemanticCacheStore::new();

        store
            .upsert_cache(CacheEntry::new("close", vec![1.0, 0.1, 0.0], "a"))
            .await
            .unwrap();
        store
            .upsert_cache(CacheEntry::new("exact", vec![1.0, 0.0, 0.0], "b"))
            .await
            .unwrap();
        store
            .upsert_cache(CacheEntry::new("far", vec![0.0, 1.0, 0.0], "c"))
            .await
            .unwrap();

        let found = store
            .best_match_cache(&[1.0, 0.0, 0.0], 0.9)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(found.entry.query(), "exact");
        assert!((found.similarity - 1.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_best_match_respects_threshold() {
        let store = InMemorySemanticCacheStore::new();
        store
            .upsert_cache(CacheEntry::new("far", vec![0.0, 1.0], "c"))
            .await
            .unwrap();

        let found = store.best_match_cache(&[1.0, 0.0], 0.5).await.unwrap();

        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_upsert_overwrites_and_keeps_hits() {
        let store = InMemorySemanticCacheStore::new();
        let entry = CacheEntry::new("Apple revenue", vec![1.0, 0.0], "old");
        let hash = entry.query_hash().to_string();

        store.upsert_cache(entry).await.unwrap();
        store.record_hit(&hash).await.unwrap();
        store
            .upsert_cache(CacheEntry::new("apple revenue ", vec![1.0, 0.0], "new"))
            .await
            .unwrap();

        let stats = store.cache_stats().await.unwrap();
        assert_eq!(stats.total_entries, 1);
        assert_eq!(stats.total_hits, 2);

        let refreshed = store.record_hit(&hash).await.unwrap().unwrap();
        assert_eq!(refreshed.response(), "new");
        assert_eq!(refreshed.hit_count(), 3);
    }

    #[tokio::test]
    async fn test_delete_skips_restored_entry() {
        let store = InMemorySemanticCacheStore::new();
        let stale = CacheEntry::new("latest apple news", vec![1.0, 0.0], "old news")
            .with_timestamp(Utc::now() - chrono::Duration::days(3));
        let hash = stale.query_hash().to_string();
        let observed = stale.captured_at();
        store.upsert_cache(stale).await.unwrap();

        store
            .upsert_cache(CacheEntry::new("latest apple news", vec![1.0, 0.0], "fresh news"))
            .await
            .unwrap();

        assert!(!store.delete_cache(&hash, observed).await.unwrap());
        let survivor = store.record_hit(&hash).await.unwrap().unwrap();
        assert_eq!(survivor.response(), "fresh news");
    }

    #[tokio::test]
    async fn test_record_hit_keeps_capture_time() {
        let store = InMemorySemanticCacheStore::new();
        let entry = CacheEntry::new("q", vec![1.0], "r")
            .with_timestamp(Utc::now() - chrono::Duration::hours(5));
        let hash = entry.query_hash().to_string();
        let captured_at = entry.captured_at();
        store.upsert_cache(entry).await.unwrap();

        let refreshed = store.record_hit(&hash).await.unwrap().unwrap();

        assert_eq!(refreshed.captured_at(), captured_at);
        assert!(refreshed.timestamp() > captured_at);
    }

    #[tokio::test]
    async fn test_record_hit_missing() {
        let store = InMemorySemanticCacheStore::new();

        assert!(store.record_hit("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_and_truncate() {
        let store = InMemorySemanticCacheStore::new();
        let entry = CacheEntry::new("q1", vec![1.0], "r");
        let hash = entry.query_hash().to_string();
        let captured_at = entry.captured_at();
        store.upsert_cache(entry).await.unwrap();
        store
            .upsert_cache(CacheEntry::new("q2", vec![1.0], "r"))
            .await
            .unwrap();

        assert!(store.delete_cache(&hash, captured_at).await.unwrap());
        assert!(!store.delete_cache(&hash, captured_at).await.unwrap());
        assert_eq!(store.cache_stats().await.unwrap().total_entries, 1);

        store.truncate_cache().await.unwrap();

        assert_eq!(store.cache_stats().await.unwrap(), CacheStats::default());
    }
}
