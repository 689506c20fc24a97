//! Query orchestration with per-process session statistics

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::info;

use super::{AgenticRouter, RoutedAnswer};
use crate::domain::{CacheStats, DomainError, RouteStrategy};
use crate::infrastructure::observability::record_query_duration;

/// Characters of document content included in a source summary
pub const SOURCE_PREVIEW_CHARS: usize = 200;

/// A document that contributed to an answer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceSummary {
    pub id: String,
    pub title: String,
    pub preview: String,
    pub metadata: HashMap<String, serde_json::Value>,
    pub score: f32,
}

/// Everything a caller needs to show for one query
#[derive(Debug, Clone, Serialize)]
pub struct QueryOutcome {
    pub answer: String,
    pub strategy: RouteStrategy,
    pub reason: String,
    pub cache_hit: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f32>,
    pub sources: Vec<SourceSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_results: Option<String>,
    pub elapsed_ms: u64,
}

impl QueryOutcome {
    fn from_routed(routed: RoutedAnswer, elapsed_ms: u64) -> Self {
        let decision = &routed.decision;

        let sources = decision
            .documents()
            .iter()
            .map(|scored| SourceSummary {
                id: scored.document.id.clone(),
                title: scored.document.title().to_string(),
                preview: scored.document.preview(SOURCE_PREVIEW_CHARS),
                metadata: scored.document.metadata.clone(),
                score: scored.score,
            })
            .collect();

        Self {
            strategy: decision.strategy(),
            reason: decision.reason().to_string(),
            cache_hit: decision.strategy() == RouteStrategy::CacheHit,
            similarity: decision.similarity(),
            sources,
            answer: routed.answer,
            web_results: routed.web_results,
            elapsed_ms,
        }
    }
}

/// Persisted cache stats combined with this process's hit/miss counters
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CacheReport {
    pub total_entries: u64,
    pub total_hits: u64,
    pub session_hits: u64,
    pub session_misses: u64,
    /// Session hits over session queries, 0 before the first query
    pub hit_rate: f64,
}

impl CacheReport {
    fn new(stats: CacheStats, session_hits: u64, session_misses: u64) -> Self {
        let total = session_hits + session_misses;
        let hit_rate = if total == 0 {
            0.0
        } else {
            session_hits as f64 / total as f64
        };

        Self {
            total_entries: stats.total_entries,
            total_hits: stats.total_hits,
            session_hits,
            session_misses,
            hit_rate,
        }
    }
}

#[derive(Debug, Default)]
struct SessionCounters {
    hits: AtomicU64,
    misses: AtomicU64,
}

/// Entry point for answering queries
#[derive(Debug, Clone)]
pub struct RagPipeline {
    router: AgenticRouter,
    session: Arc<SessionCounters>,
}

impl RagPipeline {
    pub fn new(router: AgenticRouter) -> Self {
        Self {
            router,
            session: Arc::new(SessionCounters::default()),
        }
    }

    pub fn router(&self) -> &AgenticRouter {
        &self.router
    }

    pub async fn query(&self, query: &str) -> Result<QueryOutcome, DomainError> {
        let start = Instant::now();

        let routed = self.router.answer(query).await?;

        let elapsed = start.elapsed();
        let strategy = routed.decision.strategy();
        record_query_duration(strategy, elapsed);

        if strategy == RouteStrategy::CacheHit {
            self.session.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.session.misses.fetch_add(1, Ordering::Relaxed);
        }

        info!(
            strategy = %strategy,
            elapsed_ms = elapsed.as_millis() as u64,
            cached = routed.cached,
            "Query answered"
        );

        Ok(QueryOutcome::from_routed(routed, elapsed.as_millis() as u64))
    }

    pub async fn cache_report(&self) -> Result<CacheReport, DomainError> {
        let stats = self.router.cache().stats().await?;

        Ok(CacheReport::new(
            stats,
            self.session.hits.load(Ordering::Relaxed),
            self.session.misses.load(Ordering::Relaxed),
        ))
    }

    pub async fn clear_cache(&self) -> Result<(), DomainError> {
        self.router.cache().clear().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::answer::MockAnswerGenerator;
    use crate::domain::embedding::{axis, MockEmbeddingProvider};
    use crate::domain::web_search::MockWebSearcher;
    use crate::domain::{
        Document, DocumentStore, RecencyPolicy, RouterConfig, SemanticCacheConfig, TextEmbedder,
    };
    use crate::infrastructure::document::InMemoryDocumentStore;
    use crate::infrastructure::semantic_cache::InMemorySemanticCacheStore;
    use crate::infrastructure::services::SemanticCacheService;
    use serde_json::json;

    const DIMS: usize = 8;

    async fn pipeline() -> RagPipeline {
        let embedder = TextEmbedder::new(
            Arc::new(
                MockEmbeddingProvider::new("mock", DIMS)
                    .with_vector("apple revenue", axis(DIMS, 0)),
            ),
            "mock-embedding",
            DIMS,
        );
        let documents = InMemoryDocumentStore::new();
        documents
            .upsert_document(
                Document::new("doc_a", "A".repeat(300), axis(DIMS, 0))
                    .with_metadata("company", json!("Apple Inc.")),
            )
            .await
            .unwrap();

        let recency = Arc::new(RecencyPolicy::default());
        let cache = SemanticCacheService::new(
            Arc::new(InMemorySemanticCacheStore::new()),
            embedder,
            recency.clone(),
            SemanticCacheConfig::default(),
        );

        let mut generator = MockAnswerGenerator::new();
        generator
            .expect_generate()
            .times(1)
            .returning(|_, _| Ok("Apple made $383B".to_string()));

        RagPipeline::new(AgenticRouter::new(
            cache,
            Arc::new(documents),
            Arc::new(MockWebSearcher::new()),
            Arc::new(generator),
            recency,
            RouterConfig::default(),
        ))
    }

    #[tokio::test]
    async fn test_query_outcome_and_session_stats() {
        let pipeline = pipeline().await;

        let first = pipeline.query("Apple revenue").await.unwrap();
        let second = pipeline.query("apple revenue").await.unwrap();

        assert_eq!(first.strategy, RouteStrategy::VectorRetrieve);
        assert!(!first.cache_hit);
        assert_eq!(first.sources.len(), 1);
        assert_eq!(first.sources[0].title, "Apple Inc.");
        assert_eq!(first.sources[0].preview.chars().count(), SOURCE_PREVIEW_CHARS + 3);

        assert!(second.cache_hit);
        assert_eq!(second.answer, "Apple made $383B");
        assert!(second.similarity.unwrap() > 0.999);
        assert!(second.sources.is_empty());

        let report = pipeline.cache_report().await.unwrap();
        assert_eq!(report.total_entries, 1);
        assert_eq!(report.total_hits, 2);
        assert_eq!(report.session_hits, 1);
        assert_eq!(report.session_misses, 1);
        assert!((report.hit_rate - 0.5).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_clear_cache() {
        let pipeline = pipeline().await;
        pipeline.query("Apple revenue").await.unwrap();

        pipeline.clear_cache().await.unwrap();

        let report = pipeline.cache_report().await.unwrap();
        assert_eq!(report.total_entries, 0);
        assert_eq!(report.total_hits, 0);
    }

    #[test]
    fn test_hit_rate_before_queries() {
        let report = CacheReport::new(CacheStats::default(), 0, 0);

        assert_eq!(report.hit_rate, 0.0);
    }

    #[test]
    fn test_outcome_serialization() {
        let outcome = QueryOutcome {
            answer: "a".to_string(),
            strategy: RouteStrategy::WebSearch,
            reason: "r".to_string(),
            cache_hit: false,
            similarity: None,
            sources: vec![],
            web_results: None,
            elapsed_ms: 12,
        };

        let value = serde_json::to_value(&outcome).unwrap();

        assert_eq!(value["strategy"], "WEB_SEARCH");
        assert!(value.get("similarity").is_none());
        assert_eq!(value["elapsed_ms"], 12);
    }
}
