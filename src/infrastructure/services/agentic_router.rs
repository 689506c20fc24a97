//! Agentic query routing
//!
//! Every query goes to exactly one answer source: the semantic cache, the
//! local document store, or live web search. Answers from the last two are
//! written back to the cache once generation succeeds.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::SemanticCacheService;
use crate::domain::web_search::format_results;
use crate::domain::{
    AnswerContext, AnswerGenerator, CacheLookup, DocumentStore, DomainError, RecencyPolicy,
    RouteDecision, RouteStrategy, RouterConfig, WebSearcher, NO_CONTEXT_ANSWER,
};
use crate::infrastructure::observability::record_route_decision;

/// Answer produced for one routed query
#[derive(Debug, Clone)]
pub struct RoutedAnswer {
    pub decision: RouteDecision,
    pub answer: String,
    /// Formatted web results, for web-search answers
    pub web_results: Option<String>,
    /// Whether the answer was written to the cache
    pub cached: bool,
}

/// Chooses an answer source per query and produces the answer
#[derive(Clone)]
pub struct AgenticRouter {
    cache: SemanticCacheService,
    documents: Arc<dyn DocumentStore>,
    web_searcher: Arc<dyn WebSearcher>,
    generator: Arc<dyn AnswerGenerator>,
    recency: Arc<RecencyPolicy>,
    config: RouterConfig,
}

impl std::fmt::Debug for AgenticRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgenticRouter")
            .field("cache", &self.cache)
            .field("web_searcher", &self.web_searcher.provider_name())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl AgenticRouter {
    pub fn new(
        cache: SemanticCacheService,
        documents: Arc<dyn DocumentStore>,
        web_searcher: Arc<dyn WebSearcher>,
        generator: Arc<dyn AnswerGenerator>,
        recency: Arc<RecencyPolicy>,
        config: RouterConfig,
    ) -> Self {
        Self {
            cache,
            documents,
            web_searcher,
            generator,
            recency,
            config,
        }
    }

    pub fn cache(&self) -> &SemanticCacheService {
        &self.cache
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Decide where the answer to `query` comes from
    pub async fn route(&self, query: &str) -> Result<RouteDecision, DomainError> {
        let decision = self.decide(query).await?;

        record_route_decision(decision.strategy());
        info!(
            strategy = %decision.strategy(),
            reason = %decision.reason(),
            "Routed query"
        );

        Ok(decision)
    }

    async fn decide(&self, query: &str) -> Result<RouteDecision, DomainError> {
        let miss = match self.cache.lookup(query).await? {
            CacheLookup::Hit(hit) => {
                let reason = format!(
                    "Cached answer with similarity {:.4} (hit #{})",
                    hit.similarity,
                    hit.entry.hit_count()
                );
                return Ok(RouteDecision::cache_hit(hit, reason));
            }
            CacheLookup::Miss(miss) => miss,
        };

        let recency = self.recency.classify(query);
        let boundary_year = self.config.boundary_year();

        if recency.is_recent(boundary_year) && !self.config.documents_cover_present {
            let reason = match recency.latest_year() {
                Some(year) if year >= boundary_year && !recency.sensitive_relative() => format!(
                    "Cache miss ({}); query references {} which is at or after {}",
                    miss.reason, year, boundary_year
                ),
                _ => format!(
                    "Cache miss ({}); query is time-sensitive ({})",
                    miss.reason,
                    recency
                        .relative_terms
                        .iter()
                        .cloned()
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            };
            return Ok(RouteDecision::web_search(miss.query_embedding, reason));
        }

        let documents = self
            .documents
            .nearest_documents(&miss.query_embedding, self.config.top_k)
            .await?;

        let best_score = documents.first().map(|d| d.score);
        debug!(
            retrieved = documents.len(),
            best_score,
            floor = self.config.min_relevance_floor,
            "Local retrieval"
        );

        match best_score {
            None => Ok(RouteDecision::web_search(
                miss.query_embedding,
                format!("Cache miss ({}); no local documents", miss.reason),
            )),
            Some(score) if score < self.config.min_relevance_floor => {
                Ok(RouteDecision::web_search(
                    miss.query_embedding,
                    format!(
                        "Cache miss ({}); best document score {:.4} below floor {:.2}",
                        miss.reason, score, self.config.min_relevance_floor
                    ),
                ))
            }
            Some(score) => {
                let reason = format!(
                    "Cache miss ({}); {} local documents, best score {:.4}",
                    miss.reason,
                    documents.len(),
                    score
                );
                Ok(RouteDecision::vector_retrieve(
                    documents,
                    miss.query_embedding,
                    reason,
                ))
            }
        }
    }

    /// Route `query`, produce the answer and cache it on success
    pub async fn answer(&self, query: &str) -> Result<RoutedAnswer, DomainError> {
        let decision = self.route(query).await?;

        let (context, web_results) = match decision.strategy() {
            RouteStrategy::CacheHit => {
                let answer = decision
                    .matched_entry()
                    .map(|entry| entry.response().to_string())
                    .ok_or_else(|| DomainError::internal("Cache hit without a matched entry"))?;

                return Ok(RoutedAnswer {
                    decision,
                    answer,
                    web_results: None,
                    cached: false,
                });
            }
            RouteStrategy::VectorRetrieve => {
                (AnswerContext::from_documents(decision.documents().to_vec()), None)
            }
            RouteStrategy::WebSearch => {
                let snippets = self.web_searcher.search(query).await?;
                let formatted = format_results(query, &snippets);

                let context = if snippets.is_empty() {
                    AnswerContext::default()
                } else {
                    AnswerContext::from_web_results(formatted.clone())
                };
                (context, Some(formatted))
            }
        };

        if context.is_empty() {
            warn!(strategy = %decision.strategy(), "No context for query, answer not cached");
            return Ok(RoutedAnswer {
                decision,
                answer: NO_CONTEXT_ANSWER.to_string(),
                web_results,
                cached: false,
            });
        }

        let answer = self.generator.generate(&context, query).await?;

        let embedding = match decision.query_embedding() {
            Some(embedding) => embedding.to_vec(),
            None => self.cache.embed_query(query).await?,
        };
        self.cache.store_embedded(query, embedding, &answer).await?;

        Ok(RoutedAnswer {
            decision,
            answer,
            web_results,
            cached: true,
        })
    }
}
