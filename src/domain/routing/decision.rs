//! Routing decision types

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::document::ScoredDocument;
use crate::domain::semantic_cache::{CacheEntry, CacheHit};

/// Where a query's answer comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RouteStrategy {
    CacheHit,
    VectorRetrieve,
    WebSearch,
}

impl RouteStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CacheHit => "CACHE_HIT",
            Self::VectorRetrieve => "VECTOR_RETRIEVE",
            Self::WebSearch => "WEB_SEARCH",
        }
    }
}

impl fmt::Display for RouteStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-query routing decision.
///
/// `matched_entry` is present exactly when the strategy is `CacheHit`; the
/// constructors are the only way to build one.
#[derive(Debug, Clone)]
pub struct RouteDecision {
    strategy: RouteStrategy,
    matched_entry: Option<CacheEntry>,
    similarity: Option<f32>,
    documents: Vec<ScoredDocument>,
    query_embedding: Option<Vec<f32>>,
    reason: String,
}

impl RouteDecision {
    pub fn cache_hit(hit: CacheHit, reason: impl Into<String>) -> Self {
        Self {
            strategy: RouteStrategy::CacheHit,
            matched_entry: Some(hit.entry),
            similarity: Some(hit.similarity),
            documents: Vec::new(),
            query_embedding: None,
            reason: reason.into(),
        }
    }

    /// Local retrieval, carrying the documents already fetched
    pub fn vector_retrieve(
        documents: Vec<ScoredDocument>,
        query_embedding: Vec<f32>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            strategy: RouteStrategy::VectorRetrieve,
            matched_entry: None,
            similarity: None,
            documents,
            query_embedding: Some(query_embedding),
            reason: reason.into(),
        }
    }

    pub fn web_search(query_embedding: Vec<f32>, reason: impl Into<String>) -> Self {
        Self {
            strategy: RouteStrategy::WebSearch,
            matched_entry: None,
            similarity: None,
            documents: Vec::new(),
            query_embedding: Some(query_embedding),
            reason: reason.into(),
        }
    }

    pub fn strategy(&self) -> RouteStrategy {
        self.strategy
    }

    pub fn matched_entry(&self) -> Option<&CacheEntry> {
        self.matched_entry.as_ref()
    }

    /// Similarity of the cache match, for cache hits
    pub fn similarity(&self) -> Option<f32> {
        self.similarity
    }

    pub fn documents(&self) -> &[ScoredDocument] {
        &self.documents
    }

    /// Embedding computed during the cache lookup, reused for write-back
    pub fn query_embedding(&self) -> Option<&[f32]> {
        self.query_embedding.as_deref()
    }

    /// Human-readable explanation, for logs and callers
    pub fn reason(&self) -> &str {
        &self.reason
    }
}
