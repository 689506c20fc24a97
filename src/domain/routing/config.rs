//! Router configuration

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Configuration for query routing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Best document score below which local retrieval is not trusted (0.0 - 1.0)
    #[serde(default = "default_min_relevance_floor")]
    pub min_relevance_floor: f32,

    /// Years at or after this are treated as recent. Defaults to last year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recency_boundary_year: Option<i32>,

    /// Number of documents retrieved per query
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Set when the document store is known to be current, so recent
    /// queries may still be answered locally
    #[serde(default)]
    pub documents_cover_present: bool,
}

fn default_min_relevance_floor() -> f32 {
    0.7
}

fn default_top_k() -> usize {
    5
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            min_relevance_floor: default_min_relevance_floor(),
            recency_boundary_year: None,
            top_k: default_top_k(),
            documents_cover_present: false,
        }
    }
}

impl RouterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_relevance_floor(mut self, floor: f32) -> Self {
        self.min_relevance_floor = floor;
        self
    }

    pub fn with_recency_boundary_year(mut self, year: i32) -> Self {
        self.recency_boundary_year = Some(year);
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_documents_cover_present(mut self, covered: bool) -> Self {
        self.documents_cover_present = covered;
        self
    }

    /// Configured boundary, or the previous calendar year (UTC)
    pub fn boundary_year(&self) -> i32 {
        self.recency_boundary_year
            .unwrap_or_else(|| Utc::now().year() - 1)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if !(0.0..=1.0).contains(&self.min_relevance_floor) {
            return Err(DomainError::configuration(format!(
                "router.min_relevance_floor must be in [0, 1], got {}",
                self.min_relevance_floor
            )));
        }

        if self.top_k == 0 {
            return Err(DomainError::configuration("router.top_k must be at least 1"));
        }

        Ok(())
    }
}
