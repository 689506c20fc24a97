//! Semantic cache configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Configuration for the semantic response cache
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemanticCacheConfig {
    /// Minimum cosine similarity for a cache hit, in (0.0, 1.0]
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f32,

    /// Maximum age of an entry whose query uses relative temporal terms
    #[serde(default = "default_relative_term_max_age_secs")]
    pub relative_term_max_age_secs: u64,
}

fn default_similarity_threshold() -> f32 {
    0.98
}

fn default_relative_term_max_age_secs() -> u64 {
    86_400
}

impl Default for SemanticCacheConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: default_similarity_threshold(),
            relative_term_max_age_secs: default_relative_term_max_age_secs(),
        }
    }
}

impl SemanticCacheConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the similarity threshold
    pub fn with_similarity_threshold(mut self, threshold: f32) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    pub fn with_relative_term_max_age(mut self, max_age: Duration) -> Self {
        self.relative_term_max_age_secs = max_age.as_secs();
        self
    }

    pub fn relative_term_max_age(&self) -> Duration {
        Duration::from_secs(self.relative_term_max_age_secs)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if !(self.similarity_threshold > 0.0 && self.similarity_threshold <= 1.0) {
            return Err(DomainError::configuration(format!(
                "cache.similarity_threshold must be in (0, 1], got {}",
                self.similarity_threshold
            )));
        }

        Ok(())
    }
}
