//! Document entity

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

/// Metadata keys that name a document, in priority order
const TITLE_KEYS: &[&str] = &["title", "company"];

/// Stable id for uploaded content: `doc_` plus the first 10 hex chars of its
/// SHA-256, so re-uploading the same text updates the same document.
pub fn document_id_for(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let digest = hex::encode(hasher.finalize());
    format!("doc_{}", &digest[..10])
}

/// A retrievable document with its embedding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
    #[serde(skip_serializing, default)]
    pub embedding: Vec<f32>,
    pub created_at: DateTime<Utc>,
}

impl Document {
    pub fn new(id: impl Into<String>, content: impl Into<String>, embedding: Vec<f32>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            metadata: HashMap::new(),
            embedding,
            created_at: Utc::now(),
        }
    }

    /// Add one metadata entry
    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    pub fn with_all_metadata(mut self, metadata: HashMap<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Display name from metadata, falling back to "Unknown"
    pub fn title(&self) -> &str {
        TITLE_KEYS
            .iter()
            .find_map(|key| self.metadata.get(*key).and_then(Value::as_str))
            .unwrap_or("Unknown")
    }

    /// Content truncated to at most `max_chars` characters
    pub fn preview(&self, max_chars: usize) -> String {
        match self.content.char_indices().nth(max_chars) {
            Some((idx, _)) => format!("{}...", &self.content[..idx]),
            None => self.content.clone(),
        }
    }
}

/// A document returned by a nearest-neighbour query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredDocument {
    pub document: Document,
    /// Similarity to the query, higher is more relevant
    pub score: f32,
}

impl ScoredDocument {
    pub fn new(document: Document, score: f32) -> Self {
        Self { document, score }
    }
}
