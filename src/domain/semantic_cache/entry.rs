//! Cache entry entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Canonical form of a query used for hashing and embedding
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Deterministic key for a query: hex SHA-256 of its normalized text
pub fn query_hash(query: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(normalize_query(query).as_bytes());
    hex::encode(hasher.finalize())
}

/// A stored answer to a previously seen query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    query_hash: String,
    query: String,
    #[serde(skip_serializing)]
    #[serde(default)]
    query_embedding: Vec<f32>,
    response: String,
    /// Most recent write, insert or refresh
    timestamp: DateTime<Utc>,
    /// When the response was generated; hits leave it unchanged
    captured_at: DateTime<Utc>,
    hit_count: u32,
}

impl CacheEntry {
    /// New entry for a first answer, with `hit_count = 1`
    pub fn new(
        query: impl Into<String>,
        query_embedding: Vec<f32>,
        response: impl Into<String>,
    ) -> Self {
        let query = query.into();
        let now = Utc::now();
        Self {
            query_hash: query_hash(&query),
            query,
            query_embedding,
            response: response.into(),
            timestamp: now,
            captured_at: now,
            hit_count: 1,
        }
    }

    /// Rebuild an entry loaded from a store
    pub fn from_parts(
        query_hash: impl Into<String>,
        query: impl Into<String>,
        query_embedding: Vec<f32>,
        response: impl Into<String>,
        timestamp: DateTime<Utc>,
        captured_at: DateTime<Utc>,
        hit_count: u32,
    ) -> Self {
        Self {
            query_hash: query_hash.into(),
            query: query.into(),
            query_embedding,
            response: response.into(),
            timestamp,
            captured_at,
            hit_count: hit_count.max(1),
        }
    }

    /// Backdate both the last write and the capture time
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self.captured_at = timestamp;
        self
    }

    pub fn query_hash(&self) -> &str {
        &self.query_hash
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn query_embedding(&self) -> &[f32] {
        &self.query_embedding
    }

    pub fn response(&self) -> &str {
        &self.response
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    pub fn hit_count(&self) -> u32 {
        self.hit_count
    }

    /// Time since the response was captured
    pub fn age(&self, now: DateTime<Utc>) -> chrono::Duration {
        now - self.captured_at
    }

    /// Count one reuse and move the timestamp forward; `captured_at` stays
    pub fn record_hit(&mut self, now: DateTime<Utc>) {
        self.hit_count = self.hit_count.saturating_add(1);
        self.timestamp = now;
    }

    /// Overwrite with a re-stored answer for the same hash.
    ///
    /// The hit count is carried over so it never decreases.
    pub fn overwrite_with(&mut self, newer: CacheEntry) {
        self.query = newer.query;
        self.query_embedding = newer.query_embedding;
        self.response = newer.response;
        self.timestamp = newer.timestamp;
        self.captured_at = newer.captured_at;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_hash_normalizes() {
        assert_eq!(
            query_hash("  What is Apple's revenue? "),
            query_hash("what is apple's revenue?")
        );
        assert_ne!(query_hash("apple revenue"), query_hash("apple revenues"));
        assert_eq!(query_hash("x").len(), 64);
    }

    #[test]
    fn test_new_entry() {
        let entry = CacheEntry::new("Apple revenue", vec![0.1, 0.2], "$383B");

        assert_eq!(entry.query_hash(), query_hash("apple revenue"));
        assert_eq!(entry.query(), "Apple revenue");
        assert_eq!(entry.response(), "$383B");
        assert_eq!(entry.hit_count(), 1);
        assert_eq!(entry.query_embedding(), &[0.1, 0.2]);
    }

    #[test]
    fn test_record_hit() {
        let mut entry = CacheEntry::new("q", vec![], "r");
        let later = entry.timestamp() + chrono::Duration::seconds(30);

        entry.record_hit(later);
        entry.record_hit(later);

        assert_eq!(entry.hit_count(), 3);
        assert_eq!(entry.timestamp(), later);
        assert!(entry.captured_at() < later);
    }

    #[test]
    fn test_age_ignores_hits() {
        let now = Utc::now();
        let mut entry =
            CacheEntry::new("latest apple news", vec![], "r").with_timestamp(now - chrono::Duration::hours(30));

        entry.record_hit(now - chrono::Duration::hours(1));

        assert_eq!(entry.age(now), chrono::Duration::hours(30));
    }

    #[test]
    fn test_overwrite_keeps_hit_count() {
        let mut entry = CacheEntry::new("q", vec![1.0], "old");
        entry.record_hit(Utc::now());

        entry.overwrite_with(CacheEntry::new("Q", vec![2.0], "new"));

        assert_eq!(entry.response(), "new");
        assert_eq!(entry.query(), "Q");
        assert_eq!(entry.hit_count(), 2);
    }

    #[test]
    fn test_from_parts_floors_hit_count() {
        let now = Utc::now();
        let entry = CacheEntry::from_parts("h", "q", vec![], "r", now, now, 0);

        assert_eq!(entry.hit_count(), 1);
    }

    #[test]
    fn test_age() {
        let now = Utc::now();
        let entry = CacheEntry::new("q", vec![], "r").with_timestamp(now - chrono::Duration::hours(2));

        assert_eq!(entry.age(now), chrono::Duration::hours(2));
    }
}
