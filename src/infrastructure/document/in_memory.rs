//! In-memory document store for development and testing

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::embedding::cosine_similarity;
use crate::domain::{Document, DocumentStore, DomainError, ScoredDocument};

/// Document store with exact cosine search over every document
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    documents: Arc<RwLock<HashMap<String, Document>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn upsert_document(&self, mut document: Document) -> Result<(), DomainError> {
        let mut documents = self.documents.write().await;

        if let Some(existing) = documents.get(&document.id) {
            document.created_at = existing.created_at;
        }
        documents.insert(document.id.clone(), document);

        Ok(())
    }

    async fn nearest_documents(
        &self,
        embedding: &[f32],
        k: usize,
    ) -> Result<Vec<ScoredDocument>, DomainError> {
        let documents = self.documents.read().await;

        let mut scored: Vec<ScoredDocument> = documents
            .values()
            .map(|doc| ScoredDocument::new(doc.clone(), cosine_similarity(embedding, &doc.embedding)))
            .collect();

        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(k);

        Ok(scored)
    }

    async fn list_documents(&self, limit: usize) -> Result<Vec<Document>, DomainError> {
        let documents = self.documents.read().await;

        let mut listed: Vec<Document> = documents.values().cloned().collect();
        listed.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        listed.truncate(limit);

        Ok(listed)
    }

    async fn document_count(&self) -> Result<u64, DomainError> {
        Ok(self.documents.read().await.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use serde_json::json;

    #[tokio::test]
    async fn test_nearest_orders_by_score() {
        let store = InMemoryDocumentStore::new();
        store
            .upsert_document(Document::new("a", "apple", vec![1.0, 0.0]))
            .await
            .unwrap();
        store
            .upsert_document(Document::new("b", "banana", vec![0.0, 1.0]))
            .await
            .unwrap();
        store
            .upsert_document(Document::new("c", "apricot", vec![0.8, 0.2]))
            .await
            .unwrap();

        let results = store.nearest_documents(&[1.0, 0.0], 2).await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].document.id, "a");
        assert_eq!(results[1].document.id, "c");
        assert!(results[0].score >= results[1].score);
    }

    #[tokio::test]
    async fn test_nearest_on_empty_store() {
        let store = InMemoryDocumentStore::new();

        assert!(store.nearest_documents(&[1.0], 5).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upsert_replaces_and_keeps_created_at() {
        let store = InMemoryDocumentStore::new();
        let created = Utc::now() - Duration::days(1);
        store
            .upsert_document(Document::new("a", "v1", vec![1.0]).with_created_at(created))
            .await
            .unwrap();
        store
            .upsert_document(
                Document::new("a", "v2", vec![1.0]).with_metadata("company", json!("Apple")),
            )
            .await
            .unwrap();

        let listed = store.list_documents(10).await.unwrap();

        assert_eq!(store.document_count().await.unwrap(), 1);
        assert_eq!(listed[0].content, "v2");
        assert_eq!(listed[0].title(), "Apple");
        assert_eq!(listed[0].created_at, created);
    }

    #[tokio::test]
    async fn test_list_newest_first_with_limit() {
        let store = InMemoryDocumentStore::new();
        let now = Utc::now();
        for (i, id) in ["old", "mid", "new"].iter().enumerate() {
            store
                .upsert_document(
                    Document::new(*id, *id, vec![1.0])
                        .with_created_at(now + Duration::seconds(i as i64)),
                )
                .await
                .unwrap();
        }

        let listed = store.list_documents(2).await.unwrap();

        let ids: Vec<&str> = listed.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "mid"]);
    }
}
