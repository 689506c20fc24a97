//! Document upload and listing

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use crate::domain::{document_id_for, Document, DocumentStore, DomainError, TextEmbedder};

/// Listing size when the caller does not ask for one
pub const DEFAULT_LIST_LIMIT: usize = 100;

/// Embeds and stores documents for local retrieval
#[derive(Clone)]
pub struct DocumentService {
    store: Arc<dyn DocumentStore>,
    embedder: TextEmbedder,
}

impl std::fmt::Debug for DocumentService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentService")
            .field("embedder", &self.embedder)
            .finish_non_exhaustive()
    }
}

impl DocumentService {
    pub fn new(store: Arc<dyn DocumentStore>, embedder: TextEmbedder) -> Self {
        Self { store, embedder }
    }

    /// Embed `content` and upsert it under its content-derived id
    pub async fn upload_text(
        &self,
        content: &str,
        metadata: HashMap<String, Value>,
    ) -> Result<Document, DomainError> {
        if content.trim().is_empty() {
            return Err(DomainError::validation("Document content must not be empty"));
        }

        let id = document_id_for(content);
        let embedding = self.embedder.embed(content).await?;

        let document = Document::new(&id, content, embedding).with_all_metadata(metadata);
        self.store.upsert_document(document.clone()).await?;

        info!(document_id = %id, chars = content.chars().count(), "Document stored");
        Ok(document)
    }

    pub async fn list(&self, limit: Option<usize>) -> Result<Vec<Document>, DomainError> {
        self.store
            .list_documents(limit.unwrap_or(DEFAULT_LIST_LIMIT))
            .await
    }

    pub async fn count(&self) -> Result<u64, DomainError> {
        self.store.document_count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::document::MockDocumentStore;
    use crate::domain::embedding::MockEmbeddingProvider;
    use crate::infrastructure::document::InMemoryDocumentStore;
    use serde_json::json;

    const DIMS: usize = 16;

    fn embedder() -> TextEmbedder {
        TextEmbedder::new(
            Arc::new(MockEmbeddingProvider::new("mock", DIMS)),
            "mock-embedding",
            DIMS,
        )
    }

    #[tokio::test]
    async fn test_upload_is_idempotent_per_content() {
        let service = DocumentService::new(Arc::new(InMemoryDocumentStore::new()), embedder());
        let metadata = HashMap::from([("company".to_string(), json!("Apple Inc."))]);

        let first = service
            .upload_text("Apple revenue was $383B", metadata.clone())
            .await
            .unwrap();
        let second = service
            .upload_text("Apple revenue was $383B", metadata)
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(first.embedding.len(), DIMS);
        assert_eq!(service.count().await.unwrap(), 1);
        assert_eq!(service.list(None).await.unwrap()[0].title(), "Apple Inc.");
    }

    #[tokio::test]
    async fn test_empty_content_rejected() {
        let mut store = MockDocumentStore::new();
        store.expect_upsert_document().never();
        let service = DocumentService::new(Arc::new(store), embedder());

        let result = service.upload_text("  \n", HashMap::new()).await;

        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_list_uses_default_limit() {
        let mut store = MockDocumentStore::new();
        store
            .expect_list_documents()
            .withf(|limit| *limit == DEFAULT_LIST_LIMIT)
            .times(1)
            .returning(|_| Ok(Vec::new()));
        let service = DocumentService::new(Arc::new(store), embedder());

        assert!(service.list(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_embedding_failure_stores_nothing() {
        let store = Arc::new(InMemoryDocumentStore::new());
        let service = DocumentService::new(
            store.clone(),
            TextEmbedder::new(
                Arc::new(MockEmbeddingProvider::new("nomic", DIMS).with_error("401")),
                "mock-embedding",
                DIMS,
            ),
        );

        let result = service.upload_text("content", HashMap::new()).await;

        assert!(matches!(result, Err(DomainError::Embedding { .. })));
        assert_eq!(store.document_count().await.unwrap(), 0);
    }
}
