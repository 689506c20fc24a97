//! Document store trait

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use super::{Document, ScoredDocument};
use crate::domain::DomainError;

/// Storage and nearest-neighbour retrieval for documents
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert or replace the document with the same id
    async fn upsert_document(&self, document: Document) -> Result<(), DomainError>;

    /// Up to `k` documents ordered by decreasing relevance. Empty is valid.
    async fn nearest_documents(
        &self,
        embedding: &[f32],
        k: usize,
    ) -> Result<Vec<ScoredDocument>, DomainError>;

    /// Most recently created documents first
    async fn list_documents(&self, limit: usize) -> Result<Vec<Document>, DomainError>;

    async fn document_count(&self) -> Result<u64, DomainError>;
}
