//! pgvector-backed document store

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgRow};
use sqlx::Row;

use crate::domain::{Document, DocumentStore, DomainError, ScoredDocument};
use crate::infrastructure::storage::{parse_pgvector, to_pgvector, validate_table_name};

/// Documents in a PostgreSQL table searched with cosine distance
#[derive(Debug, Clone)]
pub struct PgvectorDocumentStore {
    pool: PgPool,
    table: String,
}

impl PgvectorDocumentStore {
    pub fn new(pool: PgPool, table: impl Into<String>) -> Result<Self, DomainError> {
        let table = table.into();
        validate_table_name(&table)?;
        Ok(Self { pool, table })
    }

    fn row_to_document(row: &PgRow) -> Result<Document, DomainError> {
        let metadata: serde_json::Value = row.get("metadata");
        let embedding: String = row.get("embedding");
        let created_at: DateTime<Utc> = row.get("created_at");

        let metadata: HashMap<String, serde_json::Value> =
            serde_json::from_value(metadata).unwrap_or_default();

        Ok(Document::new(
            row.get::<String, _>("id"),
            row.get::<String, _>("content"),
            parse_pgvector(&embedding)?,
        )
        .with_all_metadata(metadata)
        .with_created_at(created_at))
    }

    fn query_error(action: &str, e: sqlx::Error) -> DomainError {
        tracing::error!(error = %e, action, "Document query failed");
        DomainError::store(format!("Failed to {}: {}", action, e))
    }
}

#[async_trait]
impl DocumentStore for PgvectorDocumentStore {
    async fn upsert_document(&self, document: Document) -> Result<(), DomainError> {
        let metadata = serde_json::to_value(&document.metadata)
            .map_err(|e| DomainError::validation(format!("Invalid metadata: {}", e)))?;

        let query = format!(
            r#"
            INSERT INTO {} (id, content, metadata, embedding, created_at)
            VALUES ($1, $2, $3, $4::vector, $5)
            ON CONFLICT (id) DO UPDATE SET
                content = EXCLUDED.content,
                metadata = EXCLUDED.metadata,
                embedding = EXCLUDED.embedding,
                updated_at = NOW()
            "#,
            self.table
        );

        sqlx::query(&query)
            .bind(&document.id)
            .bind(&document.content)
            .bind(&metadata)
            .bind(to_pgvector(&document.embedding))
            .bind(document.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| Self::query_error("store document", e))?;

        Ok(())
    }

    async fn nearest_documents(
        &self,
        embedding: &[f32],
        k: usize,
    ) -> Result<Vec<ScoredDocument>, DomainError> {
        let query = format!(
            r#"
            SELECT id, content, metadata, embedding::text AS embedding, created_at,
                   (embedding <=> $1::vector)::FLOAT8 AS distance
            FROM {}
            ORDER BY distance
            LIMIT $2
            "#,
            self.table
        );

        let rows = sqlx::query(&query)
            .bind(to_pgvector(embedding))
            .bind(k as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| Self::query_error("search documents", e))?;

        tracing::debug!(rows = rows.len(), k, "Retrieved nearest documents");

        rows.iter()
            .map(|row| {
                let distance: f64 = row.get("distance");
                Ok(ScoredDocument::new(
                    Self::row_to_document(row)?,
                    (1.0 - distance) as f32,
                ))
            })
            .collect()
    }

    async fn list_documents(&self, limit: usize) -> Result<Vec<Document>, DomainError> {
        let query = format!(
            r#"
            SELECT id, content, metadata, embedding::text AS embedding, created_at
            FROM {}
            ORDER BY created_at DESC
            LIMIT $1
            "#,
            self.table
        );

        let rows = sqlx::query(&query)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| Self::query_error("list documents", e))?;

        rows.iter().map(Self::row_to_document).collect()
    }

    async fn document_count(&self) -> Result<u64, DomainError> {
        let query = format!("SELECT COUNT(*)::BIGINT AS count FROM {}", self.table);

        let row = sqlx::query(&query)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| Self::query_error("count documents", e))?;

        let count: i64 = row.get("count");
        Ok(count.max(0) as u64)
    }
}
