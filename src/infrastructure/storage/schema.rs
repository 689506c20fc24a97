//! Idempotent creation of the pgvector schema

use sqlx::postgres::PgPool;
use tracing::{info, warn};

use super::pgvector::validate_table_name;
use crate::domain::DomainError;

/// Tables and vector size the stores expect
#[derive(Debug, Clone)]
pub struct PgvectorSchema {
    pub documents_table: String,
    pub cache_table: String,
    pub dimensions: usize,
}

impl PgvectorSchema {
    pub fn new(
        documents_table: impl Into<String>,
        cache_table: impl Into<String>,
        dimensions: usize,
    ) -> Result<Self, DomainError> {
        let schema = Self {
            documents_table: documents_table.into(),
            cache_table: cache_table.into(),
            dimensions,
        };

        validate_table_name(&schema.documents_table)?;
        validate_table_name(&schema.cache_table)?;
        if dimensions == 0 {
            return Err(DomainError::configuration("Vector dimensions must be at least 1"));
        }

        Ok(schema)
    }

    /// Statements run inside one transaction
    pub fn statements(&self) -> Vec<String> {
        vec![
            "CREATE EXTENSION IF NOT EXISTS vector".to_string(),
            format!(
                r#"
                CREATE TABLE IF NOT EXISTS {table} (
                    id TEXT PRIMARY KEY,
                    content TEXT NOT NULL,
                    metadata JSONB NOT NULL DEFAULT '{{}}',
                    embedding vector({dims}) NOT NULL,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                )
                "#,
                table = self.documents_table,
                dims = self.dimensions
            ),
            format!(
                r#"
                CREATE TABLE IF NOT EXISTS {table} (
                    query_hash TEXT PRIMARY KEY,
                    query TEXT NOT NULL,
                    query_embedding vector({dims}) NOT NULL,
                    response TEXT NOT NULL,
                    "timestamp" TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    captured_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    hit_count INTEGER NOT NULL DEFAULT 1 CHECK (hit_count >= 1)
                )
                "#,
                table = self.cache_table,
                dims = self.dimensions
            ),
            // Tables created before capture times were tracked
            format!(
                r#"ALTER TABLE {table} ADD COLUMN IF NOT EXISTS captured_at TIMESTAMPTZ NOT NULL DEFAULT NOW()"#,
                table = self.cache_table
            ),
            format!(
                "CREATE INDEX IF NOT EXISTS idx_{table}_created_at ON {table} (created_at DESC)",
                table = self.documents_table
            ),
        ]
    }

    /// HNSW indexes. Unlike ivfflat they need no training rows, so building
    /// them on empty tables at startup does not cost recall later.
    pub fn vector_indexes(&self) -> Vec<String> {
        vec![
            format!(
                "CREATE INDEX IF NOT EXISTS idx_{table}_embedding ON {table} USING hnsw (embedding vector_cosine_ops)",
                table = self.documents_table
            ),
            format!(
                "CREATE INDEX IF NOT EXISTS idx_{table}_query_embedding ON {table} USING hnsw (query_embedding vector_cosine_ops)",
                table = self.cache_table
            ),
        ]
    }

    pub async fn ensure(&self, pool: &PgPool) -> Result<(), DomainError> {
        let mut tx = pool
            .begin()
            .await
            .map_err(|e| DomainError::store(format!("Failed to begin transaction: {}", e)))?;

        for statement in self.statements() {
            sqlx::query(&statement)
                .execute(&mut *tx)
                .await
                .map_err(|e| DomainError::store(format!("Failed to apply schema: {}", e)))?;
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::store(format!("Failed to commit schema: {}", e)))?;

        for statement in self.vector_indexes() {
            // hnsw requires pgvector 0.5+; older servers fall back to exact scans
            if let Err(e) = sqlx::query(&statement).execute(pool).await {
                warn!(error = %e, "Skipping vector index, queries will use sequential scans");
            }
        }

        info!(
            documents_table = %self.documents_table,
            cache_table = %self.cache_table,
            dimensions = self.dimensions,
            "pgvector schema ready"
        );

        Ok(())
    }
}
