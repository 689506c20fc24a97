//! pgvector-backed semantic cache store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgRow};
use sqlx::Row;

use crate::domain::semantic_cache::{CacheEntry, CacheMatch, CacheStats, SemanticCacheStore};
use crate::domain::DomainError;
use crate::infrastructure::storage::{parse_pgvector, to_pgvector, validate_table_name};

const ENTRY_COLUMNS: &str =
    r#"query_hash, query, query_embedding::text AS query_embedding, response, "timestamp", captured_at, hit_count"#;

/// Semantic cache entries in a PostgreSQL table with a `vector` column.
///
/// Similarity is `1 - (query_embedding <=> query)`, the cosine distance
/// operator. Hit counts are incremented in SQL so concurrent hits never
/// lose updates.
#[derive(Debug, Clone)]
pub struct PgvectorSemanticCacheStore {
    pool: PgPool,
    table: String,
}

impl PgvectorSemanticCacheStore {
    pub fn new(pool: PgPool, table: impl Into<String>) -> Result<Self, DomainError> {
        let table = table.into();
        validate_table_name(&table)?;
        Ok(Self { pool, table })
    }

    fn row_to_entry(row: &PgRow) -> Result<CacheEntry, DomainError> {
        let embedding: String = row.get("query_embedding");
        let timestamp: DateTime<Utc> = row.get("timestamp");
        let captured_at: DateTime<Utc> = row.get("captured_at");
        let hit_count: i32 = row.get("hit_count");

        Ok(CacheEntry::from_parts(
            row.get::<String, _>("query_hash"),
            row.get::<String, _>("query"),
            parse_pgvector(&embedding)?,
            row.get::<String, _>("response"),
            timestamp,
            captured_at,
            u32::try_from(hit_count).unwrap_or(1),
        ))
    }

    fn query_error(action: &str, e: sqlx::Error) -> DomainError {
        tracing::error!(error = %e, action, "Semantic cache query failed");
        DomainError::store(format!("Failed to {}: {}", action, e))
    }
}

#[async_trait]
impl SemanticCacheStore for PgvectorSemanticCacheStore {
    async fn upsert_cache(&self, entry: CacheEntry) -> Result<(), DomainError> {
        let query = format!(
            r#"
            INSERT INTO {} (query_hash, query, query_embedding, response, "timestamp", captured_at, hit_count)
            VALUES ($1, $2, $3::vector, $4, $5, $6, 1)
            ON CONFLICT (query_hash) DO UPDATE SET
                query = EXCLUDED.query,
                query_embedding = EXCLUDED.query_embedding,
                response = EXCLUDED.response,
                "timestamp" = EXCLUDED."timestamp",
                captured_at = EXCLUDED.captured_at
            "#,
            self.table
        );

        sqlx::query(&query)
            .bind(entry.query_hash())
            .bind(entry.query())
            .bind(to_pgvector(entry.query_embedding()))
            .bind(entry.response())
            .bind(entry.timestamp())
            .bind(entry.captured_at())
            .execute(&self.pool)
            .await
            .map_err(|e| Self::query_error("store cache entry", e))?;

        Ok(())
    }

    async fn best_match_cache(
        &self,
        embedding: &[f32],
        threshold: f32,
    ) -> Result<Option<CacheMatch>, DomainError> {
        let query = format!(
            r#"
            SELECT {columns},
                   (1 - (query_embedding <=> $1::vector))::REAL AS similarity
            FROM {table}
            WHERE 1 - (query_embedding <=> $1::vector) >= $2
            ORDER BY query_embedding <=> $1::vector
            LIMIT 1
            "#,
            columns = ENTRY_COLUMNS,
            table = self.table
        );

        let row = sqlx::query(&query)
            .bind(to_pgvector(embedding))
            .bind(f64::from(threshold))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Self::query_error("search cache", e))?;

        row.map(|row| {
            let similarity: f32 = row.get("similarity");
            Ok(CacheMatch::new(Self::row_to_entry(&row)?, similarity))
        })
        .transpose()
    }

    async fn record_hit(&self, query_hash: &str) -> Result<Option<CacheEntry>, DomainError> {
        let query = format!(
            r#"
            UPDATE {}
            SET hit_count = hit_count + 1, "timestamp" = NOW()
            WHERE query_hash = $1
            RETURNING {}
            "#,
            self.table, ENTRY_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(query_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Self::query_error("record cache hit", e))?;

        row.as_ref().map(Self::row_to_entry).transpose()
    }

    async fn delete_cache(
        &self,
        query_hash: &str,
        captured_at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let query = format!(
            "DELETE FROM {} WHERE query_hash = $1 AND captured_at = $2",
            self.table
        );

        let result = sqlx::query(&query)
            .bind(query_hash)
            .bind(captured_at)
            .execute(&self.pool)
            .await
            .map_err(|e| Self::query_error("delete cache entry", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn truncate_cache(&self) -> Result<(), DomainError> {
        let query = format!("TRUNCATE TABLE {}", self.table);

        sqlx::query(&query)
            .execute(&self.pool)
            .await
            .map_err(|e| Self::query_error("clear cache", e))?;

        Ok(())
    }

    async fn cache_stats(&self) -> Result<CacheStats, DomainError> {
        let query = format!(
            r#"
            SELECT COUNT(*)::BIGINT AS total_entries,
                   COALESCE(SUM(hit_count), 0)::BIGINT AS total_hits
            FROM {}
            "#,
            self.table
        );

        let row = sqlx::query(&query)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| Self::query_error("read cache stats", e))?;

        let total_entries: i64 = row.get("total_entries");
        let total_hits: i64 = row.get("total_hits");

        Ok(CacheStats {
            total_entries: total_entries.max(0) as u64,
            total_hits: total_hits.max(0) as u64,
        })
    }
}
