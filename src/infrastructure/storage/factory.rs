//! Store selection at startup

use std::sync::Arc;

use sqlx::postgres::PgPool;
use tracing::info;

use super::postgres::PostgresConfig;
use super::schema::PgvectorSchema;
use crate::config::{Secrets, StorageBackend, StorageConfig};
use crate::domain::{DocumentStore, DomainError, SemanticCacheStore};
use crate::infrastructure::document::{InMemoryDocumentStore, PgvectorDocumentStore};
use crate::infrastructure::semantic_cache::{
    InMemorySemanticCacheStore, PgvectorSemanticCacheStore,
};

/// The cache and document stores, plus the pool backing them if any
#[derive(Clone)]
pub struct Stores {
    pub cache: Arc<dyn SemanticCacheStore>,
    pub documents: Arc<dyn DocumentStore>,
    pub pool: Option<PgPool>,
}

impl std::fmt::Debug for Stores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stores")
            .field("postgres", &self.pool.is_some())
            .finish_non_exhaustive()
    }
}

/// Factory for the configured storage backend
#[derive(Debug)]
pub struct StoreFactory;

impl StoreFactory {
    pub fn in_memory() -> Stores {
        Stores {
            cache: Arc::new(InMemorySemanticCacheStore::new()),
            documents: Arc::new(InMemoryDocumentStore::new()),
            pool: None,
        }
    }

    /// Stores over an existing pool
    pub fn postgres_with_pool(pool: PgPool, config: &StorageConfig) -> Result<Stores, DomainError> {
        Ok(Stores {
            cache: Arc::new(PgvectorSemanticCacheStore::new(
                pool.clone(),
                &config.cache_table,
            )?),
            documents: Arc::new(PgvectorDocumentStore::new(
                pool.clone(),
                &config.documents_table,
            )?),
            pool: Some(pool),
        })
    }

    /// Schema matching the configured tables and vector size
    pub fn schema(config: &StorageConfig, dimensions: usize) -> Result<PgvectorSchema, DomainError> {
        PgvectorSchema::new(&config.documents_table, &config.cache_table, dimensions)
    }

    pub async fn connect(config: &StorageConfig, secrets: &Secrets) -> Result<PgPool, DomainError> {
        let url = secrets.database_url.as_deref().ok_or_else(|| {
            DomainError::configuration("DATABASE_URL is required for the postgres backend")
        })?;

        PostgresConfig::from_storage_config(url, config).connect().await
    }

    /// Build the stores for `config`, migrating first when enabled
    pub async fn create(
        config: &StorageConfig,
        secrets: &Secrets,
        dimensions: usize,
    ) -> Result<Stores, DomainError> {
        match config.backend {
            StorageBackend::InMemory => {
                info!("Using in-memory document and cache stores");
                Ok(Self::in_memory())
            }
            StorageBackend::Postgres => {
                let pool = Self::connect(config, secrets).await?;

                if config.auto_migrate {
                    Self::schema(config, dimensions)?.ensure(&pool).await?;
                }

                info!(
                    documents_table = %config.documents_table,
                    cache_table = %config.cache_table,
                    "Using pgvector document and cache stores"
                );
                Self::postgres_with_pool(pool, config)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_backend() {
        let stores = StoreFactory::create(&StorageConfig::default(), &Secrets::default(), 8)
            .await
            .unwrap();

        assert!(stores.pool.is_none());
        assert_eq!(stores.documents.document_count().await.unwrap(), 0);
        assert_eq!(stores.cache.cache_stats().await.unwrap().total_entries, 0);
    }

    #[tokio::test]
    async fn test_postgres_requires_database_url() {
        let config = StorageConfig {
            backend: StorageBackend::Postgres,
            ..Default::default()
        };

        let result = StoreFactory::create(&config, &Secrets::default(), 8).await;

        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }
}
