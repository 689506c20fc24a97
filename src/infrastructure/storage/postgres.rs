//! PostgreSQL connection pooling

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use crate::config::StorageConfig;
use crate::domain::DomainError;

/// PostgreSQL pool configuration
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub idle_timeout_secs: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/rag_router".to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 30,
            idle_timeout_secs: 600,
        }
    }
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Pool settings from the storage section
    pub fn from_storage_config(url: impl Into<String>, storage: &StorageConfig) -> Self {
        Self::new(url)
            .with_max_connections(storage.max_connections)
            .with_min_connections(storage.min_connections)
            .with_connect_timeout(storage.connect_timeout_secs)
    }

    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn with_min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    pub fn with_connect_timeout(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = secs;
        self
    }

    pub fn with_idle_timeout(mut self, secs: u64) -> Self {
        self.idle_timeout_secs = secs;
        self
    }

    pub async fn connect(&self) -> Result<PgPool, DomainError> {
        info!(
            max_connections = self.max_connections,
            "Connecting to PostgreSQL"
        );

        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(Duration::from_secs(self.connect_timeout_secs))
            .idle_timeout(Duration::from_secs(self.idle_timeout_secs))
            .connect(&self.url)
            .await
            .map_err(|e| DomainError::store(format!("Failed to connect to PostgreSQL: {}", e)))
    }
}
