//! Migrate command - creates the pgvector schema

use anyhow::bail;
use tracing::info;

use crate::config::StorageBackend;
use crate::infrastructure::storage::StoreFactory;

pub async fn run() -> anyhow::Result<()> {
    let (config, secrets) = super::bootstrap()?;

    if config.storage.backend != StorageBackend::Postgres {
        bail!("migrate requires storage.backend = \"postgres\"");
    }

    let schema = StoreFactory::schema(&config.storage, config.embedding.dimensions)?;
    let pool = StoreFactory::connect(&config.storage, &secrets).await?;

    schema.ensure(&pool).await?;

    info!(
        documents_table = %config.storage.documents_table,
        cache_table = %config.storage.cache_table,
        dimensions = config.embedding.dimensions,
        "Schema is up to date"
    );
    println!("Schema is up to date.");

    pool.close().await;

    Ok(())
}
