//! Cache command - semantic cache maintenance without the HTTP server

use std::sync::Arc;

use clap::Subcommand;
use tracing::warn;

use crate::config::{AppConfig, Secrets, StorageBackend};
use crate::domain::{CacheStats, RecencyPolicy};
use crate::infrastructure::embedding::EmbeddingProviderFactory;
use crate::infrastructure::services::SemanticCacheService;
use crate::infrastructure::storage::StoreFactory;

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheCommand {
    /// Print entry and hit totals
    Stats,

    /// Remove every cached answer
    Clear,
}

pub async fn run(command: CacheCommand) -> anyhow::Result<()> {
    let (config, secrets) = super::bootstrap()?;
    let cache = cache_service(&config, &secrets).await?;

    match command {
        CacheCommand::Stats => {
            let stats = cache.stats().await?;
            print!("{}", render_stats(&stats));
        }
        CacheCommand::Clear => {
            cache.clear().await?;
            println!("Semantic cache cleared.");
        }
    }

    Ok(())
}

/// The same cache service the server builds, over the configured store
async fn cache_service(
    config: &AppConfig,
    secrets: &Secrets,
) -> anyhow::Result<SemanticCacheService> {
    if config.storage.backend == StorageBackend::InMemory {
        warn!("Storage backend is in-memory; the cache starts empty in every process");
    }

    let embedder = EmbeddingProviderFactory::create_embedder(&config.embedding, secrets)?;
    let stores = StoreFactory::create(&config.storage, secrets, embedder.dimensions()).await?;

    Ok(SemanticCacheService::new(
        stores.cache,
        embedder,
        Arc::new(RecencyPolicy::from_config(&config.recency)?),
        config.cache.clone(),
    ))
}

fn render_stats(stats: &CacheStats) -> String {
    format!(
        "Cached entries: {}\nTotal hits:     {}\n",
        stats.total_entries, stats.total_hits
    )
}
