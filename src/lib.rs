//! PMP RAG Router
//!
//! Answers questions over an uploaded document corpus with:
//! - A semantic response cache keyed by query embedding similarity
//! - Invalidation of cached answers for time-sensitive queries
//! - An agentic router choosing between the cache, vector retrieval and web search

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use tracing::info;

use api::state::AppState;
use config::Secrets;
use domain::RecencyPolicy;
use infrastructure::{
    embedding::EmbeddingProviderFactory,
    llm::LlmProviderFactory,
    services::{AgenticRouter, DocumentService, RagPipeline, SemanticCacheService},
    storage::StoreFactory,
    web_search::create_web_searcher,
};

/// Wire stores, providers and services from configuration
pub async fn create_app_state_with_config(
    config: &AppConfig,
    secrets: &Secrets,
) -> anyhow::Result<AppState> {
    config.validate()?;

    let embedder = EmbeddingProviderFactory::create_embedder(&config.embedding, secrets)?;
    let stores = StoreFactory::create(&config.storage, secrets, embedder.dimensions()).await?;
    let recency = Arc::new(RecencyPolicy::from_config(&config.recency)?);

    let cache = SemanticCacheService::new(
        stores.cache.clone(),
        embedder.clone(),
        recency.clone(),
        config.cache.clone(),
    );

    let router = AgenticRouter::new(
        cache,
        stores.documents.clone(),
        create_web_searcher(&config.web_search, secrets)?,
        LlmProviderFactory::create_answer_generator(&config.llm, secrets)?,
        recency,
        config.router.clone(),
    );

    info!(
        embedding_provider = embedder.provider_name(),
        embedding_model = embedder.model(),
        dimensions = embedder.dimensions(),
        llm_model = %config.llm.model,
        "RAG pipeline initialized"
    );

    let mut state = AppState::new(
        RagPipeline::new(router),
        DocumentService::new(stores.documents, embedder),
    );
    if let Some(pool) = stores.pool {
        state = state.with_pool(pool);
    }

    Ok(state)
}

/// Load configuration and secrets from the environment, then wire the state
pub async fn create_app_state() -> anyhow::Result<AppState> {
    let config = AppConfig::load()?;
    create_app_state_with_config(&config, &Secrets::from_env()).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_api_keys_fail_startup() {
        let result = create_app_state_with_config(&AppConfig::default(), &Secrets::default()).await;

        let err = result.unwrap_err().to_string();
        assert!(err.contains("API_KEY"), "unexpected error: {err}");
    }
}
