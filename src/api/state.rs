//! Application state for shared services

use sqlx::postgres::PgPool;

use crate::infrastructure::services::{DocumentService, RagPipeline};

/// Services shared by every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub pipeline: RagPipeline,
    pub documents: DocumentService,
    /// Present for the postgres backend, used by readiness checks
    pub pool: Option<PgPool>,
}

impl AppState {
    pub fn new(pipeline: RagPipeline, documents: DocumentService) -> Self {
        Self {
            pipeline,
            documents,
            pool: None,
        }
    }

    pub fn with_pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }
}

#[cfg(test)]
pub mod test_support {
    use std::sync::Arc;

    use super::*;
    use crate::domain::answer::MockAnswerGenerator;
    use crate::domain::embedding::MockEmbeddingProvider;
    use crate::domain::web_search::MockWebSearcher;
    use crate::domain::{
        AnswerGenerator, RecencyPolicy, RouterConfig, SemanticCacheConfig, TextEmbedder,
        WebSearcher,
    };
    use crate::infrastructure::services::{AgenticRouter, SemanticCacheService};
    use crate::infrastructure::storage::StoreFactory;

    pub const DIMS: usize = 16;

    /// State over in-memory stores with the given searcher and generator
    pub fn state_with(
        embedding: MockEmbeddingProvider,
        web_searcher: MockWebSearcher,
        generator: MockAnswerGenerator,
    ) -> AppState {
        let stores = StoreFactory::in_memory();
        let embedder = TextEmbedder::new(Arc::new(embedding), "mock-embedding", DIMS);
        let recency = Arc::new(RecencyPolicy::default());

        let cache = SemanticCacheService::new(
            stores.cache.clone(),
            embedder.clone(),
            recency.clone(),
            SemanticCacheConfig::default(),
        );
        let web_searcher: Arc<dyn WebSearcher> = Arc::new(web_searcher);
        let generator: Arc<dyn AnswerGenerator> = Arc::new(generator);

        let router = AgenticRouter::new(
            cache,
            stores.documents.clone(),
            web_searcher,
            generator,
            recency,
            RouterConfig::default(),
        );

        AppState::new(
            RagPipeline::new(router),
            DocumentService::new(stores.documents, embedder),
        )
    }

    pub fn state() -> AppState {
        state_with(
            MockEmbeddingProvider::new("mock", DIMS),
            MockWebSearcher::new(),
            MockAnswerGenerator::new(),
        )
    }
}
