//! Infrastructure services

mod agentic_router;
mod document_service;
mod rag_pipeline;
mod semantic_cache_service;

pub use agentic_router::{AgenticRouter, RoutedAnswer};
pub use document_service::{DocumentService, DEFAULT_LIST_LIMIT};
pub use rag_pipeline::{CacheReport, QueryOutcome, RagPipeline, SourceSummary, SOURCE_PREVIEW_CHARS};
pub use semantic_cache_service::SemanticCacheService;
