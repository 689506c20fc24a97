//! Infrastructure layer - External service implementations

pub mod document;
pub mod embedding;
pub mod http_client;
pub mod llm;
pub mod logging;
pub mod observability;
pub mod semantic_cache;
pub mod services;
pub mod storage;
pub mod web_search;
