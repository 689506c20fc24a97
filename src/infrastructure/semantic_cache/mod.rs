//! Semantic cache store implementations

mod in_memory;
mod pgvector;

pub use in_memory::InMemorySemanticCacheStore;
pub use pgvector::PgvectorSemanticCacheStore;
