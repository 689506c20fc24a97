//! Document store implementations

mod in_memory;
mod pgvector;

pub use in_memory::InMemoryDocumentStore;
pub use pgvector::PgvectorDocumentStore;
