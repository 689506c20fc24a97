//! Document domain models and the document store contract

mod entity;
mod repository;

pub use entity::{document_id_for, Document, ScoredDocument};
pub use repository::DocumentStore;

#[cfg(test)]
pub use repository::MockDocumentStore;
