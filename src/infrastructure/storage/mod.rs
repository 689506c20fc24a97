//! PostgreSQL and pgvector plumbing shared by the stores

mod factory;
mod pgvector;
mod postgres;
mod schema;

pub use factory::{StoreFactory, Stores};
pub use pgvector::{parse_pgvector, to_pgvector, validate_table_name};
pub use postgres::PostgresConfig;
pub use schema::PgvectorSchema;
