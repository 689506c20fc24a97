//! Public v1 API endpoints

pub mod documents;
pub mod query;

use axum::{
    routing::{get, post},
    Router,
};

use super::state::AppState;

/// Create v1 API router
pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route("/query", post(query::query))
        .route(
            "/documents",
            get(documents::list_documents).post(documents::upload_document),
        )
}
