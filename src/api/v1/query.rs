//! Query endpoint

use axum::extract::State;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, QueryRequest};
use crate::infrastructure::services::QueryOutcome;

/// POST /v1/query
pub async fn query(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<QueryOutcome>, ApiError> {
    debug!(query_len = request.query.len(), "Received query");

    let outcome = state.pipeline.query(&request.query).await?;

    Ok(Json(outcome))
}
