//! Semantic cache admin endpoints

use axum::extract::State;
use tracing::info;

use crate::api::state::AppState;
use crate::api::types::{ApiError, CacheStatsResponse, ClearCacheResponse, Json};

/// GET /admin/cache/stats
pub async fn cache_stats(
    State(state): State<AppState>,
) -> Result<Json<CacheStatsResponse>, ApiError> {
    let report = state.pipeline.cache_report().await?;

    Ok(Json(report.into()))
}

/// DELETE /admin/cache
pub async fn clear_cache(
    State(state): State<AppState>,
) -> Result<Json<ClearCacheResponse>, ApiError> {
    state.pipeline.clear_cache().await?;
    let stats = state.pipeline.router().cache().stats().await?;

    info!("Semantic cache cleared via admin API");

    Ok(Json(stats.into()))
}
