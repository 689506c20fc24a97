use axum::{http::Method, middleware, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::admin;
use super::health;
use super::middleware::metrics_middleware;
use super::state::AppState;
use super::v1;
use crate::infrastructure::observability::{create_metrics_router, PrometheusMetrics};

/// Browser clients (the chat UI) call the API cross-origin
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers(Any)
}

/// Create the full router with application state
pub fn create_router_with_state(
    state: AppState,
    metrics: Option<PrometheusMetrics>,
    metrics_path: &str,
) -> Router {
    let mut router = Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .nest("/v1", v1::create_v1_router())
        .nest("/admin", admin::create_admin_router())
        .with_state(state)
        .layer(middleware::from_fn(metrics_middleware));

    if let Some(metrics) = metrics {
        router = router.merge(create_metrics_router(metrics, metrics_path));
    }

    router.layer(cors_layer()).layer(TraceLayer::new_for_http())
}
