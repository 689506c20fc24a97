//! Prometheus metrics infrastructure

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, response::IntoResponse, routing::get, Router};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::config::MetricsConfig;
use crate::domain::{MissReason, RouteStrategy};

/// Prometheus metrics handle for serving the metrics endpoint
#[derive(Clone)]
pub struct PrometheusMetrics {
    handle: Arc<PrometheusHandle>,
}

impl std::fmt::Debug for PrometheusMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrometheusMetrics").finish_non_exhaustive()
    }
}

impl PrometheusMetrics {
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

/// Install the global Prometheus recorder
pub fn init_metrics(config: &MetricsConfig) -> Option<PrometheusMetrics> {
    if !config.enabled {
        tracing::info!("Prometheus metrics disabled");
        return None;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            gauge!("rag_router_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);

            tracing::info!("Prometheus metrics initialized at {}", config.path);

            Some(PrometheusMetrics {
                handle: Arc::new(handle),
            })
        }
        Err(e) => {
            tracing::error!("Failed to initialize Prometheus metrics: {}", e);
            None
        }
    }
}

pub fn create_metrics_router(metrics: PrometheusMetrics, path: &str) -> Router {
    Router::new()
        .route(path, get(metrics_handler))
        .with_state(metrics)
}

async fn metrics_handler(State(metrics): State<PrometheusMetrics>) -> impl IntoResponse {
    metrics.render()
}

pub fn record_http_request(method: &str, path: &str, status: u16, duration: Duration) {
    let labels = [
        ("method", method.to_string()),
        ("path", path.to_string()),
        ("status", status.to_string()),
    ];

    counter!("http_requests_total", &labels).increment(1);
    histogram!("http_request_duration_seconds", &labels).record(duration.as_secs_f64());

    if status >= 500 {
        counter!("http_server_errors_total", &labels).increment(1);
    }
}

/// Count a cache lookup by outcome (`hit` or `miss`)
pub fn record_cache_lookup(hit: bool) {
    let outcome = if hit { "hit" } else { "miss" };
    counter!("rag_cache_lookups_total", "outcome" => outcome).increment(1);
}

/// Count a candidate rejected by a time-sensitivity rule
pub fn record_cache_invalidation(reason: &MissReason) {
    counter!("rag_cache_invalidations_total", "rule" => reason.rule()).increment(1);
}

pub fn record_route_decision(strategy: RouteStrategy) {
    counter!("rag_route_decisions_total", "strategy" => strategy.as_str()).increment(1);
}

/// End-to-end answer latency per strategy
pub fn record_query_duration(strategy: RouteStrategy, duration: Duration) {
    histogram!("rag_query_duration_seconds", "strategy" => strategy.as_str())
        .record(duration.as_secs_f64());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_metrics() {
        let config = MetricsConfig {
            enabled: false,
            ..Default::default()
        };

        assert!(init_metrics(&config).is_none());
    }

    #[test]
    fn test_recording_without_recorder_is_noop() {
        record_cache_lookup(true);
        record_cache_invalidation(&MissReason::NoMatch);
        record_route_decision(RouteStrategy::WebSearch);
        record_query_duration(RouteStrategy::CacheHit, Duration::from_millis(3));
        record_http_request("GET", "/health", 200, Duration::from_millis(1));
    }
}
