//! Health check endpoints

use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use super::state::AppState;
use crate::api::types::Json;
use crate::domain::DomainError;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<Vec<HealthCheck>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

#[derive(Serialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

#[derive(Serialize)]
pub struct HealthCheck {
    pub name: String,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub latency_ms: u64,
}

impl HealthCheck {
    fn from_result<T>(name: &str, result: Result<T, DomainError>, start: Instant) -> Self {
        let latency_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(_) => Self {
                name: name.to_string(),
                status: HealthStatus::Healthy,
                message: None,
                latency_ms,
            },
            Err(e) => Self {
                name: name.to_string(),
                status: HealthStatus::Unhealthy,
                message: Some(e.to_string()),
                latency_ms,
            },
        }
    }
}

/// Liveness: 200 while the process is serving
pub async fn health_check() -> impl IntoResponse {
    let response = HealthResponse {
        status: HealthStatus::Healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: None,
        latency_ms: None,
    };

    (StatusCode::OK, Json(response))
}

/// Readiness: both stores answer a cheap query
pub async fn ready_check(State(state): State<AppState>) -> impl IntoResponse {
    let start = Instant::now();

    let (documents, cache) = futures::join!(
        async {
            let started = Instant::now();
            HealthCheck::from_result("document_store", state.documents.count().await, started)
        },
        async {
            let started = Instant::now();
            HealthCheck::from_result(
                "cache_store",
                state.pipeline.router().cache().stats().await,
                started,
            )
        }
    );

    let checks = vec![documents, cache];
    let status = if checks.iter().all(|c| c.status == HealthStatus::Healthy) {
        HealthStatus::Healthy
    } else {
        HealthStatus::Unhealthy
    };

    let response = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: Some(checks),
        latency_ms: Some(start.elapsed().as_millis() as u64),
    };

    let status_code = match status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(response))
}
