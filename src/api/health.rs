//! Health check endpoints for Kubernetes probes

use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use super::state::AppState;
use crate::api::types::Json;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<Vec<HealthCheck>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Health of one vector index
#[derive(Serialize)]
pub struct HealthCheck {
    pub name: String,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

pub async fn health_check() -> impl IntoResponse {
    let response = HealthResponse {
        status: HealthStatus::Healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: None,
        latency_ms: None,
    };

    (StatusCode::OK, Json(response))
}

/// Readiness: every registered vector store must answer its health probe.
///
/// Some stores down is `degraded` (still 200); all down, or none registered,
/// is `unhealthy` (503).
pub async fn ready_check(State(state): State<AppState>) -> impl IntoResponse {
    let start = Instant::now();

    let checks: Vec<HealthCheck> = state
        .tutor
        .stores()
        .health()
        .await
        .into_iter()
        .map(|(index, result)| match result {
            Ok(true) => HealthCheck {
                name: index,
                status: HealthStatus::Healthy,
                message: None,
            },
            Ok(false) => HealthCheck {
                name: index,
                status: HealthStatus::Unhealthy,
                message: Some("health probe failed".to_string()),
            },
            Err(e) => HealthCheck {
                name: index,
                status: HealthStatus::Unhealthy,
                message: Some(e.to_string()),
            },
        })
        .collect();

    let overall_status = overall(&checks);
    let status_code = match overall_status {
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::OK,
    };

    let response = HealthResponse {
        status: overall_status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: Some(checks),
        latency_ms: Some(start.elapsed().as_millis() as u64),
    };

    (status_code, Json(response))
}

pub async fn live_check() -> impl IntoResponse {
    StatusCode::OK
}

fn overall(checks: &[HealthCheck]) -> HealthStatus {
    let healthy = checks
        .iter()
        .filter(|c| c.status == HealthStatus::Healthy)
        .count();

    match healthy {
        0 => HealthStatus::Unhealthy,
        n if n == checks.len() => HealthStatus::Healthy,
        _ => HealthStatus::Degraded,
    }
}
