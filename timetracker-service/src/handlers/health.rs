use crate::dtos::HealthResponse;
use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, Json};
use service_core::error::AppError;

pub const API_VERSION: &str = "1.0.0";

/// Liveness report. Always 200: a failing store is reported in `database`
/// so monitoring can tell "service up, store down" from "service down".
#[utoipa::path(
    get,
    path = "/api/health",
    responses((status = 200, description = "Service is up; store state in `database`", body = HealthResponse)),
    tag = "Observability"
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match state.store.ping().await {
        Ok(()) => "connected".to_string(),
        Err(e) => {
            tracing::warn!(error = %e, "Store liveness probe failed");
            let cause = match e {
                AppError::DatabaseError(cause) => cause.to_string(),
                other => other.to_string(),
            };
            format!("error: {}", cause)
        }
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: state.clock.now().to_rfc3339(),
        database,
        api_version: API_VERSION.to_string(),
    })
}

/// Readiness probe: 503 while the store is unreachable.
#[utoipa::path(
    get,
    path = "/api/ready",
    responses(
        (status = 200, description = "Store reachable"),
        (status = 503, description = "Store unreachable")
    ),
    tag = "Observability"
)]
pub async fn readiness_check(State(state): State<AppState>) -> StatusCode {
    match state.store.ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness probe failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
