use crate::dtos::{CreateStatusCheckRequest, StatusCheckResponse};
use crate::models::StatusCheck;
use crate::startup::AppState;
use crate::utils::ValidatedJson;
use axum::{extract::State, Json};
use service_core::error::AppError;

/// Upper bound on records returned by `GET /api/status`.
pub const STATUS_CHECK_LIST_LIMIT: usize = 1000;

#[utoipa::path(
    post,
    path = "/api/status",
    request_body = CreateStatusCheckRequest,
    responses(
        (status = 200, description = "Status check recorded", body = StatusCheckResponse),
        (status = 422, description = "Missing or empty client_name", body = crate::dtos::ErrorDetail),
        (status = 500, description = "Store failure", body = crate::dtos::ErrorDetail)
    ),
    tag = "Status"
)]
pub async fn create_status_check(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateStatusCheckRequest>,
) -> Result<Json<StatusCheckResponse>, AppError> {
    let status_check = StatusCheck::new(req, state.clock.now(), state.ids.as_ref());

    state
        .store
        .insert_status_check(&status_check)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Error creating status check");
            AppError::DatabaseError(anyhow::Error::new(e))
        })?;

    metrics::counter!("status_checks_created_total").increment(1);
    tracing::info!(
        status_check_id = %status_check.id,
        client_name = %status_check.client_name,
        "Status check created"
    );

    Ok(Json(StatusCheckResponse::from(status_check)))
}

#[utoipa::path(
    get,
    path = "/api/status",
    responses(
        (status = 200, description = "Status checks in insertion order", body = [StatusCheckResponse]),
        (status = 500, description = "Store failure", body = crate::dtos::ErrorDetail)
    ),
    tag = "Status"
)]
pub async fn list_status_checks(
    State(state): State<AppState>,
) -> Result<Json<Vec<StatusCheckResponse>>, AppError> {
    let checks = state
        .store
        .list_status_checks(STATUS_CHECK_LIST_LIMIT)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Error fetching status checks");
            AppError::DatabaseError(anyhow::Error::new(e))
        })?;

    Ok(Json(
        checks
            .into_iter()
            .map(StatusCheckResponse::from)
            .collect(),
    ))
}
