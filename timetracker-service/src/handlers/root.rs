use crate::dtos::{ApiInfoResponse, RootResponse};
use axum::Json;
use service_core::error::AppError;

pub const SERVICE_TITLE: &str = "TimeTracker Pro API";
pub const DOCS_PATH: &str = "/docs";

/// Service identity outside the `/api` prefix. Never touches the store.
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: SERVICE_TITLE.to_string(),
        docs: DOCS_PATH.to_string(),
    })
}

#[utoipa::path(
    get,
    path = "/api/",
    responses((status = 200, description = "API is running", body = ApiInfoResponse)),
    tag = "Observability"
)]
pub async fn api_root() -> Json<ApiInfoResponse> {
    Json(ApiInfoResponse {
        message: format!("{} is running", SERVICE_TITLE),
        status: "ok".to_string(),
    })
}

pub async fn not_found() -> AppError {
    AppError::NotFound(anyhow::anyhow!("Not Found"))
}

pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
