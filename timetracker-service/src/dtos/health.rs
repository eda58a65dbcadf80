use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RootResponse {
    #[schema(example = "TimeTracker Pro API")]
    pub message: String,
    #[schema(example = "/docs")]
    pub docs: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiInfoResponse {
    #[schema(example = "TimeTracker Pro API is running")]
    pub message: String,
    #[schema(example = "ok")]
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
    pub timestamp: String,
    /// `connected`, or `error: <cause>` when the store is unreachable.
    #[schema(example = "connected")]
    pub database: String,
    #[schema(example = "1.0.0")]
    pub api_version: String,
}

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    #[schema(example = "Internal server error")]
    pub detail: String,
}
