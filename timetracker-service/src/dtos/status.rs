use crate::models::StatusCheck;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateStatusCheckRequest {
    #[validate(length(min = 1, message = "client_name must not be empty"))]
    #[schema(example = "acme")]
    pub client_name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusCheckResponse {
    pub id: String,
    pub client_name: String,
    /// RFC 3339, UTC.
    pub timestamp: String,
}

impl From<StatusCheck> for StatusCheckResponse {
    fn from(check: StatusCheck) -> Self {
        Self {
            id: check.id,
            client_name: check.client_name,
            timestamp: check.timestamp.to_rfc3339(),
        }
    }
}
