use crate::models::ContactMessage;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateContactMessageRequest {
    #[validate(length(min = 1, message = "user_name must not be empty"))]
    pub user_name: String,
    #[validate(length(min = 1, message = "user_email must not be empty"))]
    pub user_email: String,
    #[serde(default)]
    pub user_company: Option<String>,
    #[serde(default)]
    pub user_phone: Option<String>,
    #[validate(length(min = 1, message = "message must not be empty"))]
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ContactMessageResponse {
    pub id: String,
    pub user_name: String,
    pub user_email: String,
    pub user_company: Option<String>,
    pub user_phone: Option<String>,
    pub message: String,
    pub timestamp: String,
}

impl From<ContactMessage> for ContactMessageResponse {
    fn from(message: ContactMessage) -> Self {
        Self {
            id: message.id,
            user_name: message.user_name,
            user_email: message.user_email,
            user_company: message.user_company,
            user_phone: message.user_phone,
            message: message.message,
            timestamp: message.timestamp.to_rfc3339(),
        }
    }
}
