pub mod contact;
pub mod health;
pub mod status;

pub use contact::{ContactMessageResponse, CreateContactMessageRequest};
pub use health::{ApiInfoResponse, ErrorDetail, HealthResponse, RootResponse};
pub use status::{CreateStatusCheckRequest, StatusCheckResponse};
