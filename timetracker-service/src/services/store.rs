use crate::models::{ContactMessage, StatusCheck};
use async_trait::async_trait;
use service_core::error::AppError;

pub const STATUS_CHECKS_COLLECTION: &str = "status_checks";
pub const CONTACT_MESSAGES_COLLECTION: &str = "contact_messages";

/// Persistence for the two record kinds.
///
/// Every write is a single-document insert; reads are capped by `limit`.
#[async_trait]
pub trait Store: Send + Sync {
    /// Cheap liveness probe used by the health endpoints.
    async fn ping(&self) -> Result<(), AppError>;

    async fn insert_status_check(&self, status_check: &StatusCheck) -> Result<(), AppError>;

    /// Status checks in insertion order.
    async fn list_status_checks(&self, limit: usize) -> Result<Vec<StatusCheck>, AppError>;

    async fn insert_contact_message(&self, message: &ContactMessage) -> Result<(), AppError>;

    /// Contact messages, newest first.
    async fn list_contact_messages(&self, limit: usize) -> Result<Vec<ContactMessage>, AppError>;

    /// Release connections. Called once during graceful shutdown.
    async fn shutdown(&self) {}
}
