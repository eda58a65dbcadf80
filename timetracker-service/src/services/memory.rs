//! Process-local store for `STORE_BACKEND=memory` and tests.

use crate::models::{ContactMessage, StatusCheck};
use crate::services::Store;
use async_trait::async_trait;
use service_core::error::AppError;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct MemoryStore {
    status_checks: RwLock<Vec<StatusCheck>>,
    contact_messages: RwLock<Vec<ContactMessage>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn insert_status_check(&self, status_check: &StatusCheck) -> Result<(), AppError> {
        let mut checks = self.status_checks.write().await;
        if checks.iter().any(|c| c.id == status_check.id) {
            return Err(AppError::DatabaseError(anyhow::anyhow!(
                "duplicate key: status check {}",
                status_check.id
            )));
        }
        checks.push(status_check.clone());
        Ok(())
    }

    async fn list_status_checks(&self, limit: usize) -> Result<Vec<StatusCheck>, AppError> {
        let checks = self.status_checks.read().await;
        Ok(checks.iter().take(limit).cloned().collect())
    }

    async fn insert_contact_message(&self, message: &ContactMessage) -> Result<(), AppError> {
        let mut messages = self.contact_messages.write().await;
        if messages.iter().any(|m| m.id == message.id) {
            return Err(AppError::DatabaseError(anyhow::anyhow!(
                "duplicate key: contact message {}",
                message.id
            )));
        }
        messages.push(message.clone());
        Ok(())
    }

    async fn list_contact_messages(&self, limit: usize) -> Result<Vec<ContactMessage>, AppError> {
        let mut messages = self.contact_messages.read().await.clone();
        // Stable: equal timestamps keep insertion order.
        messages.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        messages.truncate(limit);
        Ok(messages)
    }
}
