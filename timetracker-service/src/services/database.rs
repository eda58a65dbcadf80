use crate::models::{ContactMessage, StatusCheck};
use crate::services::store::{CONTACT_MESSAGES_COLLECTION, STATUS_CHECKS_COLLECTION};
use crate::services::Store;
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::{
    bson::doc, options::FindOptions, options::IndexOptions, Client as MongoClient, Collection,
    Database, IndexModel,
};
use service_core::error::AppError;

#[derive(Clone)]
pub struct MongoStore {
    client: MongoClient,
    db: Database,
}

impl MongoStore {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!("Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB: {}", e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "MongoDB client ready");
        Ok(Self { client, db })
    }

    pub async fn initialize_indexes(&self) -> Result<(), AppError> {
        tracing::info!("Creating MongoDB indexes for timetracker-service");

        let timestamp_index = IndexModel::builder()
            .keys(doc! { "timestamp": -1 })
            .options(
                IndexOptions::builder()
                    .name("timestamp_desc".to_string())
                    .build(),
            )
            .build();

        self.contact_messages()
            .create_index(timestamp_index, None)
            .await
            .map_err(|e| {
                tracing::error!(
                    "Failed to create timestamp index on contact_messages collection: {}",
                    e
                );
                AppError::from(e)
            })?;
        tracing::info!("Created index on contact_messages.timestamp");

        Ok(())
    }

    pub fn status_checks(&self) -> Collection<StatusCheck> {
        self.db.collection(STATUS_CHECKS_COLLECTION)
    }

    pub fn contact_messages(&self) -> Collection<ContactMessage> {
        self.db.collection(CONTACT_MESSAGES_COLLECTION)
    }
}

fn limit_of(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

#[async_trait]
impl Store for MongoStore {
    async fn ping(&self) -> Result<(), AppError> {
        self.db
            .list_collection_names(None)
            .await
            .map_err(AppError::from)?;
        Ok(())
    }

    async fn insert_status_check(&self, status_check: &StatusCheck) -> Result<(), AppError> {
        self.status_checks()
            .insert_one(status_check, None)
            .await
            .map_err(AppError::from)?;
        Ok(())
    }

    async fn list_status_checks(&self, limit: usize) -> Result<Vec<StatusCheck>, AppError> {
        let options = FindOptions::builder().limit(limit_of(limit)).build();

        let cursor = self
            .status_checks()
            .find(None, options)
            .await
            .map_err(AppError::from)?;

        cursor.try_collect().await.map_err(AppError::from)
    }

    async fn insert_contact_message(&self, message: &ContactMessage) -> Result<(), AppError> {
        self.contact_messages()
            .insert_one(message, None)
            .await
            .map_err(AppError::from)?;
        Ok(())
    }

    async fn list_contact_messages(&self, limit: usize) -> Result<Vec<ContactMessage>, AppError> {
        let options = FindOptions::builder()
            .sort(doc! { "timestamp": -1 })
            .limit(limit_of(limit))
            .build();

        let cursor = self
            .contact_messages()
            .find(None, options)
            .await
            .map_err(AppError::from)?;

        cursor.try_collect().await.map_err(AppError::from)
    }

    async fn shutdown(&self) {
        tracing::info!("Closing MongoDB client");
        self.client.clone().shutdown().await;
    }
}
