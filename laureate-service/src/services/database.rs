use crate::models::LaureateRecord;
use crate::services::store::LaureateStore;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, Client as MongoClient, Collection, Database};
use service_core::error::AppError;

const LAUREATES_COLLECTION: &str = "laureates";

#[derive(Clone)]
pub struct LaureateDb {
    client: MongoClient,
    db: Database,
}

impl LaureateDb {
    /// Build a client for `uri`. The driver connects lazily, so this succeeds
    /// even while the server is down; reachability is tracked by the
    /// connection monitor.
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!(database = %database, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to create MongoDB client: {}", e);
            AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
        })?;
        let db = client.database(database);
        Ok(Self { client, db })
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }

    pub fn laureates(&self) -> Collection<LaureateRecord> {
        self.db.collection(LAUREATES_COLLECTION)
    }
}

#[async_trait]
impl LaureateStore for LaureateDb {
    async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::debug!("MongoDB ping failed: {}", e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })?;
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<LaureateRecord>, AppError> {
        let cursor = self.laureates().find(doc! {}, None).await.map_err(|e| {
            tracing::error!("Failed to list laureates: {}", e);
            AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
        })?;

        cursor.try_collect().await.map_err(|e| {
            tracing::error!("Failed to collect laureates: {}", e);
            AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<LaureateRecord>, AppError> {
        self.laureates()
            .find_one(doc! { "id": id }, None)
            .await
            .map_err(|e| {
                tracing::error!(laureate_id = id, "Failed to find laureate: {}", e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })
    }

    async fn delete_all(&self) -> Result<u64, AppError> {
        let result = self
            .laureates()
            .delete_many(doc! {}, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to clear laureates: {}", e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })?;
        Ok(result.deleted_count)
    }

    async fn insert(&self, record: &LaureateRecord) -> Result<(), AppError> {
        self.laureates()
            .insert_one(record, None)
            .await
            .map_err(|e| {
                tracing::error!(laureate_id = record.id, "Failed to insert laureate: {}", e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })?;
        Ok(())
    }
}
