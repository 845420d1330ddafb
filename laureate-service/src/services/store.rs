use crate::models::LaureateRecord;
use async_trait::async_trait;
use service_core::error::AppError;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Persistence operations the HTTP layer and the seeder rely on.
#[async_trait]
pub trait LaureateStore: Send + Sync {
    /// Round-trip to the backing store.
    async fn health_check(&self) -> Result<(), AppError>;

    /// All records in storage order.
    async fn find_all(&self) -> Result<Vec<LaureateRecord>, AppError>;

    /// First record whose `id` field equals `id`.
    async fn find_by_id(&self, id: i64) -> Result<Option<LaureateRecord>, AppError>;

    /// Remove every record, returning how many were deleted.
    async fn delete_all(&self) -> Result<u64, AppError>;

    async fn insert(&self, record: &LaureateRecord) -> Result<(), AppError>;
}

/// Vector-backed store for tests and local runs without MongoDB.
///
/// Can be switched offline to simulate an unreachable database, and told to
/// reject inserts for specific ids.
pub struct InMemoryLaureateStore {
    records: Mutex<Vec<LaureateRecord>>,
    available: AtomicBool,
    rejected_ids: Mutex<HashSet<i64>>,
}

impl Default for InMemoryLaureateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryLaureateStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            available: AtomicBool::new(true),
            rejected_ids: Mutex::new(HashSet::new()),
        }
    }

    pub fn with_records(records: Vec<LaureateRecord>) -> Self {
        let store = Self::new();
        if let Ok(mut guard) = store.records.lock() {
            *guard = records;
        }
        store
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Make every later insert of a record with this id fail.
    pub fn reject_inserts_for(&self, id: i64) {
        if let Ok(mut rejected) = self.rejected_ids.lock() {
            rejected.insert(id);
        }
    }

    fn ensure_available(&self) -> Result<(), AppError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(AppError::DatabaseError(anyhow::anyhow!(
                "in-memory store is offline"
            )))
        }
    }

    fn lock_records(&self) -> Result<std::sync::MutexGuard<'_, Vec<LaureateRecord>>, AppError> {
        self.records.lock().map_err(|e| {
            AppError::InternalError(anyhow::anyhow!("In-memory store mutex poisoned: {}", e))
        })
    }
}

#[async_trait]
impl LaureateStore for InMemoryLaureateStore {
    async fn health_check(&self) -> Result<(), AppError> {
        self.ensure_available()
    }

    async fn find_all(&self) -> Result<Vec<LaureateRecord>, AppError> {
        self.ensure_available()?;
        Ok(self.lock_records()?.clone())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<LaureateRecord>, AppError> {
        self.ensure_available()?;
        Ok(self.lock_records()?.iter().find(|r| r.id == id).cloned())
    }

    async fn delete_all(&self) -> Result<u64, AppError> {
        self.ensure_available()?;
        let mut records = self.lock_records()?;
        let deleted = records.len() as u64;
        records.clear();
        Ok(deleted)
    }

    async fn insert(&self, record: &LaureateRecord) -> Result<(), AppError> {
        self.ensure_available()?;
        let rejected = self
            .rejected_ids
            .lock()
            .map_err(|e| {
                AppError::InternalError(anyhow::anyhow!("In-memory store mutex poisoned: {}", e))
            })?
            .contains(&record.id);
        if rejected {
            return Err(AppError::DatabaseError(anyhow::anyhow!(
                "insert rejected for laureate {}",
                record.id
            )));
        }
        self.lock_records()?.push(record.clone());
        Ok(())
    }
}
