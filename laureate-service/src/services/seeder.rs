//! One-shot replacement of the laureate collection with a fixed dataset.

use crate::models::LaureateRecord;
use crate::services::metrics::record_seed;
use crate::services::store::LaureateStore;
use service_core::error::AppError;
use std::collections::HashSet;
use validator::Validate;

const BUNDLED_DATASET: &str = include_str!("../../data/laureates.json");

/// Outcome of a seeding run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Records removed before inserting.
    pub deleted: u64,
    pub inserted: usize,
    pub failed: usize,
    /// Dataset ids whose insert failed, in dataset order.
    pub failed_ids: Vec<i64>,
}

impl SeedReport {
    pub fn is_complete(&self) -> bool {
        self.failed == 0
    }
}

/// Parse and validate a dataset: a JSON array of laureate records.
pub fn parse_dataset(json: &str) -> Result<Vec<LaureateRecord>, AppError> {
    let records: Vec<LaureateRecord> = serde_json::from_str(json)
        .map_err(|e| AppError::ConfigError(anyhow::anyhow!("Invalid laureate dataset: {}", e)))?;

    let mut seen = HashSet::with_capacity(records.len());
    for record in &records {
        record.validate()?;
        if !seen.insert(record.id) {
            tracing::warn!(laureate_id = record.id, "Duplicate id in laureate dataset");
        }
    }

    Ok(records)
}

/// The dataset compiled into the binary.
pub fn bundled_dataset() -> Result<Vec<LaureateRecord>, AppError> {
    parse_dataset(BUNDLED_DATASET)
}

/// Read the dataset from `path`, or fall back to the bundled one.
pub async fn load_dataset(path: Option<&str>) -> Result<Vec<LaureateRecord>, AppError> {
    match path {
        Some(path) => {
            tracing::info!(path = %path, "Loading laureate dataset from file");
            let json = tokio::fs::read_to_string(path).await.map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!(
                    "Failed to read laureate dataset {}: {}",
                    path,
                    e
                ))
            })?;
            parse_dataset(&json)
        }
        None => bundled_dataset(),
    }
}

/// Delete every stored laureate, then insert `dataset` one record at a time.
///
/// A failed delete aborts the run. A failed insert is counted and the run
/// moves on to the next record.
pub async fn seed(
    store: &dyn LaureateStore,
    dataset: &[LaureateRecord],
) -> Result<SeedReport, AppError> {
    let deleted = store.delete_all().await.map_err(|e| {
        tracing::error!("Failed to clear laureates before seeding: {}", e);
        e
    })?;

    let mut report = SeedReport {
        deleted,
        ..SeedReport::default()
    };

    for record in dataset {
        match store.insert(record).await {
            Ok(()) => report.inserted += 1,
            Err(e) => {
                tracing::warn!(laureate_id = record.id, error = %e, "Failed to seed laureate");
                report.failed += 1;
                report.failed_ids.push(record.id);
            }
        }
    }

    record_seed("inserted", report.inserted as u64);
    record_seed("failed", report.failed as u64);

    if report.is_complete() {
        tracing::info!(
            deleted = report.deleted,
            inserted = report.inserted,
            "Laureate collection seeded"
        );
    } else {
        tracing::warn!(
            deleted = report.deleted,
            inserted = report.inserted,
            failed = report.failed,
            failed_ids = ?report.failed_ids,
            "Laureate collection partially seeded"
        );
    }

    Ok(report)
}
