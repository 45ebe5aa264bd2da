//! Ingest service — applies batches of sensor readings to the document store.

use sensorsync_domain::batch::{Batch, BatchItem};
use sensorsync_domain::document::{IncomingReading, SensorDocument};
use sensorsync_domain::error::{ConflictError, SensorSyncError};
use sensorsync_domain::time::now;

use crate::ports::{DocumentStore, ReadOutcome, StoredDocument};

/// Number of read-merge-write rounds attempted per reading before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// What happened to a single reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

/// Per-batch tally, used for logging only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
}

/// Application service running the merge-or-create policy over a batch.
pub struct IngestService<S> {
    store: S,
    max_attempts: u32,
}

impl<S: DocumentStore> IngestService<S> {
    /// Create a new service backed by the given store.
    pub fn new(store: S) -> Self {
        Self {
            store,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Override the conflict retry budget. Values below 1 are raised to 1.
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Apply every reading of `batch`, strictly in submission order.
    ///
    /// Skipped elements are counted and otherwise ignored. The first failing
    /// reading aborts the batch; readings written before it stay written.
    ///
    /// # Errors
    ///
    /// Returns the error of the first reading that could not be applied.
    #[tracing::instrument(skip(self, batch), fields(items = batch.len()))]
    pub async fn upsert_batch(&self, batch: Batch) -> Result<BatchReport, SensorSyncError> {
        let mut report = BatchReport::default();
        for item in batch {
            match item {
                BatchItem::Reading(reading) => match self.upsert_reading(&reading).await? {
                    UpsertOutcome::Created => report.created += 1,
                    UpsertOutcome::Updated => report.updated += 1,
                },
                BatchItem::Skipped { index, reason } => {
                    tracing::debug!(index, %reason, "skipping batch element");
                    report.skipped += 1;
                }
            }
        }
        Ok(report)
    }

    /// Merge `reading` into the stored document, or create it if absent.
    ///
    /// A guarded write that loses a race restarts from the read, up to the
    /// configured number of attempts.
    ///
    /// # Errors
    ///
    /// Returns a storage error when the store fails, or
    /// [`ConflictError::RetriesExhausted`] when every attempt conflicted.
    #[tracing::instrument(skip(self, reading), fields(sensor_id = %reading.sensor_id()))]
    pub async fn upsert_reading(
        &self,
        reading: &IncomingReading,
    ) -> Result<UpsertOutcome, SensorSyncError> {
        let id = reading.sensor_id().as_str();

        for attempt in 1..=self.max_attempts {
            let result = match self.store.read(id, id).await? {
                ReadOutcome::Found(StoredDocument {
                    mut document,
                    etag,
                }) => {
                    document.merge(reading, now());
                    self.store
                        .replace(document, &etag)
                        .await
                        .map(|_| UpsertOutcome::Updated)
                }
                ReadOutcome::NotFound => {
                    let document = SensorDocument::create(reading, now());
                    self.store
                        .create(document)
                        .await
                        .map(|_| UpsertOutcome::Created)
                }
            };

            match result {
                Err(SensorSyncError::Conflict(err)) => {
                    tracing::debug!(attempt, error = %err, "write conflict, retrying");
                }
                other => return other,
            }
        }

        tracing::warn!(attempts = self.max_attempts, "giving up after repeated conflicts");
        Err(ConflictError::RetriesExhausted {
            id: id.to_string(),
            attempts: self.max_attempts,
        }
        .into())
    }
}
