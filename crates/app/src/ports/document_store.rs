//! Document store port — point reads and guarded writes for sensor documents.

use std::fmt;
use std::future::Future;

use sensorsync_domain::document::SensorDocument;
use sensorsync_domain::error::SensorSyncError;

/// Opaque version tag of a stored document.
///
/// Every successful write produces a new tag; a write guarded by a stale tag
/// is rejected as a conflict.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ETag(String);

impl ETag {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ETag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A document together with the version it was read at.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub document: SensorDocument,
    pub etag: ETag,
}

/// Result of a point read.
///
/// Operational failures are not a variant: they come back as `Err` so that
/// callers can never mistake an outage for absence.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadOutcome {
    Found(StoredDocument),
    NotFound,
}

/// A partitioned document container.
///
/// Implementations take the document id from the `id` field and the
/// partition key from the container's partition key path.
pub trait DocumentStore {
    /// Point read by document id and partition key.
    fn read(
        &self,
        id: &str,
        partition_key: &str,
    ) -> impl Future<Output = Result<ReadOutcome, SensorSyncError>> + Send;

    /// Overwrite a whole document, but only if it is still at `etag`.
    ///
    /// Fails with [`SensorSyncError::Conflict`] when the stored version no
    /// longer matches (or the document is gone).
    fn replace(
        &self,
        document: SensorDocument,
        etag: &ETag,
    ) -> impl Future<Output = Result<ETag, SensorSyncError>> + Send;

    /// Insert a document that must not exist yet.
    ///
    /// Fails with [`SensorSyncError::Conflict`] when a document with the same
    /// id already exists in the partition.
    fn create(
        &self,
        document: SensorDocument,
    ) -> impl Future<Output = Result<ETag, SensorSyncError>> + Send;
}
