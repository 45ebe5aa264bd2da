//! Storage-specific error type wrapping sqlx errors.

use sensorsync_domain::error::SensorSyncError;

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query or connection failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Failed to (de)serialize a document body.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to run migrations.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// The document carries no string `id`.
    #[error("document has no string id")]
    MissingId,

    /// The document carries no string value at the partition key path.
    #[error("document has no string partition key at {path}")]
    MissingPartitionKey { path: String },

    /// The container already exists with a different partition key path.
    #[error("container {database}/{container} is partitioned by {existing}, not {requested}")]
    PartitionKeyMismatch {
        database: String,
        container: String,
        existing: String,
        requested: String,
    },
}

impl From<StorageError> for SensorSyncError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
