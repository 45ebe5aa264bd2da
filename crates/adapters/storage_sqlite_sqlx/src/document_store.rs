//! `SQLite` implementation of [`DocumentStore`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use sensorsync_app::ports::{DocumentStore, ETag, ReadOutcome, StoredDocument};
use sensorsync_domain::document::SensorDocument;
use sensorsync_domain::error::{ConflictError, SensorSyncError};

use crate::error::StorageError;
use crate::pool::ContainerSpec;

/// Wrapper for converting database rows into [`StoredDocument`].
struct Wrapper(StoredDocument);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let body: String = row.try_get("body")?;
        let etag: String = row.try_get("etag")?;

        let document: SensorDocument =
            serde_json::from_str(&body).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(StoredDocument {
            document,
            etag: ETag::new(etag),
        }))
    }
}

const SELECT_BY_KEY: &str = r"
    SELECT body, etag FROM documents
    WHERE database = ? AND container = ? AND partition_key = ? AND id = ?
";

const INSERT: &str = r"
    INSERT INTO documents (database, container, partition_key, id, body, etag)
    VALUES (?, ?, ?, ?, ?, ?)
    ON CONFLICT (database, container, partition_key, id) DO NOTHING
";

const REPLACE_IF_MATCH: &str = r"
    UPDATE documents SET body = ?, etag = ?
    WHERE database = ? AND container = ? AND partition_key = ? AND id = ? AND etag = ?
";

/// `SQLite`-backed document store bound to one container.
///
/// Obtained from [`Database::provision`](crate::pool::Database::provision).
pub struct SqliteDocumentStore {
    pool: SqlitePool,
    database: String,
    container: String,
    partition_key_path: String,
}

impl SqliteDocumentStore {
    pub(crate) fn new(pool: SqlitePool, spec: &ContainerSpec) -> Self {
        Self {
            pool,
            database: spec.database.clone(),
            container: spec.container.clone(),
            partition_key_path: spec.partition_key_path.clone(),
        }
    }

    /// Extract the document id and partition key value.
    fn keys<'d>(&self, document: &'d SensorDocument) -> Result<(&'d str, &'d str), StorageError> {
        let id = document.id().ok_or(StorageError::MissingId)?;
        let partition_key = partition_key_of(document, &self.partition_key_path).ok_or_else(|| {
            StorageError::MissingPartitionKey {
                path: self.partition_key_path.clone(),
            }
        })?;
        Ok((id, partition_key))
    }
}

/// Resolve a `/a/b` style path against the document's top-level object.
fn partition_key_of<'d>(document: &'d SensorDocument, path: &str) -> Option<&'d str> {
    let mut segments = path.trim_start_matches('/').split('/');
    let mut value = document.get(segments.next()?)?;
    for segment in segments {
        value = value.get(segment)?;
    }
    value.as_str()
}

fn new_etag() -> ETag {
    ETag::new(uuid::Uuid::new_v4().to_string())
}

impl DocumentStore for SqliteDocumentStore {
    async fn read(&self, id: &str, partition_key: &str) -> Result<ReadOutcome, SensorSyncError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_KEY)
            .bind(&self.database)
            .bind(&self.container)
            .bind(partition_key)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(match row {
            Some(Wrapper(stored)) => ReadOutcome::Found(stored),
            None => ReadOutcome::NotFound,
        })
    }

    async fn replace(
        &self,
        document: SensorDocument,
        etag: &ETag,
    ) -> Result<ETag, SensorSyncError> {
        let (id, partition_key) = self.keys(&document)?;
        let body = serde_json::to_string(&document).map_err(StorageError::from)?;
        let new_etag = new_etag();

        let result = sqlx::query(REPLACE_IF_MATCH)
            .bind(&body)
            .bind(new_etag.as_str())
            .bind(&self.database)
            .bind(&self.container)
            .bind(partition_key)
            .bind(id)
            .bind(etag.as_str())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        if result.rows_affected() == 0 {
            return Err(ConflictError::ETagMismatch { id: id.to_string() }.into());
        }
        Ok(new_etag)
    }

    async fn create(&self, document: SensorDocument) -> Result<ETag, SensorSyncError> {
        let (id, partition_key) = self.keys(&document)?;
        let body = serde_json::to_string(&document).map_err(StorageError::from)?;
        let etag = new_etag();

        let result = sqlx::query(INSERT)
            .bind(&self.database)
            .bind(&self.container)
            .bind(partition_key)
            .bind(id)
            .bind(&body)
            .bind(etag.as_str())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        if result.rows_affected() == 0 {
            return Err(ConflictError::AlreadyExists { id: id.to_string() }.into());
        }
        Ok(etag)
    }
}
