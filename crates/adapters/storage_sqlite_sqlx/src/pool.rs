//! `SQLite` connection pool setup, migration runner and container provisioning.

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;

use crate::document_store::SqliteDocumentStore;
use crate::error::StorageError;

/// Configuration for the `SQLite` storage adapter.
pub struct Config {
    /// `SQLite` connection URL (e.g. `sqlite:sensorsync.db` or `sqlite::memory:`).
    pub database_url: String,
}

impl Config {
    /// Build a [`Database`] from this configuration.
    ///
    /// Creates the connection pool, creates the database file if missing,
    /// and runs all pending migrations.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the connection or migrations fail.
    pub async fn build(self) -> Result<Database, StorageError> {
        Database::initialize(&self.database_url).await
    }
}

/// Which container to provision and how it is partitioned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerSpec {
    /// Logical database name (e.g. `SensorDB`).
    pub database: String,
    /// Container name inside the database (e.g. `Readings`).
    pub container: String,
    /// JSON path of the partition key inside each document (e.g. `/sensorId`).
    pub partition_key_path: String,
}

const INSERT_DATABASE: &str = "INSERT INTO databases (name) VALUES (?) ON CONFLICT (name) DO NOTHING";

const INSERT_CONTAINER: &str = r"
    INSERT INTO containers (database, name, partition_key_path)
    VALUES (?, ?, ?)
    ON CONFLICT (database, name) DO NOTHING
";

const SELECT_PARTITION_KEY_PATH: &str =
    "SELECT partition_key_path FROM containers WHERE database = ? AND name = ?";

/// Holds the `SQLite` connection pool and provides access to it.
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to the database and run migrations.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the connection or migrations fail.
    async fn initialize(database_url: &str) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        let pool = SqlitePool::connect_with(options).await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Borrow the underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create the database and container if they do not exist yet and return
    /// a store bound to the container.
    ///
    /// Safe to call on every startup. An existing container keeps its
    /// partition key path; asking for a different one is an error.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::PartitionKeyMismatch`] when the container
    /// exists with another partition key path, or a database error.
    pub async fn provision(&self, spec: &ContainerSpec) -> Result<SqliteDocumentStore, StorageError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(INSERT_DATABASE)
            .bind(&spec.database)
            .execute(&mut *tx)
            .await?;

        sqlx::query(INSERT_CONTAINER)
            .bind(&spec.database)
            .bind(&spec.container)
            .bind(&spec.partition_key_path)
            .execute(&mut *tx)
            .await?;

        let (existing,): (String,) = sqlx::query_as(SELECT_PARTITION_KEY_PATH)
            .bind(&spec.database)
            .bind(&spec.container)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        if existing != spec.partition_key_path {
            return Err(StorageError::PartitionKeyMismatch {
                database: spec.database.clone(),
                container: spec.container.clone(),
                existing,
                requested: spec.partition_key_path.clone(),
            });
        }

        tracing::info!(
            database = %spec.database,
            container = %spec.container,
            partition_key_path = %spec.partition_key_path,
            "container provisioned"
        );

        Ok(SqliteDocumentStore::new(self.pool.clone(), spec))
    }
}
