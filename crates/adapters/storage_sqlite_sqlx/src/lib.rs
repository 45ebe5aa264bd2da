//! # sensorsync-adapter-storage-sqlite-sqlx
//!
//! `SQLite` document store using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the `DocumentStore` port defined in `sensorsync-app::ports`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Provision databases and containers once, at startup
//! - Map between domain documents and database rows
//!
//! ## Dependency rule
//! Depends on `sensorsync-app` (for port traits) and `sensorsync-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod document_store;
pub mod error;
pub mod pool;

pub use document_store::SqliteDocumentStore;
pub use error::StorageError;
pub use pool::{Config, ContainerSpec, Database};
