//! Shared application state for axum handlers.

use std::sync::Arc;

use sensorsync_app::ports::DocumentStore;
use sensorsync_app::services::ingest_service::IngestService;

/// Application state shared across all axum handlers.
///
/// Generic over the document store to avoid dynamic dispatch.
/// `Clone` is implemented manually so the store itself does not need to be
/// `Clone` — only the `Arc` wrapper is cloned.
pub struct AppState<S> {
    /// Batch ingestion use-case.
    pub ingest_service: Arc<IngestService<S>>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            ingest_service: Arc::clone(&self.ingest_service),
        }
    }
}

impl<S> AppState<S>
where
    S: DocumentStore + Send + Sync + 'static,
{
    /// Create a new application state from a service instance.
    pub fn new(ingest_service: IngestService<S>) -> Self {
        Self {
            ingest_service: Arc::new(ingest_service),
        }
    }
}
