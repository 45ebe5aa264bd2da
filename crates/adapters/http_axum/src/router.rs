//! Axum router assembly.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use sensorsync_app::ports::DocumentStore;

use crate::state::AppState;

/// Largest request body accepted by [`build`], in bytes (100 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 100 * 1024 * 1024;

/// Build the top-level axum [`Router`] with [`DEFAULT_MAX_BODY_BYTES`].
pub fn build<S>(state: AppState<S>) -> Router
where
    S: DocumentStore + Send + Sync + 'static,
{
    build_with_body_limit(state, DEFAULT_MAX_BODY_BYTES)
}

/// Build the top-level axum [`Router`].
///
/// Serves the ingestion endpoint and a health check. Request bodies larger
/// than `max_body_bytes` are refused with `413 Payload Too Large` before any
/// parsing. Includes a [`TraceLayer`] that logs each HTTP request/response
/// at the `DEBUG` level using the `tracing` ecosystem.
pub fn build_with_body_limit<S>(state: AppState<S>, max_body_bytes: usize) -> Router
where
    S: DocumentStore + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .merge(crate::api::routes())
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
