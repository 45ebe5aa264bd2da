//! HTTP API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod sensors;

use axum::Router;
use axum::routing::post;

use sensorsync_app::ports::DocumentStore;

use crate::state::AppState;

/// Build the API sub-router.
pub fn routes<S>() -> Router<AppState<S>>
where
    S: DocumentStore + Send + Sync + 'static,
{
    Router::new().route("/update-sensors", post(sensors::update::<S>))
}
