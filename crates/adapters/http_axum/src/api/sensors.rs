//! Batch ingestion handler for sensor readings.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use sensorsync_app::ports::DocumentStore;
use sensorsync_domain::batch::Batch;

use crate::error::ApiError;
use crate::state::AppState;

/// Body returned once every reading of a batch has been applied.
pub const PROCESSED_MESSAGE: &str = "Sensor data processed";

/// Possible responses from the update endpoint.
pub enum UpdateResponse {
    Processed,
}

impl IntoResponse for UpdateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Processed => (StatusCode::OK, PROCESSED_MESSAGE).into_response(),
        }
    }
}

/// `POST /update-sensors`
///
/// The body is read as raw bytes; decoding and shape checks happen in
/// [`Batch::from_slice`].
pub async fn update<S>(
    State(state): State<AppState<S>>,
    body: Bytes,
) -> Result<UpdateResponse, ApiError>
where
    S: DocumentStore + Send + Sync + 'static,
{
    let batch = Batch::from_slice(&body)?;
    let report = state.ingest_service.upsert_batch(batch).await?;
    tracing::info!(
        created = report.created,
        updated = report.updated,
        skipped = report.skipped,
        "sensor batch processed"
    );
    Ok(UpdateResponse::Processed)
}
