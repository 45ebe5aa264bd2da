//! HTTP error response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use sensorsync_domain::error::{SensorSyncError, ValidationError};

/// Maps [`SensorSyncError`] to a plain-text HTTP response.
///
/// Validation failures become `400` with the validation message as body;
/// everything else becomes `500 Server error: <message>`.
#[derive(Debug)]
pub struct ApiError(SensorSyncError);

impl From<SensorSyncError> for ApiError {
    fn from(err: SensorSyncError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self.0 {
            SensorSyncError::Validation(err) => {
                tracing::debug!(error = %err, "rejected payload");
                (StatusCode::BAD_REQUEST, err.to_string()).into_response()
            }
            err @ (SensorSyncError::Conflict(_) | SensorSyncError::Storage(_)) => {
                tracing::error!(error = %err, "unhandled error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Server error: {err}"),
                )
                    .into_response()
            }
        }
    }
}
