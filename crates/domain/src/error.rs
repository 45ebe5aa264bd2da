//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`SensorSyncError`] via `#[from]` or an explicit `From` impl.

use crate::batch::{MAX_BATCH_SIZE, MIN_BATCH_SIZE};

/// Top-level error type shared by the application and its adapters.
#[derive(Debug, thiserror::Error)]
pub enum SensorSyncError {
    /// The request payload was rejected before touching the store.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A guarded write lost a race against another writer.
    #[error(transparent)]
    Conflict(#[from] ConflictError),

    /// The document store failed for an operational reason.
    #[error("storage error: {0}")]
    Storage(Box<dyn std::error::Error + Send + Sync>),
}

/// Payload shape violations.
///
/// The `Display` output of each variant is the exact message returned to
/// HTTP clients.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// The body could not be decoded as JSON.
    #[error("Invalid JSON format")]
    MalformedJson(#[source] serde_json::Error),

    /// The body is valid JSON but not an array.
    #[error(
        "Invalid payload: Must be a list of {min} to {max} items",
        min = MIN_BATCH_SIZE,
        max = MAX_BATCH_SIZE
    )]
    NotAList,

    /// The array is empty or larger than the accepted batch size.
    #[error(
        "Invalid payload: Must be a list of {min} to {max} items",
        min = MIN_BATCH_SIZE,
        max = MAX_BATCH_SIZE
    )]
    BatchSize { len: usize },
}

/// Optimistic-concurrency failures reported by the document store.
#[derive(Debug, thiserror::Error)]
pub enum ConflictError {
    /// The document changed (or disappeared) since it was read.
    #[error("document {id} was modified concurrently")]
    ETagMismatch { id: String },

    /// A document with the same id appeared before the create landed.
    #[error("document {id} already exists")]
    AlreadyExists { id: String },

    /// The write kept conflicting and the retry budget ran out.
    #[error("document {id} still conflicting after {attempts} attempts")]
    RetriesExhausted { id: String, attempts: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_render_client_message_for_malformed_json() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = SensorSyncError::from(ValidationError::MalformedJson(source));
        assert_eq!(err.to_string(), "Invalid JSON format");
    }

    #[test]
    fn should_render_same_message_for_every_batch_shape_error() {
        let expected = "Invalid payload: Must be a list of 1 to 100 items";
        assert_eq!(ValidationError::NotAList.to_string(), expected);
        assert_eq!(ValidationError::BatchSize { len: 0 }.to_string(), expected);
        assert_eq!(ValidationError::BatchSize { len: 101 }.to_string(), expected);
    }

    #[test]
    fn should_prefix_storage_errors() {
        let err = SensorSyncError::Storage("disk on fire".into());
        assert_eq!(err.to_string(), "storage error: disk on fire");
    }

    #[test]
    fn should_name_document_in_conflict_message() {
        let err: SensorSyncError = ConflictError::RetriesExhausted {
            id: "s1".to_string(),
            attempts: 3,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "document s1 still conflicting after 3 attempts"
        );
    }
}
