//! Ingestion batches — the validated shape of an update request.

use std::fmt;

use serde_json::Value;

use crate::document::IncomingReading;
use crate::error::ValidationError;

/// Smallest accepted batch.
pub const MIN_BATCH_SIZE: usize = 1;
/// Largest accepted batch.
pub const MAX_BATCH_SIZE: usize = 100;

/// Why a batch element was left out of processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NotAnObject,
    MissingSensorId,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnObject => f.write_str("element is not an object"),
            Self::MissingSensorId => f.write_str("element has no usable sensorId"),
        }
    }
}

/// One element of a batch, in submission order.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchItem {
    Reading(IncomingReading),
    Skipped { index: usize, reason: SkipReason },
}

/// A batch whose overall shape has been validated.
///
/// Individual elements may still be [`BatchItem::Skipped`]; skipping is
/// not an error.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    items: Vec<BatchItem>,
}

impl Batch {
    /// Decode and validate a raw request body.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MalformedJson`] when the body is not JSON,
    /// otherwise whatever [`Batch::from_value`] returns.
    pub fn from_slice(body: &[u8]) -> Result<Self, ValidationError> {
        let value: Value = serde_json::from_slice(body).map_err(ValidationError::MalformedJson)?;
        Self::from_value(value)
    }

    /// Validate an already-decoded JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NotAList`] when `value` is not an array and
    /// [`ValidationError::BatchSize`] when its length is outside
    /// [`MIN_BATCH_SIZE`]..=[`MAX_BATCH_SIZE`].
    pub fn from_value(value: Value) -> Result<Self, ValidationError> {
        let Value::Array(elements) = value else {
            return Err(ValidationError::NotAList);
        };
        if !(MIN_BATCH_SIZE..=MAX_BATCH_SIZE).contains(&elements.len()) {
            return Err(ValidationError::BatchSize {
                len: elements.len(),
            });
        }

        let items = elements
            .into_iter()
            .enumerate()
            .map(|(index, element)| match element {
                Value::Object(fields) => IncomingReading::from_object(fields).map_or(
                    BatchItem::Skipped {
                        index,
                        reason: SkipReason::MissingSensorId,
                    },
                    BatchItem::Reading,
                ),
                _ => BatchItem::Skipped {
                    index,
                    reason: SkipReason::NotAnObject,
                },
            })
            .collect();

        Ok(Self { items })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn items(&self) -> &[BatchItem] {
        &self.items
    }
}

impl IntoIterator for Batch {
    type Item = BatchItem;
    type IntoIter = std::vec::IntoIter<BatchItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
