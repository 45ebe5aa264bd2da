//! Sensor documents and the merge-or-create policy.
//!
//! A [`SensorDocument`] is an open JSON object: besides the system-managed
//! keys (`id`, `sensorId`, `createdAt`, `updatedAt`) it carries whatever
//! fields the sensors report. An [`IncomingReading`] is one element of a
//! batch that passed shape validation.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::sensor::SensorId;
use crate::time::{Timestamp, parse_iso8601, to_iso8601};

/// Key holding the sensor identifier in incoming items and documents.
pub const SENSOR_ID_KEY: &str = "sensorId";
/// Key holding the store's document identifier.
pub const ID_KEY: &str = "id";
/// Key holding the creation timestamp.
pub const CREATED_AT_KEY: &str = "createdAt";
/// Key holding the last-write timestamp.
pub const UPDATED_AT_KEY: &str = "updatedAt";

/// Partition key path used when provisioning the readings container.
pub const PARTITION_KEY_PATH: &str = "/sensorId";

/// Keys owned by the system that clients cannot overwrite through a merge.
const SYSTEM_KEYS: [&str; 3] = [ID_KEY, CREATED_AT_KEY, UPDATED_AT_KEY];

/// One validated element of an ingestion batch.
#[derive(Debug, Clone, PartialEq)]
pub struct IncomingReading {
    sensor_id: SensorId,
    fields: Map<String, Value>,
}

impl IncomingReading {
    /// Build a reading from a raw JSON object.
    ///
    /// Returns `None` when the object has no usable `sensorId`.
    #[must_use]
    pub fn from_object(fields: Map<String, Value>) -> Option<Self> {
        let sensor_id = fields.get(SENSOR_ID_KEY).and_then(SensorId::from_value)?;
        Some(Self { sensor_id, fields })
    }

    #[must_use]
    pub fn sensor_id(&self) -> &SensorId {
        &self.sensor_id
    }
}

/// The stored record for one sensor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SensorDocument(Map<String, Value>);

impl SensorDocument {
    /// Create a brand-new document from an incoming reading.
    ///
    /// The reading's fields are taken as-is, explicit nulls included. Only
    /// `id`, `createdAt` and `updatedAt` are (over)written.
    #[must_use]
    pub fn create(reading: &IncomingReading, at: Timestamp) -> Self {
        let mut fields = reading.fields.clone();
        let ts = Value::String(to_iso8601(at));
        fields.insert(
            ID_KEY.to_string(),
            Value::String(reading.sensor_id.as_str().to_string()),
        );
        fields.insert(CREATED_AT_KEY.to_string(), ts.clone());
        fields.insert(UPDATED_AT_KEY.to_string(), ts);
        Self(fields)
    }

    /// Fold an incoming reading into this document.
    ///
    /// Every non-null incoming field overwrites (or adds) the stored one;
    /// null or absent fields leave the stored value untouched. System keys
    /// are never taken from the reading. `updatedAt` is set to `at`.
    pub fn merge(&mut self, reading: &IncomingReading, at: Timestamp) {
        for (key, value) in &reading.fields {
            if value.is_null() || SYSTEM_KEYS.contains(&key.as_str()) {
                continue;
            }
            self.0.insert(key.clone(), value.clone());
        }
        self.0.insert(
            UPDATED_AT_KEY.to_string(),
            Value::String(to_iso8601(at)),
        );
    }

    /// Wrap a stored JSON object.
    #[must_use]
    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The store's document identifier, if present and a string.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.0.get(ID_KEY).and_then(Value::as_str)
    }

    #[must_use]
    pub fn sensor_id(&self) -> Option<&str> {
        self.0.get(SENSOR_ID_KEY).and_then(Value::as_str)
    }

    #[must_use]
    pub fn created_at(&self) -> Option<Timestamp> {
        self.timestamp(CREATED_AT_KEY)
    }

    #[must_use]
    pub fn updated_at(&self) -> Option<Timestamp> {
        self.timestamp(UPDATED_AT_KEY)
    }

    fn timestamp(&self, key: &str) -> Option<Timestamp> {
        self.0.get(key).and_then(Value::as_str).and_then(parse_iso8601)
    }
}
