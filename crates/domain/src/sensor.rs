//! Sensor identifier newtype.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier of a sensor. Doubles as the document id and partition key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SensorId(String);

impl SensorId {
    /// Extract a sensor id from a JSON value.
    ///
    /// Only non-empty strings qualify; numbers, nulls and empty strings
    /// return `None`.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) if !s.is_empty() => Some(Self(s.clone())),
            _ => None,
        }
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SensorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn should_accept_non_empty_string() {
        let id = SensorId::from_value(&json!("greenhouse-1")).unwrap();
        assert_eq!(id.as_str(), "greenhouse-1");
        assert_eq!(id.to_string(), "greenhouse-1");
    }

    #[test]
    fn should_reject_empty_string() {
        assert!(SensorId::from_value(&json!("")).is_none());
    }

    #[test]
    fn should_reject_non_string_values() {
        assert!(SensorId::from_value(&json!(42)).is_none());
        assert!(SensorId::from_value(&Value::Null).is_none());
        assert!(SensorId::from_value(&json!({"id": "x"})).is_none());
    }
}
