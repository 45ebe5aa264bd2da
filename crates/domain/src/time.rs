//! Time and timestamp helpers.

use chrono::{DateTime, SecondsFormat, Utc};

/// UTC timestamp used for `createdAt` and `updatedAt`.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Render a timestamp the way documents store it, e.g.
/// `2024-05-01T12:30:00.123456+00:00`.
///
/// The fraction is omitted when the microsecond part is zero
/// (`2024-05-01T12:30:00+00:00`). Sub-microsecond digits are truncated.
#[must_use]
pub fn to_iso8601(ts: Timestamp) -> String {
    let format = if ts.timestamp_subsec_micros() == 0 {
        SecondsFormat::Secs
    } else {
        SecondsFormat::Micros
    };
    ts.to_rfc3339_opts(format, false)
}

/// Parse a stored ISO-8601 timestamp back into UTC.
#[must_use]
pub fn parse_iso8601(value: &str) -> Option<Timestamp> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}
