//! Identifiers and scalar wrappers used across the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque server-assigned item identifier.
///
/// Ids are compared and echoed back verbatim; clients never interpret them.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KId(pub String);

impl KId {
    /// Creates a new id from a string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the id is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for KId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for KId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for KId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Item version from the server journal.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Watermark(pub i64);

/// UTC date and time as sent by the server, e.g. `20240131T120000+0000`.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UtcDateTime(pub String);

impl UtcDateTime {
    /// Creates a new value from a string.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the value as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// UTC time string used by alarms and free/busy queries.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UtcTime(pub String);

impl UtcTime {
    /// Creates a new value from a string.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the value as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Seconds since the Unix epoch.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DateTimeStamp(pub i64);

impl DateTimeStamp {
    /// Converts to a `chrono` timestamp, `None` if out of range.
    #[must_use]
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.0, 0)
    }
}

impl From<DateTime<Utc>> for DateTimeStamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt.timestamp())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_kid_transparent() {
        let id = KId::new("keriostorage://folder/x");
        assert_eq!(
            serde_json::to_string(&id).unwrap(),
            r#""keriostorage://folder/x""#
        );
        let back: KId = serde_json::from_str(r#""abc""#).unwrap();
        assert_eq!(back.as_str(), "abc");
    }

    #[test]
    fn test_watermark_transparent() {
        let w: Watermark = serde_json::from_str("1234567890123").unwrap();
        assert_eq!(w, Watermark(1_234_567_890_123));
    }

    #[test]
    fn test_timestamp_conversion() {
        let stamp = DateTimeStamp(86_400);
        let dt = stamp.to_datetime().unwrap();
        assert_eq!(dt.to_rfc3339(), "1970-01-02T00:00:00+00:00");
        assert_eq!(DateTimeStamp::from(dt), stamp);
    }
}
