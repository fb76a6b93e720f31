use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::zone::DisplayZone;

/// One attendance entry as pushed by the feed. Read-only, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub course: String,
    pub name: String,
    pub section: String,
    pub timings: String,
    pub timestamp: String,
}

impl AttendanceRecord {
    /// Calendar date of `timestamp` in `zone`, or `None` when the timestamp
    /// cannot be parsed.
    pub fn local_date(&self, zone: &DisplayZone) -> Option<NaiveDate> {
        parse_timestamp(&self.timestamp, zone)
    }
}

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO-8601 style timestamp into a calendar date in `zone`.
///
/// Values with an explicit offset (or `Z`) are converted. Naive date-times are
/// taken as already local. A bare date is UTC midnight, converted like the rest.
pub fn parse_timestamp(raw: &str, zone: &DisplayZone) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(zone.date_of(&dt));
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(zone.date_of(&dt));
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.date());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        let midnight = Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?);
        return Some(zone.date_of(&midnight));
    }
    None
}

/// Why a snapshot could not be turned into a record list.
#[derive(Debug)]
pub enum SnapshotError {
    /// The collection itself was not a keyed mapping.
    Shape(&'static str),
    /// One entry did not have the record shape.
    Record { key: String, source: serde_json::Error },
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::Shape(kind) => {
                write!(f, "expected a keyed collection of records, got {kind}")
            }
            SnapshotError::Record { key, source } => {
                write!(f, "record '{key}' is malformed: {source}")
            }
        }
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SnapshotError::Record { source, .. } => Some(source),
            SnapshotError::Shape(_) => None,
        }
    }
}

/// Decode a full collection snapshot, discarding the opaque keys.
///
/// `null` is an empty collection: it replaces whatever was shown before and
/// clears an error state, rather than being skipped as "no data yet".
/// Array-shaped collections (sequential keys) are accepted with their holes
/// skipped.
pub fn decode_snapshot(value: Value) -> Result<Vec<AttendanceRecord>, SnapshotError> {
    let entries: Vec<(String, Value)> = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Object(map) => map.into_iter().collect(),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .filter(|(_, v)| !v.is_null())
            .map(|(i, v)| (i.to_string(), v))
            .collect(),
        Value::Bool(_) => return Err(SnapshotError::Shape("a boolean")),
        Value::Number(_) => return Err(SnapshotError::Shape("a number")),
        Value::String(_) => return Err(SnapshotError::Shape("a string")),
    };

    entries
        .into_iter()
        .map(|(key, v)| {
            serde_json::from_value::<AttendanceRecord>(v)
                .map_err(|source| SnapshotError::Record { key, source })
        })
        .collect()
}
