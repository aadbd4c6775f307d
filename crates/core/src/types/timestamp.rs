//! Serde helpers for entry timestamps.
//!
//! Timestamps are written as RFC 3339 in UTC with millisecond precision
//! (`2026-10-17T08:30:00.000Z`); anything finer is truncated. Reading accepts:
//!
//! - RFC 3339 with any offset
//! - the numeric-offset form without a colon (`2026-10-17T08:30:00.250+0000`)
//! - a JSON integer of milliseconds since the Unix epoch
//!
//! Use with `#[serde(with = "crate::types::timestamp")]`.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer, de};

/// A timestamp as it may appear in a request body.
#[derive(Deserialize)]
#[serde(untagged)]
enum WireTimestamp {
    Text(String),
    EpochMillis(i64),
}

/// Fallback layout for offsets written as `+0000`.
const COMPACT_OFFSET_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

/// Render a timestamp in its wire form.
#[must_use]
pub fn format(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a timestamp from either accepted string layout.
///
/// # Errors
///
/// Returns `chrono::ParseError` if the input matches neither layout.
pub fn parse(input: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(input)
        .or_else(|_| DateTime::parse_from_str(input, COMPACT_OFFSET_FORMAT))
        .map(|parsed| parsed.with_timezone(&Utc))
}

/// Serialize a timestamp.
///
/// # Errors
///
/// Propagates serializer errors.
pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(value))
}

/// Deserialize a timestamp.
///
/// # Errors
///
/// Fails if the value is neither a string in an accepted layout nor an
/// in-range epoch millisecond count.
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    match WireTimestamp::deserialize(deserializer)? {
        WireTimestamp::Text(raw) => {
            parse(&raw).map_err(|e| de::Error::custom(format!("invalid timestamp '{raw}': {e}")))
        }
        WireTimestamp::EpochMillis(millis) => DateTime::from_timestamp_millis(millis)
            .ok_or_else(|| de::Error::custom(format!("epoch millis {millis} out of range"))),
    }
}
