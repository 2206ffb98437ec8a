//! Time utility functions

use chrono::{DateTime, TimeZone, Utc};

/// Convert nanoseconds since Unix epoch to `DateTime<Utc>`, `None` when out of range
pub fn nanos_to_datetime(nanos: u64) -> Option<DateTime<Utc>> {
    let secs = (nanos / 1_000_000_000) as i64;
    let nsecs = (nanos % 1_000_000_000) as u32;
    Utc.timestamp_opt(secs, nsecs).single()
}

/// Parse a nanosecond timestamp string (producers send large integers as strings)
pub fn parse_nanos(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<u64>() {
        Ok(nanos) => nanos_to_datetime(nanos),
        Err(e) => {
            tracing::trace!(value = trimmed, error = %e, "Invalid nanosecond timestamp");
            None
        }
    }
}

/// Milliseconds between two timestamps, `None` when the end precedes the start
pub fn duration_ms(start: DateTime<Utc>, end: DateTime<Utc>) -> Option<i64> {
    if end < start {
        return None;
    }
    Some((end - start).num_milliseconds())
}
