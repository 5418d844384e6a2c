//! Lenient timestamp parsing for chat exports.
//!
//! Exports disagree on the shape of a timestamp. We accept the ISO-8601
//! family that chat preprocessors emit:
//!
//! ```text
//! 2024-05-01                      date only (midnight)
//! 2024-05-01 21:03                space or T, no seconds
//! 2024-05-01T21:03:07.250         fractional seconds
//! 2024-05-01T12:03:07Z            trailing Z
//! 2024-05-01 21:03:07+09:00       explicit offset
//! ```
//!
//! Offset-aware values are normalised to UTC so they order correctly
//! against each other. Anything else yields `None`; callers treat that as
//! "earliest" rather than dropping the message.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const AWARE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a chat timestamp.
///
/// ```rust
/// use chatmerge::parse_timestamp;
///
/// assert!(parse_timestamp("2024-05-01 21:03:00").is_some());
/// assert!(parse_timestamp("2024-05-01T12:03:00Z").is_some());
/// assert!(parse_timestamp("어제 저녁").is_none());
/// ```
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let owned;
    let text = match raw.strip_suffix('Z') {
        Some(head) => {
            owned = format!("{head}+00:00");
            owned.as_str()
        }
        None => raw,
    };

    for fmt in AWARE_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(text, fmt) {
            return Some(dt.naive_utc());
        }
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Seconds from `prev` to `next`, or `None` when either is unknown.
#[must_use]
pub fn elapsed_seconds(prev: Option<NaiveDateTime>, next: Option<NaiveDateTime>) -> Option<f64> {
    match (prev, next) {
        (Some(prev), Some(next)) => Some((next - prev).num_milliseconds() as f64 / 1000.0),
        _ => None,
    }
}
