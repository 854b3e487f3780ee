//! Best-effort timestamp parsing.
//!
//! A timestamp that matches none of its format's layouts is kept as the
//! original text. Parsing never fails a line.

use std::fmt;
use chrono::{DateTime, FixedOffset, NaiveDateTime, Timelike};
use serde::{Serialize, Serializer};

/// Layout used by both request-style formats, e.g. `10/Oct/2000:13:55:36 -0700`.
pub const REQUEST_LAYOUT: &str = "%d/%b/%Y:%H:%M:%S %z";

/// Application layout without the fractional part, e.g. `2024-01-01 12:00:00`.
pub const APP_LAYOUT: &str = "%Y-%m-%d %H:%M:%S";

/// Maximum fraction digits accepted after the comma (microsecond precision).
const MAX_FRACTION_DIGITS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointInTime {
    /// Timestamp carrying its own UTC offset
    Offset(DateTime<FixedOffset>),
    /// Wall-clock timestamp with no zone information
    Naive(NaiveDateTime),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Timestamp {
    Parsed(PointInTime),
    /// Original text, kept because no layout matched
    Unparsed(String),
}

impl Timestamp {
    pub fn is_parsed(&self) -> bool {
        matches!(self, Timestamp::Parsed(_))
    }

    pub fn as_offset(&self) -> Option<DateTime<FixedOffset>> {
        match self {
            Timestamp::Parsed(PointInTime::Offset(dt)) => Some(*dt),
            _ => None,
        }
    }

    pub fn as_naive(&self) -> Option<NaiveDateTime> {
        match self {
            Timestamp::Parsed(PointInTime::Naive(dt)) => Some(*dt),
            _ => None,
        }
    }
}

/// ISO-8601 for parsed values; the untouched text otherwise.
impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timestamp::Parsed(PointInTime::Offset(dt)) => f.write_str(&dt.to_rfc3339()),
            Timestamp::Parsed(PointInTime::Naive(dt)) => {
                if dt.nanosecond() == 0 {
                    write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S"))
                } else {
                    write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.6f"))
                }
            }
            Timestamp::Unparsed(raw) => f.write_str(raw),
        }
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Parse an access-log timestamp (`%d/%b/%Y:%H:%M:%S %z`).
pub fn parse_request_timestamp(text: &str) -> Timestamp {
    match DateTime::parse_from_str(text, REQUEST_LAYOUT) {
        Ok(dt) => Timestamp::Parsed(PointInTime::Offset(dt)),
        Err(_) => Timestamp::Unparsed(text.to_string()),
    }
}

/// Parse an application timestamp.
///
/// Tries `YYYY-MM-DD HH:MM:SS,ffffff` first (one to six fraction digits, read
/// as a decimal fraction of a second), then the same layout without the
/// fraction.
pub fn parse_app_timestamp(text: &str) -> Timestamp {
    if let Some(dt) = parse_with_fraction(text) {
        return Timestamp::Parsed(PointInTime::Naive(dt));
    }
    match NaiveDateTime::parse_from_str(text, APP_LAYOUT) {
        Ok(dt) => Timestamp::Parsed(PointInTime::Naive(dt)),
        Err(_) => Timestamp::Unparsed(text.to_string()),
    }
}

fn parse_with_fraction(text: &str) -> Option<NaiveDateTime> {
    let (whole, fraction) = text.rsplit_once(',')?;
    if fraction.is_empty()
        || fraction.len() > MAX_FRACTION_DIGITS
        || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }

    let base = NaiveDateTime::parse_from_str(whole, APP_LAYOUT).ok()?;
    // "5" is half a second, "123" is 123ms
    let scale = 10u32.pow((MAX_FRACTION_DIGITS - fraction.len()) as u32);
    let micros = fraction.parse::<u32>().ok()? * scale;
    base.with_nanosecond(micros * 1_000)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate};

    #[test]
    fn test_request_timestamp_keeps_offset() {
        let ts = parse_request_timestamp("10/Oct/2000:13:55:36 -0700");
        let dt = ts.as_offset().expect("should parse");
        assert_eq!(dt.offset().local_minus_utc(), -7 * 3600);
        assert_eq!(dt.year(), 2000);
        assert_eq!(ts.to_string(), "2000-10-10T13:55:36-07:00");
    }

    #[test]
    fn test_request_timestamp_unparseable_is_verbatim() {
        let ts = parse_request_timestamp("yesterday at noon");
        assert_eq!(ts, Timestamp::Unparsed("yesterday at noon".to_string()));
        assert_eq!(ts.to_string(), "yesterday at noon");
    }

    #[test]
    fn test_app_timestamp_with_millis() {
        let ts = parse_app_timestamp("2024-03-05 08:09:10,123");
        let expected = NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_micro_opt(8, 9, 10, 123_000)
            .unwrap();
        assert_eq!(ts.as_naive(), Some(expected));
        assert_eq!(ts.to_string(), "2024-03-05T08:09:10.123000");
    }

    #[test]
    fn test_app_timestamp_falls_back_to_whole_seconds() {
        let ts = parse_app_timestamp("2024-03-05 08:09:10");
        assert!(ts.is_parsed());
        assert_eq!(ts.to_string(), "2024-03-05T08:09:10");
    }

    #[test]
    fn test_app_timestamp_rejects_long_fraction() {
        let ts = parse_app_timestamp("2024-03-05 08:09:10,1234567");
        assert_eq!(ts, Timestamp::Unparsed("2024-03-05 08:09:10,1234567".to_string()));
    }

    #[test]
    fn test_app_timestamp_garbage_is_verbatim() {
        let ts = parse_app_timestamp("05/03/2024 8am");
        assert!(!ts.is_parsed());
        assert_eq!(ts.to_string(), "05/03/2024 8am");
    }

    #[test]
    fn test_timestamp_serializes_as_string() {
        let ts = parse_request_timestamp("01/Feb/2026:12:00:00 +0000");
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, r#""2026-02-01T12:00:00+00:00""#);
    }
}
