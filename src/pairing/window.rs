//! Timestamp parsing, day buckets and the pairing time window.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Default distance allowed between an Instagram post and its TikTok repost
pub const DEFAULT_WINDOW_HOURS: u32 = 24;

/// Day bucket for records without a usable date
pub const UNKNOWN_DATE_KEY: &str = "unknown";

/// Posting time as it appears in exported records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTimestamp {
    /// Milliseconds since the Unix epoch
    Millis(i64),
    /// Fractional milliseconds since the Unix epoch
    FractionalMillis(f64),
    /// Textual date or date-time
    Text(String),
    /// Any other JSON shape; never parses
    Other(serde_json::Value),
}

impl From<&str> for RawTimestamp {
    fn from(value: &str) -> Self {
        RawTimestamp::Text(value.to_string())
    }
}

impl From<i64> for RawTimestamp {
    fn from(value: i64) -> Self {
        RawTimestamp::Millis(value)
    }
}

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a raw timestamp into a UTC instant
///
/// Accepts RFC 3339, naive date-times (read as UTC), bare dates (UTC
/// midnight) and epoch milliseconds. Returns `None` for anything else.
pub fn parse_timestamp(raw: &RawTimestamp) -> Option<DateTime<Utc>> {
    match raw {
        RawTimestamp::Millis(ms) => Utc.timestamp_millis_opt(*ms).single(),
        RawTimestamp::FractionalMillis(ms) if ms.is_finite() => {
            Utc.timestamp_millis_opt(ms.trunc() as i64).single()
        }
        RawTimestamp::FractionalMillis(_) => None,
        RawTimestamp::Text(text) => parse_timestamp_str(text),
        RawTimestamp::Other(_) => None,
    }
}

/// Parse a textual timestamp, see [`parse_timestamp`]
pub fn parse_timestamp_str(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Calendar-day bucket key (`YYYY-MM-DD`, UTC) or `"unknown"`
pub fn date_key(date: Option<DateTime<Utc>>) -> String {
    match date {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => UNKNOWN_DATE_KEY.to_string(),
    }
}

/// Day bucket key for a textual timestamp
pub fn date_key_str(text: &str) -> String {
    date_key(parse_timestamp_str(text))
}

/// Whether two posting times lie within `hours` of each other
///
/// Missing dates are never within any window.
pub fn is_within_window(
    first: Option<DateTime<Utc>>,
    second: Option<DateTime<Utc>>,
    hours: u32,
) -> bool {
    match (first, second) {
        (Some(a), Some(b)) => abs_millis_between(a, b) <= i64::from(hours) * 3_600_000,
        _ => false,
    }
}

/// Absolute distance between two instants in milliseconds
pub fn abs_millis_between(a: DateTime<Utc>, b: DateTime<Utc>) -> i64 {
    (a - b).num_milliseconds().abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn at(text: &str) -> DateTime<Utc> {
        parse_timestamp_str(text).unwrap()
    }

    #[test]
    fn test_parse_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();

        assert_eq!(at("2024-03-01T12:30:00Z"), expected);
        assert_eq!(at("2024-03-01T14:30:00+02:00"), expected);
        assert_eq!(at("2024-03-01T12:30:00.000"), expected);
        assert_eq!(at("2024-03-01 12:30:00"), expected);
        assert_eq!(at("2024-03-01 12:30"), expected);
        assert_eq!(at("2024-03-01"), Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
        assert_eq!(
            parse_timestamp(&RawTimestamp::Millis(expected.timestamp_millis())),
            Some(expected)
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_timestamp_str(""), None);
        assert_eq!(parse_timestamp_str("   "), None);
        assert_eq!(parse_timestamp_str("yesterday"), None);
        assert_eq!(parse_timestamp_str("2024-13-45"), None);
        assert_eq!(parse_timestamp(&RawTimestamp::Millis(i64::MAX)), None);
    }

    #[test]
    fn test_parse_other_shapes() {
        let raw: RawTimestamp = serde_json::from_str("1709294400000.0").unwrap();
        assert_eq!(raw, RawTimestamp::FractionalMillis(1709294400000.0));
        assert_eq!(parse_timestamp(&raw), Some(at("2024-03-01T12:00:00Z")));

        let raw: RawTimestamp = serde_json::from_str(r#"{"seconds": 1709294400}"#).unwrap();
        assert!(matches!(raw, RawTimestamp::Other(_)));
        assert_eq!(parse_timestamp(&raw), None);

        let raw: RawTimestamp = serde_json::from_str("true").unwrap();
        assert_eq!(parse_timestamp(&raw), None);
        assert_eq!(parse_timestamp(&RawTimestamp::FractionalMillis(1e300)), None);
    }

    #[test]
    fn test_date_key() {
        assert_eq!(date_key(Some(at("2024-03-01T23:59:59Z"))), "2024-03-01");
        // Offset times bucket by their UTC day
        assert_eq!(date_key(Some(at("2024-03-01T23:30:00-02:00"))), "2024-03-02");
        assert_eq!(date_key(None), "unknown");
        assert_eq!(date_key_str("not a date"), "unknown");
        assert_eq!(date_key_str("2024-01-05T08:00:00Z"), "2024-01-05");
    }

    #[test]
    fn test_window_boundaries() {
        let base = at("2024-03-01T00:00:00Z");

        assert!(is_within_window(Some(base), Some(base), 24));
        assert!(is_within_window(Some(base), Some(base + Duration::hours(24)), 24));
        assert!(is_within_window(Some(base + Duration::hours(24)), Some(base), 24));
        assert!(!is_within_window(Some(base), Some(base + Duration::hours(24) + Duration::milliseconds(1)), 24));
        assert!(!is_within_window(Some(base), Some(base + Duration::hours(40)), 24));
        assert!(is_within_window(Some(base), Some(base + Duration::hours(40)), 48));
    }

    #[test]
    fn test_window_missing_dates() {
        let base = at("2024-03-01T00:00:00Z");
        assert!(!is_within_window(None, Some(base), 24));
        assert!(!is_within_window(Some(base), None, 24));
        assert!(!is_within_window(None, None, 24));
    }
}
