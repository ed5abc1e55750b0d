//! UTC time helpers.
//!
//! Timestamps are stored as RFC 3339 strings and compared as
//! `chrono::DateTime<Utc>`. The OAuth state token works in whole unix
//! seconds, so both representations live here.

use chrono::{DateTime, SecondsFormat, Utc};

/// Current UTC time.
#[must_use]
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Current unix time in whole seconds.
#[must_use]
pub fn now_unix_seconds() -> i64 {
    Utc::now().timestamp()
}

/// Render a timestamp as RFC 3339 with millisecond precision, UTC offset.
///
/// Fixed width keeps lexicographic order equal to chronological order,
/// which the store relies on for newest-first queries.
#[must_use]
pub fn to_rfc3339(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse an RFC 3339 timestamp back into UTC.
///
/// Returns `None` on malformed input; callers treat that the same as an
/// absent timestamp.
#[must_use]
pub fn from_rfc3339(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rfc3339_round_trip() {
        let now = now_utc();
        let rendered = to_rfc3339(now);
        let parsed = from_rfc3339(&rendered).unwrap();
        assert_eq!(parsed.timestamp(), now.timestamp());
    }

    #[test]
    fn malformed_timestamp_is_none() {
        assert!(from_rfc3339("not-a-time").is_none());
        assert!(from_rfc3339("").is_none());
    }

    #[test]
    fn unix_seconds_tracks_utc() {
        let secs = now_unix_seconds();
        let utc = now_utc().timestamp();
        assert!((utc - secs).abs() <= 1);
    }
}
