// SPDX-License-Identifier: PMPL-1.0-or-later

//! ISO-8601 timestamp parsing and formatting.
//!
//! Encoding renders timezone-aware instants as ISO-8601 with offset
//! (`2022-08-13T22:45:03+00:00`) and bare dates as `YYYY-MM-DD`. Parsing is
//! deliberately tolerant on input: a trailing `Z` is read as `+00:00`,
//! naive datetimes (with `T` or space separators) and bare dates are read
//! as UTC.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};

/// `strftime` pattern for bare dates.
pub const FORMAT_ISO_DATE: &str = "%Y-%m-%d";
/// `strftime` pattern for bare times.
pub const FORMAT_ISO_TIME: &str = "%H:%M:%S";
/// `strftime` pattern for naive datetimes with a space separator.
pub const FORMAT_ISO_DATETIME: &str = "%Y-%m-%d %H:%M:%S";

/// Naive datetime patterns accepted by [`parse_iso8601`], tried in order.
const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// The current UTC instant.
pub fn utc_now() -> DateTime<Utc> {
    Utc::now()
}

/// The current UTC timestamp in whole seconds since the epoch.
pub fn unix_timestamp() -> i64 {
    Utc::now().timestamp()
}

/// Render an instant as ISO-8601 with explicit offset.
pub fn format_iso8601(dt: &DateTime<FixedOffset>) -> String {
    dt.to_rfc3339()
}

/// Render a bare date as `YYYY-MM-DD`.
pub fn format_date(d: &NaiveDate) -> String {
    d.format(FORMAT_ISO_DATE).to_string()
}

/// Attempt to parse `input` as an ISO-8601 date or datetime.
///
/// Accepts, in order of preference: RFC 3339 with offset (a trailing `Z`
/// counts as `+00:00`), a naive datetime assumed to be UTC, and a bare date
/// read as midnight UTC. Returns `None` when `input` is not a full-string
/// match for any of these shapes, so ordinary strings are never promoted by
/// accident.
pub fn parse_iso8601(input: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt);
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Some(naive.and_utc().fixed_offset());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, FORMAT_ISO_DATE) {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc().fixed_offset());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let dt = parse_iso8601("2022-08-13T22:45:03+00:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2022, 8, 13, 22, 45, 3).unwrap());
    }

    #[test]
    fn test_parse_trailing_z() {
        let dt = parse_iso8601("2022-08-13T22:45:03Z").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2022, 8, 13, 22, 45, 3).unwrap());
    }

    #[test]
    fn test_parse_naive_datetime_as_utc() {
        let dt = parse_iso8601("2022-08-13 22:45:03").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2022, 8, 13, 22, 45, 3).unwrap());
    }

    #[test]
    fn test_parse_bare_date_as_midnight_utc() {
        let dt = parse_iso8601("2022-08-13").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2022, 8, 13, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_ordinary_strings_are_not_timestamps() {
        for input in ["hello", "", "1234", "2022-13-45", "12.5", "2022-08-13x"] {
            assert!(parse_iso8601(input).is_none(), "{input:?} must not parse");
        }
    }

    #[test]
    fn test_format_round_trip() {
        let dt = Utc.with_ymd_and_hms(2022, 8, 13, 22, 45, 3).unwrap().fixed_offset();
        let rendered = format_iso8601(&dt);
        assert_eq!(rendered, "2022-08-13T22:45:03+00:00");
        assert_eq!(parse_iso8601(&rendered).unwrap(), dt);
    }
}
