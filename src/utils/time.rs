//! Time utilities: UTC timestamps <-> local datetimes, ISO-8601 parsing.
//!
//! Stored timestamps are always UTC seconds since the epoch. Naive values
//! (no offset) are interpreted in the local system timezone.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Convert an offset-aware datetime to a UTC timestamp.
pub fn to_ts<Tz: TimeZone>(dt: &DateTime<Tz>) -> i64 {
    dt.timestamp()
}

/// Convert a naive local datetime to a UTC timestamp.
///
/// On a DST fold the earlier instant wins; times skipped by a DST gap are
/// rejected.
pub fn naive_to_ts(dt: NaiveDateTime) -> AppResult<i64> {
    Local
        .from_local_datetime(&dt)
        .earliest()
        .map(|local| local.timestamp())
        .ok_or_else(|| AppError::InvalidDate(format!("{dt} does not exist in the local timezone")))
}

/// Convert a UTC timestamp to a local, offset-aware datetime.
pub fn to_dt(ts: i64) -> AppResult<DateTime<Local>> {
    DateTime::from_timestamp(ts, 0)
        .map(|utc| utc.with_timezone(&Local))
        .ok_or_else(|| AppError::InvalidDate(format!("timestamp {ts} out of range")))
}

/// Parse an ISO-8601 datetime into a UTC timestamp.
///
/// Accepts RFC 3339 with offset, naive `YYYY-MM-DDTHH:MM[:SS]`
/// (also with a space separator) and a bare `YYYY-MM-DD` (local midnight).
pub fn parse_datetime(s: &str) -> AppResult<i64> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(to_ts(&dt));
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return naive_to_ts(naive);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        && let Some(midnight) = date.and_hms_opt(0, 0, 0)
    {
        return naive_to_ts(midnight);
    }

    Err(AppError::InvalidDate(s.to_string()))
}

pub fn parse_optional_datetime(input: Option<&String>) -> AppResult<Option<i64>> {
    input.map(|s| parse_datetime(s)).transpose()
}

/// Render a timestamp as local ISO-8601 with offset.
pub fn format_ts(ts: i64) -> String {
    match to_dt(ts) {
        Ok(dt) => dt.format("%Y-%m-%dT%H:%M:%S%:z").to_string(),
        Err(_) => ts.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_preserves_integer_seconds() {
        for ts in [0, 1_678_838_400, 1_700_000_123, -86_400] {
            let dt = to_dt(ts).unwrap();
            assert_eq!(to_ts(&dt), ts);
        }
    }

    #[test]
    fn parses_offset_aware_input() {
        assert_eq!(
            parse_datetime("2023-03-15T00:00:00+00:00").unwrap(),
            1_678_838_400
        );
        assert_eq!(
            parse_datetime("2023-03-15T01:00:00+01:00").unwrap(),
            1_678_838_400
        );
        assert_eq!(parse_datetime("2023-03-15T00:00:00Z").unwrap(), 1_678_838_400);
    }

    #[test]
    fn naive_input_is_local_time() {
        let naive = NaiveDate::from_ymd_opt(2023, 3, 15)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        let expected = Local.from_local_datetime(&naive).earliest().unwrap().timestamp();

        assert_eq!(parse_datetime("2023-03-15T09:30:00").unwrap(), expected);
        assert_eq!(parse_datetime("2023-03-15 09:30").unwrap(), expected);
        assert_eq!(naive_to_ts(naive).unwrap(), expected);
    }

    #[test]
    fn bare_date_is_local_midnight() {
        assert_eq!(
            parse_datetime("2023-03-15").unwrap(),
            parse_datetime("2023-03-15T00:00:00").unwrap()
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            parse_datetime("15/03/2023"),
            Err(AppError::InvalidDate(_))
        ));
        assert!(parse_optional_datetime(None).unwrap().is_none());
    }
}
