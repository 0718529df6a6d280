//! Time utilities: epoch-millis conversion, parsing local date-times,
//! formatting timestamps for the terminal.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc};

pub const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Convert a timestamp into the epoch-millis stored in SQLite.
pub fn to_millis(dt: &DateTime<Utc>) -> i64 {
    dt.timestamp_millis()
}

pub fn from_millis(ms: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(ms)
}

pub fn opt_to_millis(dt: Option<&DateTime<Utc>>) -> Option<i64> {
    dt.map(to_millis)
}

/// Parse a local date-time entered on the command line.
/// Accepts `YYYY-MM-DD HH:MM`, `YYYY-MM-DDTHH:MM` and `YYYY-MM-DD` (midnight).
pub fn parse_local_datetime(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .map(|d| d.and_time(NaiveTime::MIN))
        })?;

    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

pub fn parse_optional_datetime(
    input: Option<&String>,
) -> crate::errors::AppResult<Option<DateTime<Utc>>> {
    match input {
        Some(s) => parse_local_datetime(s)
            .map(Some)
            .ok_or_else(|| crate::errors::AppError::InvalidDate(s.to_string())),
        None => Ok(None),
    }
}

/// Local representation; the time part is omitted at midnight.
pub fn format_local(dt: &DateTime<Utc>) -> String {
    let local = dt.with_timezone(&Local);
    if local.hour() == 0 && local.minute() == 0 {
        local.format("%Y-%m-%d").to_string()
    } else {
        local.format("%Y-%m-%d %H:%M").to_string()
    }
}

pub fn format_optional(dt: Option<&DateTime<Utc>>) -> String {
    dt.map(format_local).unwrap_or_else(|| "—".to_string())
}
