use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::CandelaError;

const NAIVE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Parse a caller-supplied start date.
///
/// Accepts `YYYY-MM-DD HH:MM:SS[.ffffff]` and bare `YYYY-MM-DD` (both read
/// as UTC) as well as RFC 3339 with an explicit offset.
///
/// # Errors
/// Returns `CandelaError::InvalidArg` when no format matches.
pub fn parse_from_date(s: &str) -> Result<DateTime<Utc>, CandelaError> {
    let s = s.trim();
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, NAIVE_FORMAT) {
        return Ok(naive.and_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(day) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(day.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc());
    }
    Err(CandelaError::InvalidArg(format!(
        "unrecognized start date '{s}'; expected 'YYYY-MM-DD HH:MM:SS[.f]' or RFC 3339"
    )))
}
