//! Parsing of the match start times a defender proposes.

use chrono::{DateTime, NaiveDateTime, Utc};
use thiserror::Error;

/// The format the challenge forms ask for, e.g. `2026-01-12T20:00`.
pub const PROPOSED_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Accepted naive layouts, tried in order.
const NAIVE_FORMATS: &[&str] = &[PROPOSED_TIME_FORMAT, "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleParseError {
    #[error("time is empty")]
    Empty,
    #[error("'{0}' is not a valid date-time")]
    Invalid(String),
}

/// Parse a proposed start time.
///
/// Accepts `YYYY-MM-DDTHH:MM`, `YYYY-MM-DDTHH:MM:SS` and full RFC 3339.
/// Values without an offset are taken as UTC.
pub fn parse_proposed_time(raw: &str) -> Result<DateTime<Utc>, ScheduleParseError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ScheduleParseError::Empty);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| ScheduleParseError::Invalid(raw.to_string()))
}
