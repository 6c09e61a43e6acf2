//! Conversion of form date values into wire timestamps.

use chrono::{DateTime, Local, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use shared::domain::WireTimestamp;
use thiserror::Error;

/// Local date-time layouts the form layer produces. `%.f` also matches no fraction.
const LOCAL_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

const LOCAL_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("unrecognised date value '{input}'")]
    Unparseable { input: String },
    #[error("local time '{input}' does not exist in this time zone")]
    NonexistentLocalTime { input: String },
}

impl NormalizeError {
    pub fn input(&self) -> &str {
        match self {
            Self::Unparseable { input } | Self::NonexistentLocalTime { input } => input,
        }
    }
}

/// Normalizes a form date value using the process time zone.
///
/// Absent or blank input yields `Ok(None)` without touching the parser.
pub fn format_to_iso8601(input: Option<&str>) -> Result<Option<WireTimestamp>, NormalizeError> {
    format_to_iso8601_in(input, &Local)
}

/// Same as [`format_to_iso8601`] with an explicit zone for offset-less input.
pub fn format_to_iso8601_in<Tz: TimeZone>(
    input: Option<&str>,
    tz: &Tz,
) -> Result<Option<WireTimestamp>, NormalizeError> {
    let Some(raw) = input.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(None);
    };

    let instant = parse_instant(raw, tz)?;
    Ok(Some(WireTimestamp::from_utc(instant)))
}

fn parse_instant<Tz: TimeZone>(raw: &str, tz: &Tz) -> Result<DateTime<Utc>, NormalizeError> {
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Ok(with_offset.with_timezone(&Utc));
    }

    let naive = parse_naive(raw).ok_or_else(|| NormalizeError::Unparseable {
        input: raw.to_string(),
    })?;

    match tz.from_local_datetime(&naive) {
        LocalResult::Single(local) => Ok(local.with_timezone(&Utc)),
        // DST fall-back: the earlier of the two instants.
        LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
        LocalResult::None => Err(NormalizeError::NonexistentLocalTime {
            input: raw.to_string(),
        }),
    }
}

fn parse_naive(raw: &str) -> Option<NaiveDateTime> {
    LOCAL_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, LOCAL_DATE_FORMAT)
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}

#[cfg(test)]
#[path = "tests/timestamp_tests.rs"]
mod tests;
