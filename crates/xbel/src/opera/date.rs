//! Timestamp fields to XBEL dates

use time::macros::format_description;
use time::{Duration, OffsetDateTime, UtcOffset};

use crate::error::{Error, ErrorKind, Result};

/// Time zone used to turn timestamps into calendar dates
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DateZone {
    /// The system's local offset at each timestamp
    #[default]
    Local,
    Fixed(UtcOffset),
}

impl DateZone {
    pub const fn utc() -> Self {
        Self::Fixed(UtcOffset::UTC)
    }
}

/// Parse epoch seconds; surrounding whitespace and a sign are accepted
pub fn parse_timestamp(value: &str) -> Result<i64> {
    value.trim().parse::<i64>().map_err(|_| invalid(value))
}

/// System UTC offset in effect at `secs`, if it can be determined
pub fn local_offset_at(secs: i64) -> Option<UtcOffset> {
    let at = OffsetDateTime::from_unix_timestamp(secs).ok()?;
    UtcOffset::local_offset_at(at).ok()
}

/// Format `secs` as the `YYYYMMDD` calendar date at `offset`
pub fn format_date(secs: i64, offset: UtcOffset) -> Result<String> {
    let date = OffsetDateTime::from_unix_timestamp(secs)
        .ok()
        .and_then(|utc| utc.checked_add(Duration::seconds(i64::from(offset.whole_seconds()))))
        .map(OffsetDateTime::date)
        .ok_or_else(|| invalid(&secs.to_string()))?;

    date.format(format_description!("[year][month][day]"))
        .map_err(|_| invalid(&secs.to_string()))
}

fn invalid(value: &str) -> Error {
    Error::new(ErrorKind::InvalidTimestamp {
        value: value.to_string(),
    })
}
