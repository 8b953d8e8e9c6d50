use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};

use super::error::LoadError;

pub type Timestamp = DateTime<FixedOffset>;

/// Parses a `ts:date` value such as `2017-01-15 10:59:00 +0100`. Values without
/// an offset are taken as UTC.
pub fn parse_timestamp(s: &str) -> Result<Timestamp, LoadError> {
    let s = s.trim();
    DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S %z")
        .or_else(|_| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
                .map(|dt| dt.and_utc().fixed_offset())
        })
        .or_else(|_| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|dt| dt.and_utc().fixed_offset())
                .ok_or(())
        })
        .map_err(|_| LoadError::Format(format!("invalid timestamp {:?}", s)))
}

pub fn parse_date(s: &str) -> Result<NaiveDate, LoadError> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| LoadError::Format(format!("invalid date {:?}", s)))
}
