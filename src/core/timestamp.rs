//! Timestamp formatting and time zone selection
//!
//! Entries carry a `DateTime<FixedOffset>` taken in the logger's configured
//! [`LogTimeZone`]. [`TimestampFormat`] renders it for text formatters.

use super::error::{LoggerError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, Local, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Time zone that entry timestamps are taken in
///
/// The zone also decides rotation buckets of the file sink, since file names
/// are derived from the entry's own local date and hour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogTimeZone {
    /// The process local time zone
    #[default]
    Local,
    /// Coordinated Universal Time
    Utc,
    /// A fixed offset east of UTC, in seconds
    Offset(i32),
}

impl LogTimeZone {
    /// Current time in this zone
    pub fn now(&self) -> DateTime<FixedOffset> {
        match self {
            LogTimeZone::Local => Local::now().fixed_offset(),
            LogTimeZone::Utc => Utc::now().fixed_offset(),
            LogTimeZone::Offset(seconds) => match FixedOffset::east_opt(*seconds) {
                Some(offset) => Utc::now().with_timezone(&offset),
                None => Utc::now().fixed_offset(),
            },
        }
    }

    /// Reject offsets chrono cannot represent (beyond ±24h)
    pub fn validate(&self) -> Result<()> {
        if let LogTimeZone::Offset(seconds) = self {
            if FixedOffset::east_opt(*seconds).is_none() {
                return Err(LoggerError::config(
                    "time_zone",
                    format!("offset of {} seconds is out of range", seconds),
                ));
            }
        }
        Ok(())
    }
}

/// Timestamp rendering used by the text formatters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// Time of day with milliseconds: `10:30:45.123`
    #[default]
    TimeOnlyMillis,

    /// ISO 8601 with milliseconds and offset: `2025-01-08T10:30:45.123+09:00`
    Iso8601,

    /// RFC 3339: `2025-01-08T10:30:45.123456789+09:00`
    Rfc3339,

    /// Unix timestamp in seconds
    Unix,

    /// Unix timestamp in milliseconds
    UnixMillis,

    /// Custom strftime format, e.g. `%d/%b/%Y:%H:%M:%S %z`
    ///
    /// Prefer [`TimestampFormat::custom`], which rejects malformed formats.
    /// A malformed format renders as RFC 3339.
    Custom(String),
}

impl TimestampFormat {
    /// Checked constructor for [`TimestampFormat::Custom`]
    ///
    /// ```
    /// use fanlog::TimestampFormat;
    ///
    /// assert!(TimestampFormat::custom("%Y/%m/%d %H:%M").is_ok());
    /// assert!(TimestampFormat::custom("%Q").is_err());
    /// ```
    pub fn custom(format_str: impl Into<String>) -> Result<Self> {
        let format_str = format_str.into();
        if StrftimeItems::new(&format_str).any(|item| matches!(item, Item::Error)) {
            return Err(LoggerError::config(
                "timestamp_format",
                format!("invalid strftime format '{}'", format_str),
            ));
        }
        Ok(TimestampFormat::Custom(format_str))
    }

    #[must_use]
    pub fn format(&self, datetime: &DateTime<FixedOffset>) -> String {
        match self {
            TimestampFormat::TimeOnlyMillis => datetime.format("%H:%M:%S%.3f").to_string(),
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3f%:z").to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::Unix => datetime.timestamp().to_string(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(format_str) => {
                let mut out = String::new();
                match write!(out, "{}", datetime.format(format_str)) {
                    Ok(()) => out,
                    Err(_) => datetime.to_rfc3339(),
                }
            }
        }
    }
}
