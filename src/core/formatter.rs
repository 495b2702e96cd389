//! Formatter contract and the built-in formatters
//!
//! A formatter turns `(timestamp, level, template, args)` into the exact text a
//! sink writes. Sinks write that text verbatim, so a formatter decides about
//! line termination too. All built-in formatters end with `\n`.

use super::log_entry::{render_template, LogEntry};
use super::log_level::LogLevel;
use super::timestamp::TimestampFormat;
use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

type FormatFn = dyn Fn(&DateTime<FixedOffset>, LogLevel, &str, &[String]) -> String + Send + Sync;

/// Shared, cheaply clonable formatting function
///
/// # Example
///
/// ```
/// use fanlog::Formatter;
/// use fanlog::core::render_template;
///
/// let upper = Formatter::new(|_ts, level, template, args| {
///     format!("{} {}\n", level, render_template(template, args).to_uppercase())
/// });
/// ```
#[derive(Clone)]
pub struct Formatter(Arc<FormatFn>);

impl Formatter {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&DateTime<FixedOffset>, LogLevel, &str, &[String]) -> String + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// `10:30:45.123 [ INFO] message`
    pub fn standard() -> Self {
        Self::text(TimestampFormat::TimeOnlyMillis)
    }

    /// Same layout as [`Formatter::standard`] with a configurable timestamp
    pub fn text(timestamp_format: TimestampFormat) -> Self {
        Self::new(move |ts, level, template, args| {
            format!(
                "{} [{:>5}] {}\n",
                timestamp_format.format(ts),
                level,
                render_template(template, args)
            )
        })
    }

    /// One JSON object per line: `{"time":..,"level":..,"message":..}`
    pub fn json() -> Self {
        Self::new(|ts, level, template, args| {
            let record = JsonRecord {
                time: ts,
                level: level.to_str(),
                message: render_template(template, args),
            };
            match serde_json::to_string(&record) {
                Ok(mut line) => {
                    line.push('\n');
                    line
                }
                Err(_) => String::new(),
            }
        })
    }

    /// Standard layout with the level colored for terminals
    #[cfg(feature = "color")]
    pub fn colored() -> Self {
        use colored::Colorize;

        Self::new(|ts, level, template, args| {
            let level_str = format!("{:>5}", level).color(level.color_code());
            format!(
                "{} [{}] {}\n",
                TimestampFormat::TimeOnlyMillis.format(ts),
                level_str,
                render_template(template, args)
            )
        })
    }

    pub fn format(
        &self,
        timestamp: &DateTime<FixedOffset>,
        level: LogLevel,
        template: &str,
        args: &[String],
    ) -> String {
        (self.0)(timestamp, level, template, args)
    }

    pub fn format_entry(&self, entry: &LogEntry) -> String {
        self.format(&entry.timestamp, entry.level, &entry.template, &entry.args)
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for Formatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Formatter(..)")
    }
}

#[derive(Serialize)]
pub(crate) struct JsonRecord<'a> {
    pub time: &'a DateTime<FixedOffset>,
    pub level: &'static str,
    pub message: String,
}

/// Per-sink formatter overrides
///
/// Unset console and file entries fall back to the logger's standard
/// formatter, resolved once when the logger is built. Without a remote entry
/// the JSON `message` field is the plain rendered template.
#[derive(Debug, Clone, Default)]
pub struct FormatterRegistry {
    pub console: Option<Formatter>,
    pub file: Option<Formatter>,
    pub remote: Option<Formatter>,
}
