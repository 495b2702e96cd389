//! Core logger types: entries, levels, formatting, configuration and the
//! dispatching facade

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod formatter;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod timestamp;

pub use config::{FileConfig, LoggerConfig, OutputMode, RemoteConfig, RotationMode};
pub use dispatcher::Dispatcher;
pub use error::{LoggerError, Result};
pub use formatter::{Formatter, FormatterRegistry};
pub use log_entry::{render_template, LogEntry};
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder};
pub use timestamp::{LogTimeZone, TimestampFormat};
