//! # fanlog
//!
//! Asynchronous leveled logging with fan-out to several outputs.
//!
//! Callers format nothing on their own thread: a call captures the level, the
//! timestamp and the stringified arguments, queues the entry and returns. A
//! single worker renders each entry and hands it to every enabled sink.
//!
//! ## Features
//!
//! - **Bounded queue**: callers block instead of dropping entries when the
//!   queue is full
//! - **Console, file and remote sinks**: files rotate by day or hour, remote
//!   entries are posted as JSON without waiting for the network
//! - **Custom formatters** per sink, and custom sinks
//! - **Lossless close**: every accepted entry reaches the sinks
//!
//! ```no_run
//! use fanlog::prelude::*;
//!
//! let logger = Logger::builder("svc")
//!     .level(LogLevel::Debug)
//!     .file(FileConfig::new("svc", "$HOME/logs", RotationMode::Hourly))
//!     .remote(RemoteConfig::new("https://collector.example.com/logs").with_header("X-Api-Key", "secret"))
//!     .build()?;
//!
//! fanlog::info!(logger, "user {} logged in from {}", "alice", "10.0.0.7");
//! logger.close();
//! # Ok::<(), LoggerError>(())
//! ```

pub mod core;
pub mod global;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        FileConfig, Formatter, FormatterRegistry, LogEntry, LogLevel, LogTimeZone, Logger,
        LoggerBuilder, LoggerConfig, LoggerError, OutputMode, RemoteConfig, Result, RotationMode,
        TimestampFormat,
    };
    pub use crate::sinks::Sink;
}

pub use crate::core::{
    render_template, FileConfig, Formatter, FormatterRegistry, LogEntry, LogLevel, LogTimeZone,
    Logger, LoggerBuilder, LoggerConfig, LoggerError, OutputMode, RemoteConfig, Result,
    RotationMode, TimestampFormat,
};
pub use crate::sinks::{ConsoleSink, FileSink, RemoteSink, Sink, SinkKind};
