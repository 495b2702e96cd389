//! Logger facade and builder

use super::{
    config::{FileConfig, LoggerConfig, OutputMode, RemoteConfig, DEFAULT_ENTRY_SIZE},
    dispatcher::Dispatcher,
    error::{LoggerError, Result},
    formatter::{Formatter, FormatterRegistry},
    log_entry::LogEntry,
    log_level::LogLevel,
    timestamp::LogTimeZone,
};
use crate::sinks::{ConsoleSink, FileSink, RemoteSink, Sink};
use parking_lot::RwLock;
use std::fmt;
use std::io::Write;
use std::sync::Arc;

/// Handle to a running logger
///
/// Clones share the same queue and sinks. The sinks are released by
/// [`Logger::close`], or when the last clone is dropped.
///
/// # Example
///
/// ```no_run
/// use fanlog::prelude::*;
///
/// let logger = Logger::builder("svc")
///     .level(LogLevel::Debug)
///     .file(FileConfig::new("svc", "/var/log/svc", RotationMode::Daily))
///     .build()?;
///
/// logger.info("listening on port {}", &[&8080]);
/// logger.close();
/// # Ok::<(), fanlog::LoggerError>(())
/// ```
#[derive(Clone)]
pub struct Logger {
    inner: Arc<LoggerInner>,
}

struct LoggerInner {
    name: String,
    level: RwLock<LogLevel>,
    time_zone: LogTimeZone,
    dispatcher: Dispatcher,
}

impl Logger {
    /// Create a builder for a logger called `name`
    ///
    /// The name is also the default base name of log files.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder::new(name)
    }

    /// Build a logger from plain configuration
    pub fn from_config(name: impl Into<String>, config: LoggerConfig) -> Result<Self> {
        LoggerBuilder::new(name).config(config).build()
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn log_level(&self) -> LogLevel {
        *self.inner.level.read()
    }

    pub fn set_log_level(&self, level: LogLevel) {
        *self.inner.level.write() = level;
    }

    /// Queue an entry unless `level` is below the threshold
    ///
    /// Blocks while the queue is full. After [`Logger::close`] entries are
    /// silently discarded.
    pub fn log(&self, level: LogLevel, template: &str, args: &[&dyn fmt::Display]) {
        if level < *self.inner.level.read() {
            return;
        }

        let entry = LogEntry::capture(self.inner.time_zone.now(), level, template, args);
        let _ = self.inner.dispatcher.enqueue(entry);
    }

    #[inline]
    pub fn debug(&self, template: &str, args: &[&dyn fmt::Display]) {
        self.log(LogLevel::Debug, template, args);
    }

    #[inline]
    pub fn info(&self, template: &str, args: &[&dyn fmt::Display]) {
        self.log(LogLevel::Info, template, args);
    }

    #[inline]
    pub fn warn(&self, template: &str, args: &[&dyn fmt::Display]) {
        self.log(LogLevel::Warn, template, args);
    }

    #[inline]
    pub fn error(&self, template: &str, args: &[&dyn fmt::Display]) {
        self.log(LogLevel::Error, template, args);
    }

    /// Deliver every queued entry and release the sinks
    ///
    /// Blocks until the worker has stopped and the remaining entries have
    /// been written. Calling it again does nothing.
    pub fn close(&self) {
        self.inner.dispatcher.close();
    }

    pub fn is_closed(&self) -> bool {
        self.inner.dispatcher.is_closed()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.inner.name)
            .field("level", &self.log_level())
            .field("time_zone", &self.inner.time_zone)
            .field("capacity", &self.inner.dispatcher.capacity())
            .finish()
    }
}

/// Builder for constructing a [`Logger`] with a fluent API
///
/// Later calls override earlier ones; anything left unset takes its default
/// (Info level, console output, 4096 queued entries, local time).
///
/// # Example
/// ```
/// use fanlog::prelude::*;
///
/// let logger = Logger::builder("svc")
///     .level(LogLevel::Warn)
///     .entry_size(128)
///     .time_zone(LogTimeZone::Utc)
///     .console_formatter(Formatter::json())
///     .build()
///     .unwrap();
///
/// assert_eq!(logger.log_level(), LogLevel::Warn);
/// logger.close();
/// ```
pub struct LoggerBuilder {
    name: String,
    level: Option<LogLevel>,
    output_mode: OutputMode,
    entry_size: Option<usize>,
    time_zone: Option<LogTimeZone>,
    file: Option<FileConfig>,
    remote: Option<RemoteConfig>,
    console_writer: Option<Box<dyn Write + Send>>,
    standard_formatter: Option<Formatter>,
    formatters: FormatterRegistry,
    extra_sinks: Vec<Box<dyn Sink>>,
    register_global: bool,
}

impl LoggerBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: None,
            output_mode: OutputMode::CONSOLE,
            entry_size: None,
            time_zone: None,
            file: None,
            remote: None,
            console_writer: None,
            standard_formatter: None,
            formatters: FormatterRegistry::default(),
            extra_sinks: Vec::new(),
            register_global: false,
        }
    }

    /// Apply every field that is set in `config`
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: LoggerConfig) -> Self {
        if let Some(level) = config.level {
            self.level = Some(level);
        }
        if let Some(mode) = config.output_mode {
            self.output_mode = mode;
        }
        if let Some(size) = config.entry_size {
            self.entry_size = Some(size);
        }
        if let Some(zone) = config.time_zone {
            self.time_zone = Some(zone);
        }
        if let Some(file) = config.file {
            self = self.file(file);
        }
        if let Some(remote) = config.remote {
            self = self.remote(remote);
        }
        self
    }

    /// Minimum level that reaches the queue
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = Some(level);
        self
    }

    /// Replace the whole set of enabled sinks
    #[must_use = "builder methods return a new value"]
    pub fn output_mode(mut self, mode: OutputMode) -> Self {
        self.output_mode = mode;
        self
    }

    /// Capacity of the entry queue
    #[must_use = "builder methods return a new value"]
    pub fn entry_size(mut self, size: usize) -> Self {
        self.entry_size = Some(size);
        self
    }

    /// Time zone entry timestamps are taken in
    #[must_use = "builder methods return a new value"]
    pub fn time_zone(mut self, zone: LogTimeZone) -> Self {
        self.time_zone = Some(zone);
        self
    }

    /// Enable or disable console output
    #[must_use = "builder methods return a new value"]
    pub fn console(mut self, enabled: bool) -> Self {
        self.output_mode = self.output_mode.with(OutputMode::CONSOLE, enabled);
        self
    }

    /// Send console output somewhere other than stdout
    #[must_use = "builder methods return a new value"]
    pub fn console_writer(mut self, writer: Box<dyn Write + Send>) -> Self {
        self.console_writer = Some(writer);
        self
    }

    /// Enable file output
    #[must_use = "builder methods return a new value"]
    pub fn file(mut self, config: FileConfig) -> Self {
        self.file = Some(config);
        self.output_mode |= OutputMode::FILE;
        self
    }

    /// Enable remote output
    #[must_use = "builder methods return a new value"]
    pub fn remote(mut self, config: RemoteConfig) -> Self {
        self.remote = Some(config);
        self.output_mode |= OutputMode::REMOTE;
        self
    }

    /// Formatter for every sink without its own
    #[must_use = "builder methods return a new value"]
    pub fn standard_formatter(mut self, formatter: Formatter) -> Self {
        self.standard_formatter = Some(formatter);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn console_formatter(mut self, formatter: Formatter) -> Self {
        self.formatters.console = Some(formatter);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn file_formatter(mut self, formatter: Formatter) -> Self {
        self.formatters.file = Some(formatter);
        self
    }

    /// Formatter for the `message` field of remote deliveries
    #[must_use = "builder methods return a new value"]
    pub fn remote_formatter(mut self, formatter: Formatter) -> Self {
        self.formatters.remote = Some(formatter);
        self
    }

    /// Replace all per-sink formatters at once
    #[must_use = "builder methods return a new value"]
    pub fn formatters(mut self, registry: FormatterRegistry) -> Self {
        self.formatters = registry;
        self
    }

    /// Add a sink of your own after the built-in ones
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.extra_sinks.push(Box::new(sink));
        self
    }

    /// Install the built logger as the process-wide logger
    ///
    /// See [`crate::global`].
    #[must_use = "builder methods return a new value"]
    pub fn register_global(mut self) -> Self {
        self.register_global = true;
        self
    }

    /// Validate the configuration, create the sinks and start the worker
    ///
    /// # Errors
    ///
    /// - [`LoggerError::RemoteConfigRequired`] when remote output is enabled
    ///   without a [`RemoteConfig`]
    /// - [`LoggerError::EndpointRequired`] when the endpoint is empty
    /// - [`LoggerError::InvalidConfiguration`] for a zero entry size, an out
    ///   of range time zone offset or malformed HTTP method/headers
    pub fn build(self) -> Result<Logger> {
        let entry_size = self.entry_size.unwrap_or(DEFAULT_ENTRY_SIZE);
        if entry_size == 0 {
            return Err(LoggerError::config("entry_size", "must be greater than zero"));
        }
        let time_zone = self.time_zone.unwrap_or_default();
        time_zone.validate()?;

        let standard = self.standard_formatter.unwrap_or_default();
        let mode = self.output_mode;

        // Remote validation runs first so a rejected config leaves no files behind.
        let remote_sink = if mode.contains(OutputMode::REMOTE) {
            let config = self.remote.as_ref().ok_or(LoggerError::RemoteConfigRequired)?;
            Some(RemoteSink::new(config, self.formatters.remote.clone())?)
        } else {
            None
        };

        let mut sinks: Vec<Box<dyn Sink>> = Vec::new();
        if mode.contains(OutputMode::CONSOLE) {
            let formatter = self.formatters.console.unwrap_or_else(|| standard.clone());
            let sink = match self.console_writer {
                Some(writer) => ConsoleSink::with_writer(formatter, writer),
                None => ConsoleSink::new(formatter),
            };
            sinks.push(Box::new(sink));
        }
        if mode.contains(OutputMode::FILE) {
            let formatter = self.formatters.file.unwrap_or_else(|| standard.clone());
            let config = self.file.unwrap_or_default();
            sinks.push(Box::new(FileSink::new(&self.name, &config, formatter)));
        }
        if let Some(sink) = remote_sink {
            sinks.push(Box::new(sink));
        }
        sinks.extend(self.extra_sinks);

        let dispatcher = Dispatcher::new(entry_size, sinks);
        dispatcher.start()?;

        let logger = Logger {
            inner: Arc::new(LoggerInner {
                name: self.name,
                level: RwLock::new(self.level.unwrap_or_default()),
                time_zone,
                dispatcher,
            }),
        };

        if self.register_global {
            crate::global::install(logger.clone());
        }
        Ok(logger)
    }
}
