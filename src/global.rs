//! Process-wide logger handle
//!
//! Until a logger is installed every function here is a no-op.
//!
//! ```
//! use fanlog::{global, Logger, LogLevel};
//!
//! let logger = Logger::builder("svc").console(false).build().unwrap();
//! global::install(logger);
//!
//! global::set_log_level(LogLevel::Warn);
//! global::warn("disk at {}%", &[&93]);
//! global::close();
//! ```

use crate::core::{LogLevel, Logger};
use parking_lot::{const_rwlock, RwLock};
use std::fmt;

static GLOBAL: RwLock<Option<Logger>> = const_rwlock(None);

/// Make `logger` the process-wide logger, returning the one it replaces
///
/// The replaced logger keeps running until it is closed or dropped.
pub fn install(logger: Logger) -> Option<Logger> {
    GLOBAL.write().replace(logger)
}

/// Clone of the installed logger
pub fn get() -> Option<Logger> {
    GLOBAL.read().clone()
}

pub fn is_installed() -> bool {
    GLOBAL.read().is_some()
}

/// Close the installed logger and uninstall it
pub fn close() {
    let logger = GLOBAL.write().take();
    if let Some(logger) = logger {
        logger.close();
    }
}

pub fn log(level: LogLevel, template: &str, args: &[&dyn fmt::Display]) {
    if let Some(logger) = GLOBAL.read().as_ref() {
        logger.log(level, template, args);
    }
}

pub fn debug(template: &str, args: &[&dyn fmt::Display]) {
    log(LogLevel::Debug, template, args);
}

pub fn info(template: &str, args: &[&dyn fmt::Display]) {
    log(LogLevel::Info, template, args);
}

pub fn warn(template: &str, args: &[&dyn fmt::Display]) {
    log(LogLevel::Warn, template, args);
}

pub fn error(template: &str, args: &[&dyn fmt::Display]) {
    log(LogLevel::Error, template, args);
}

pub fn set_log_level(level: LogLevel) {
    if let Some(logger) = GLOBAL.read().as_ref() {
        logger.set_log_level(level);
    }
}

/// Threshold of the installed logger, if there is one
pub fn log_level() -> Option<LogLevel> {
    GLOBAL.read().as_ref().map(Logger::log_level)
}
