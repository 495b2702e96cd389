//! Logging macros
//!
//! The macros take a logger, a template and any number of `Display`
//! arguments, and forward them to [`Logger::log`](crate::Logger::log). The
//! template uses the logger's own placeholder syntax (`{}`, `{0}`, `{{`), not
//! `format!` syntax, and arguments are only rendered when the level passes.
//!
//! # Examples
//!
//! ```
//! use fanlog::prelude::*;
//! use fanlog::info;
//!
//! let logger = Logger::builder("svc").console(false).build().unwrap();
//!
//! info!(logger, "Server started");
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! let user_id = 42;
//! let action = "login";
//! info!(logger, "User {1} performed {0}", action, user_id);
//! # logger.close();
//! ```

/// Log at an explicit level.
///
/// # Examples
///
/// ```
/// # use fanlog::prelude::*;
/// # let logger = Logger::builder("svc").console(false).build().unwrap();
/// use fanlog::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $logger.log(
            $level,
            $template,
            &[$(&$arg as &dyn ::std::fmt::Display),*],
        )
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use fanlog::prelude::*;
/// # let logger = Logger::builder("svc").console(false).level(LogLevel::Debug).build().unwrap();
/// use fanlog::debug;
/// debug!(logger, "Cache size: {} entries", 1024);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $template $(, $arg)*)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Info, $template $(, $arg)*)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use fanlog::prelude::*;
/// # let logger = Logger::builder("svc").console(false).build().unwrap();
/// use fanlog::warn;
/// warn!(logger, "Memory usage high: {}%", 85);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $template $(, $arg)*)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Error, $template $(, $arg)*)
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{LogEntry, LogLevel, Logger, Result};
    use crate::sinks::Sink;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<(LogLevel, String)>>>);

    impl Sink for Capture {
        fn write(&mut self, entry: &LogEntry) -> Result<usize> {
            self.0.lock().push((entry.level, entry.message()));
            Ok(0)
        }
    }

    #[test]
    fn test_macros_forward_level_and_args() {
        let capture = Capture::default();
        let logger = Logger::builder("macros")
            .console(false)
            .level(LogLevel::Debug)
            .sink(capture.clone())
            .build()
            .unwrap();

        crate::debug!(logger, "plain");
        crate::info!(logger, "{} + {} = {}", 1, 2, 3);
        crate::warn!(logger, "{1}{0}", "b", "a",);
        crate::error!(logger, "{{literal}} {}", "x");
        crate::log!(logger, LogLevel::Info, "{}", String::from("owned"));
        logger.close();

        assert_eq!(
            *capture.0.lock(),
            vec![
                (LogLevel::Debug, "plain".to_string()),
                (LogLevel::Info, "1 + 2 = 3".to_string()),
                (LogLevel::Warn, "ab".to_string()),
                (LogLevel::Error, "{literal} x".to_string()),
                (LogLevel::Info, "owned".to_string()),
            ]
        );
    }
}
