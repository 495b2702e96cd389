//! Plain-data configuration: output modes and per-sink settings
//!
//! [`LoggerConfig`] is the serializable subset of what
//! [`LoggerBuilder`](crate::LoggerBuilder) accepts. Formatters, transports and
//! console writers are code, so they are only settable on the builder.

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use super::timestamp::LogTimeZone;
use crate::sinks::remote::Transport;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign, Not};
use std::sync::Arc;

/// Default capacity of the entry queue
pub const DEFAULT_ENTRY_SIZE: usize = 4096;

/// Default directory for file output, relative to the working directory
pub const DEFAULT_LOG_PATH: &str = "log";

/// Set of sinks a logger writes to
///
/// ```
/// use fanlog::OutputMode;
///
/// let mode = OutputMode::CONSOLE | OutputMode::FILE;
/// assert!(mode.contains(OutputMode::FILE));
/// assert!(!mode.contains(OutputMode::REMOTE));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutputMode(u8);

impl OutputMode {
    pub const NONE: OutputMode = OutputMode(0);
    pub const CONSOLE: OutputMode = OutputMode(1);
    pub const FILE: OutputMode = OutputMode(1 << 1);
    pub const REMOTE: OutputMode = OutputMode(1 << 2);

    pub const fn bits(&self) -> u8 {
        self.0
    }

    pub const fn contains(&self, other: OutputMode) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub fn with(self, other: OutputMode, enabled: bool) -> Self {
        if enabled {
            self | other
        } else {
            self & !other
        }
    }
}

impl BitOr for OutputMode {
    type Output = OutputMode;

    fn bitor(self, rhs: Self) -> Self::Output {
        OutputMode(self.0 | rhs.0)
    }
}

impl BitOrAssign for OutputMode {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for OutputMode {
    type Output = OutputMode;

    fn bitand(self, rhs: Self) -> Self::Output {
        OutputMode(self.0 & rhs.0)
    }
}

impl Not for OutputMode {
    type Output = OutputMode;

    fn not(self) -> Self::Output {
        OutputMode(!self.0 & 0b111)
    }
}

/// How often the file sink starts a new file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationMode {
    /// `name.YYYY-MM-DD.log`
    #[default]
    Daily,
    /// `name.YYYY-MM-DD-HH.log`
    Hourly,
}

/// File sink settings
///
/// Unset fields default to the logger name, `log` and [`RotationMode::Daily`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub file_name: Option<String>,
    pub log_path: Option<String>,
    pub rotation: RotationMode,
}

impl FileConfig {
    pub fn new(file_name: impl Into<String>, log_path: impl Into<String>, rotation: RotationMode) -> Self {
        Self {
            file_name: Some(file_name.into()),
            log_path: Some(log_path.into()),
            rotation,
        }
    }
}

/// Remote sink settings
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    pub endpoint: String,
    /// HTTP method, `POST` when unset
    pub method: Option<String>,
    /// Extra request headers; these win over the default `Content-Type`
    pub headers: BTreeMap<String, String>,
    /// Replaces the built-in HTTP client
    #[serde(skip)]
    pub transport: Option<Arc<dyn Transport>>,
}

impl RemoteConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }
}

impl fmt::Debug for RemoteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteConfig")
            .field("endpoint", &self.endpoint)
            .field("method", &self.method)
            .field("headers", &self.headers)
            .field("transport", &self.transport.as_ref().map(|_| "custom"))
            .finish()
    }
}

/// Serializable logger configuration
///
/// Every field is optional; unset fields keep the builder's current value.
///
/// ```
/// use fanlog::{LoggerConfig, LogLevel, OutputMode};
///
/// let config = LoggerConfig::from_json_str(r#"{
///     "level": "DEBUG",
///     "output_mode": 3,
///     "file": { "log_path": "/tmp/logs", "rotation": "hourly" }
/// }"#).unwrap();
///
/// assert_eq!(config.level, Some(LogLevel::Debug));
/// assert_eq!(config.output_mode, Some(OutputMode::CONSOLE | OutputMode::FILE));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub level: Option<LogLevel>,
    pub output_mode: Option<OutputMode>,
    pub entry_size: Option<usize>,
    pub time_zone: Option<LogTimeZone>,
    pub file: Option<FileConfig>,
    pub remote: Option<RemoteConfig>,
}

impl LoggerConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            LoggerError::io_operation("reading logger config", path.display().to_string(), e)
        })?;
        Self::from_json_str(&content)
    }
}
