//! Rotating file sink
//!
//! Files are named after the entry's own timestamp, one per day or per hour:
//! `<dir>/<name>.2024-05-01.log` or `<dir>/<name>.2024-05-01-13.log`. The open
//! handle is kept while consecutive entries fall into the same bucket.

use super::{Sink, SinkKind};
use crate::core::{FileConfig, Formatter, LogEntry, LoggerError, Result, RotationMode};
use crate::core::config::DEFAULT_LOG_PATH;
use chrono::{DateTime, FixedOffset};
use std::env;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// File sink that rotates by calendar day or hour
///
/// # Examples
///
/// ```no_run
/// use fanlog::{FileConfig, Formatter, RotationMode};
/// use fanlog::sinks::FileSink;
///
/// let config = FileConfig::new("svc", "$HOME/logs", RotationMode::Hourly);
/// let sink = FileSink::new("svc", &config, Formatter::standard());
/// ```
pub struct FileSink {
    name: String,
    log_path: PathBuf,
    rotation: RotationMode,
    formatter: Formatter,
    current_path: Option<PathBuf>,
    file: Option<File>,
    open_count: usize,
}

impl FileSink {
    /// Create the sink and its directory tree
    ///
    /// `default_name` is used when the config has no file name. A directory
    /// that cannot be created is reported on stderr; the writes that follow
    /// will fail and be discarded.
    pub fn new(default_name: &str, config: &FileConfig, formatter: Formatter) -> Self {
        let name = config
            .file_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(default_name)
            .to_string();
        let raw_path = config
            .log_path
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or(DEFAULT_LOG_PATH);
        let log_path = resolve_log_path(raw_path);

        if let Err(e) = fs::create_dir_all(&log_path) {
            eprintln!(
                "[LOGGER WARNING] Failed to create log directory '{}': {}",
                log_path.display(),
                e
            );
        }

        Self {
            name,
            log_path,
            rotation: config.rotation,
            formatter,
            current_path: None,
            file: None,
            open_count: 0,
        }
    }

    /// Absolute directory the files are written to
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Path of the file that holds entries stamped with `timestamp`
    pub fn generated_file_name(&self, timestamp: &DateTime<FixedOffset>) -> PathBuf {
        generated_file_name(&self.log_path, &self.name, self.rotation, timestamp)
    }

    /// Path of the currently open file, if any
    pub fn current_path(&self) -> Option<&Path> {
        self.current_path.as_deref()
    }

    /// Number of files opened so far
    pub fn open_count(&self) -> usize {
        self.open_count
    }

    fn open(&mut self, path: PathBuf) -> Result<()> {
        // Release the previous bucket's handle before opening the next one.
        self.file = None;
        self.current_path = None;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| LoggerError::io_operation("opening log file", path.display().to_string(), e))?;
        self.open_count += 1;
        self.current_path = Some(path);
        self.file = Some(file);
        Ok(())
    }
}

impl Sink for FileSink {
    fn write(&mut self, entry: &LogEntry) -> Result<usize> {
        let target = self.generated_file_name(&entry.timestamp);

        if self.file.is_none() || self.current_path.as_ref() != Some(&target) {
            self.open(target)?;
        }

        let file = self
            .file
            .as_mut()
            .ok_or_else(|| LoggerError::writer("Log file not open"))?;
        let output = self.formatter.format_entry(entry);
        file.write_all(output.as_bytes())?;
        Ok(output.len())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut file) = self.file {
            file.flush()?;
        }
        Ok(())
    }

    fn kind(&self) -> SinkKind {
        SinkKind::File
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

/// File name for an entry, as a pure function of its inputs
pub fn generated_file_name(
    log_path: &Path,
    name: &str,
    rotation: RotationMode,
    timestamp: &DateTime<FixedOffset>,
) -> PathBuf {
    let bucket = match rotation {
        RotationMode::Daily => timestamp.format("%Y-%m-%d"),
        RotationMode::Hourly => timestamp.format("%Y-%m-%d-%H"),
    };
    log_path.join(format!("{}.{}.log", name, bucket))
}

/// Expand environment references and make the path absolute
///
/// Relative paths are joined to the working directory, or to `$HOME` when
/// the working directory cannot be determined.
pub fn resolve_log_path(raw: &str) -> PathBuf {
    let expanded = PathBuf::from(expand_env(raw));
    if expanded.is_absolute() {
        return expanded;
    }

    match env::current_dir() {
        Ok(cwd) => cwd.join(expanded),
        Err(_) => PathBuf::from(env::var("HOME").unwrap_or_default()).join(expanded),
    }
}

/// Replace `$VAR` and `${VAR}` with their values; unset variables expand to
/// nothing
fn expand_env(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        if let Some(braced) = after.strip_prefix('{') {
            if let Some(end) = braced.find('}') {
                out.push_str(&env::var(&braced[..end]).unwrap_or_default());
                rest = &braced[end + 1..];
                continue;
            }
            out.push('$');
            rest = after;
            continue;
        }

        let len = after
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(after.len());
        if len == 0 {
            out.push('$');
        } else {
            out.push_str(&env::var(&after[..len]).unwrap_or_default());
        }
        rest = &after[len..];
    }

    out.push_str(rest);
    out
}
