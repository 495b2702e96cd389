//! Console sink implementation

use super::{Sink, SinkKind};
use crate::core::{Formatter, LogEntry, Result};
use std::io::{self, Write};

/// Writes formatted entries to standard output, or to any writer given with
/// [`ConsoleSink::with_writer`]
pub struct ConsoleSink {
    formatter: Formatter,
    writer: Box<dyn Write + Send>,
}

impl ConsoleSink {
    pub fn new(formatter: Formatter) -> Self {
        Self {
            formatter,
            writer: Box::new(io::stdout()),
        }
    }

    pub fn with_writer(formatter: Formatter, writer: Box<dyn Write + Send>) -> Self {
        Self { formatter, writer }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new(Formatter::standard())
    }
}

impl Sink for ConsoleSink {
    fn write(&mut self, entry: &LogEntry) -> Result<usize> {
        let output = self.formatter.format_entry(entry);
        self.writer.write_all(output.as_bytes())?;
        Ok(output.len())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn kind(&self) -> SinkKind {
        SinkKind::Console
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LogLevel;
    use chrono::{FixedOffset, TimeZone};
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn entry(message: &str) -> LogEntry {
        let ts = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 1, 2, 3, 4, 5)
            .unwrap();
        LogEntry::new(ts, LogLevel::Info, message, Vec::new())
    }

    #[test]
    fn test_writes_formatted_output() {
        let buffer = SharedBuffer::default();
        let mut sink = ConsoleSink::with_writer(Formatter::standard(), Box::new(buffer.clone()));

        let written = sink.write(&entry("ready")).unwrap();

        let output = String::from_utf8(buffer.0.lock().clone()).unwrap();
        assert_eq!(output, "03:04:05.000 [ INFO] ready\n");
        assert_eq!(written, output.len());
        assert_eq!(sink.kind(), SinkKind::Console);
    }

    #[test]
    fn test_write_error_is_returned() {
        let mut sink = ConsoleSink::with_writer(Formatter::standard(), Box::new(BrokenPipe));
        assert!(sink.write(&entry("lost")).is_err());
    }
}
