//! Sink trait and the built-in sinks

pub mod console;
pub mod file;
pub mod remote;

pub use console::ConsoleSink;
pub use file::FileSink;
pub use remote::{RemoteRequest, RemoteSink, ReqwestTransport, Transport};

use crate::core::{LogEntry, Result};

/// Which kind of destination a sink writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SinkKind {
    Console,
    File,
    Remote,
    Custom,
}

/// A destination for log entries
///
/// The dispatcher calls `write` from a single worker thread, so a sink is
/// never written to concurrently and needs no internal locking for it.
/// Errors returned from `write` are discarded by the dispatcher.
pub trait Sink: Send {
    /// Render and deliver one entry, returning the number of bytes written
    fn write(&mut self, entry: &LogEntry) -> Result<usize>;

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn kind(&self) -> SinkKind {
        SinkKind::Custom
    }
}
