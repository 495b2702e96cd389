//! Bounded entry queue with a single consumer thread that fans every entry
//! out to all sinks
//!
//! Producers block while the queue is full. Closing stops the consumer,
//! then delivers whatever is still queued on the closing thread before the
//! sinks are dropped.

use super::error::{LoggerError, Result};
use super::log_entry::LogEntry;
use crate::sinks::Sink;
use crossbeam_channel::{bounded, select, Receiver, Sender};
use parking_lot::{Mutex, RwLock};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::thread::{self, JoinHandle};
use std::time::Duration;

type Sinks = Vec<Box<dyn Sink>>;

enum State {
    Idle {
        receiver: Receiver<LogEntry>,
        sinks: Sinks,
    },
    Running {
        receiver: Receiver<LogEntry>,
        cancel: Sender<()>,
        handle: JoinHandle<Sinks>,
    },
    Closed,
}

pub struct Dispatcher {
    sender: RwLock<Option<Sender<LogEntry>>>,
    capacity: usize,
    state: Mutex<State>,
}

impl Dispatcher {
    /// Create a dispatcher that has not started consuming yet
    ///
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize, sinks: Sinks) -> Self {
        let capacity = capacity.max(1);
        let (sender, receiver) = bounded(capacity);
        Self {
            sender: RwLock::new(Some(sender)),
            capacity,
            state: Mutex::new(State::Idle { receiver, sinks }),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entries waiting in the queue
    pub fn queued(&self) -> usize {
        self.sender.read().as_ref().map_or(0, Sender::len)
    }

    pub fn is_closed(&self) -> bool {
        matches!(*self.state.lock(), State::Closed)
    }

    /// Launch the consumer thread
    ///
    /// Starting an already running dispatcher does nothing; starting a closed
    /// one fails with [`LoggerError::LoggerStopped`].
    pub fn start(&self) -> Result<()> {
        let mut state = self.state.lock();
        match std::mem::replace(&mut *state, State::Closed) {
            State::Idle { receiver, sinks } => {
                let (cancel, cancelled) = bounded::<()>(1);
                let queue = receiver.clone();
                let handle = thread::Builder::new()
                    .name("fanlog-dispatcher".to_string())
                    .spawn(move || consume(queue, cancelled, sinks))
                    .map_err(|e| LoggerError::io_operation("starting dispatcher", "fanlog-dispatcher", e))?;
                *state = State::Running {
                    receiver,
                    cancel,
                    handle,
                };
                Ok(())
            }
            running @ State::Running { .. } => {
                *state = running;
                Ok(())
            }
            State::Closed => Err(LoggerError::LoggerStopped),
        }
    }

    /// Queue an entry, blocking while the queue is full
    pub fn enqueue(&self, entry: LogEntry) -> Result<()> {
        let sender = self.sender.read();
        match sender.as_ref() {
            Some(sender) => sender.send(entry).map_err(|_| LoggerError::LoggerStopped),
            None => Err(LoggerError::LoggerStopped),
        }
    }

    /// Stop the consumer, deliver everything still queued, release the sinks
    ///
    /// Every `enqueue` that returned `Ok` before this call returns has been
    /// offered to every sink. Later calls are no-ops.
    pub fn close(&self) {
        let mut state = self.state.lock();
        let (receiver, mut sinks) = match std::mem::replace(&mut *state, State::Closed) {
            State::Idle { receiver, sinks } => (receiver, sinks),
            State::Running {
                receiver,
                cancel,
                handle,
            } => {
                drop(cancel);
                match handle.join() {
                    Ok(sinks) => (receiver, sinks),
                    Err(_) => {
                        eprintln!("[LOGGER ERROR] Dispatcher thread panicked; queued entries are lost");
                        (receiver, Vec::new())
                    }
                }
            }
            State::Closed => return,
        };

        // Producers blocked on a full queue hold the read lock, so keep
        // draining until the sender can be taken away from them.
        loop {
            for entry in receiver.try_iter() {
                dispatch(&mut sinks, &entry);
            }
            if let Some(mut sender) = self.sender.try_write_for(Duration::from_millis(1)) {
                sender.take();
                break;
            }
        }
        for entry in receiver.try_iter() {
            dispatch(&mut sinks, &entry);
        }

        for sink in sinks.iter_mut() {
            let _ = catch_unwind(AssertUnwindSafe(|| sink.flush()));
        }
    }
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        self.close();
    }
}

fn consume(queue: Receiver<LogEntry>, cancelled: Receiver<()>, mut sinks: Sinks) -> Sinks {
    loop {
        select! {
            recv(queue) -> msg => match msg {
                Ok(entry) => dispatch(&mut sinks, &entry),
                Err(_) => break,
            },
            recv(cancelled) -> _ => break,
        }
    }
    sinks
}

/// Offer one entry to every sink
///
/// Sink errors are discarded. A panicking sink is reported on stderr and does
/// not keep the entry from the remaining sinks.
fn dispatch(sinks: &mut Sinks, entry: &LogEntry) {
    for (idx, sink) in sinks.iter_mut().enumerate() {
        let result = catch_unwind(AssertUnwindSafe(|| sink.write(entry)));
        if let Err(panic_info) = result {
            let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = panic_info.downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic".to_string()
            };
            eprintln!(
                "[LOGGER CRITICAL] Sink #{} ({:?}) panicked: {}. Other sinks continue to function.",
                idx,
                sink.kind(),
                panic_msg
            );
        }
    }
}
