//! Inbound input queue.
//!
//! Inputs are produced by:
//! - the HTTP control endpoint (commands)
//! - the message-bus callback (pest verdicts, particulate readings)
//! - the backend command pull (commands)
//!
//! and consumed by the single control loop, which applies them one at a
//! time in FIFO order.
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ HTTP        │────▶│              │     │              │
//! │ Bus         │────▶│    Inbox     │────▶│ Control Loop │
//! │ Poll        │────▶│  (bounded)   │     │  (consumer)  │
//! └─────────────┘     └──────────────┘     └──────────────┘
//! ```
//!
//! Backed by an `embassy-sync` bounded MPMC channel so producers on any
//! thread can push without heap allocation; a full queue drops the input
//! and reports [`QueueError::Full`] to the producer.

use core::sync::atomic::{AtomicU32, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel as Queue;
use log::warn;

use crate::app::commands::Command;
use crate::error::QueueError;
use crate::sensors::ParticulateUpdate;

/// Maximum number of pending inputs.
pub const INBOX_DEPTH: usize = 16;

/// One queued input for the control loop.
#[derive(Debug, Clone, PartialEq)]
pub enum Inbound {
    /// A decoded command from any channel.
    Command(Command),
    /// A particulate reading from the bus.
    Particulate(ParticulateUpdate),
}

pub struct Inbox {
    queue: Queue<CriticalSectionRawMutex, Inbound, INBOX_DEPTH>,
    dropped: AtomicU32,
}

impl Default for Inbox {
    fn default() -> Self {
        Self::new()
    }
}

impl Inbox {
    pub const fn new() -> Self {
        Self {
            queue: Queue::new(),
            dropped: AtomicU32::new(0),
        }
    }

    /// Enqueue an input. Safe to call from any producer thread.
    pub fn push(&self, item: Inbound) -> Result<(), QueueError> {
        self.queue.try_send(item).map_err(|_| {
            let n = self.dropped.fetch_add(1, Ordering::Relaxed) + 1;
            warn!("Inbox full, input dropped ({} total)", n);
            QueueError::Full
        })
    }

    /// Dequeue the oldest input. Called from the control loop only.
    pub fn pop(&self) -> Option<Inbound> {
        self.queue.try_receive().ok()
    }

    /// Drain all pending inputs into a handler, in FIFO order.
    /// Returns the number handled.
    pub fn drain(&self, mut handler: impl FnMut(Inbound)) -> usize {
        let mut n = 0;
        while let Some(item) = self.pop() {
            handler(item);
            n += 1;
        }
        n
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Inputs dropped because the queue was full.
    pub fn dropped_count(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }
}
