use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

pub const IDLE_STATUS: &str = "Active";

/// Sink for the transient status line and the character count.
///
/// Calls are fire-and-forget. Implementations must be shareable with the
/// revert timer thread.
pub trait StatusNotifier: Send + Sync {
    fn report_character_count(&self, count: usize);
    fn report_status(&self, message: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub message: String,
    pub character_count: usize,
}

/// Status bar model read by the front-end when it repaints.
#[derive(Debug)]
pub struct StatusBar {
    line: Mutex<StatusLine>,
}

impl StatusBar {
    pub fn new() -> Self {
        Self {
            line: Mutex::new(StatusLine {
                message: IDLE_STATUS.to_string(),
                character_count: 0,
            }),
        }
    }

    pub fn snapshot(&self) -> StatusLine {
        match self.line.lock() {
            Ok(line) => line.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn status_label(&self) -> String {
        format!("Status: {}", self.snapshot().message)
    }

    pub fn count_label(&self) -> String {
        format!("Character Count: {}", self.snapshot().character_count)
    }

    fn with_line(&self, f: impl FnOnce(&mut StatusLine)) {
        match self.line.lock() {
            Ok(mut line) => f(&mut line),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusNotifier for StatusBar {
    fn report_character_count(&self, count: usize) {
        self.with_line(|line| line.character_count = count);
    }

    fn report_status(&self, message: &str) {
        self.with_line(|line| line.message = message.to_string());
    }
}

/// Identifies one scheduled revert; stale tickets are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevertTicket(u64);

/// Shows a transient message and puts the idle status back after a delay.
///
/// Every announcement supersedes the previous one: an older timer that
/// fires after a newer announcement does nothing.
#[derive(Clone)]
pub struct StatusReverter {
    status: Arc<dyn StatusNotifier>,
    generation: Arc<AtomicU64>,
    delay: Duration,
}

impl StatusReverter {
    pub fn new(status: Arc<dyn StatusNotifier>, delay: Duration) -> Self {
        Self {
            status,
            generation: Arc::new(AtomicU64::new(0)),
            delay,
        }
    }

    /// Display `message` now without scheduling anything.
    pub fn announce(&self, message: &str) -> RevertTicket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.status.report_status(message);
        RevertTicket(generation)
    }

    /// Display `message` and revert to idle once the delay has passed.
    pub fn announce_transient(&self, message: &str) -> RevertTicket {
        let ticket = self.announce(message);
        let this = self.clone();
        thread::spawn(move || {
            thread::sleep(this.delay);
            this.revert(ticket);
        });
        ticket
    }

    /// Restore the idle status if `ticket` is still the latest announcement.
    /// Returns whether the status changed.
    pub fn revert(&self, ticket: RevertTicket) -> bool {
        if self.generation.load(Ordering::SeqCst) != ticket.0 {
            tracing::debug!("Skipping stale status revert {:?}", ticket);
            return false;
        }
        self.status.report_status(IDLE_STATUS);
        true
    }
}
