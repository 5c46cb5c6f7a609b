//! One-shot connect timer.
//!
//! Entering `connecting` schedules a deferred `ConnectReady` event. The
//! returned [`TimerHandle`] cancels it; a cancelled timer never posts.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::event::Event;
use crate::state::ConnectTicket;

/// Cancellation handle for a scheduled connect.
#[derive(Clone, Debug, Default)]
pub struct TimerHandle {
    cancelled: Arc<AtomicBool>,
}

impl TimerHandle {
    /// Fresh, uncancelled handle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Prevent the timer from firing.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether [`cancel`](Self::cancel) was called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Schedules the deferred `connecting → connected` step.
pub trait ConnectScheduler {
    /// Arrange for `ticket` to be delivered after `delay`.
    fn schedule(&mut self, ticket: ConnectTicket, delay: Duration) -> TimerHandle;
}

/// Scheduler that sleeps on a short-lived thread and posts onto the event channel.
pub struct ThreadScheduler {
    sender: Sender<Event>,
}

impl ThreadScheduler {
    /// Scheduler posting onto `sender`.
    #[must_use]
    pub fn new(sender: Sender<Event>) -> Self {
        Self { sender }
    }
}

impl ConnectScheduler for ThreadScheduler {
    fn schedule(&mut self, ticket: ConnectTicket, delay: Duration) -> TimerHandle {
        let handle = TimerHandle::new();
        let flag = handle.clone();
        let sender = self.sender.clone();

        thread::spawn(move || {
            thread::sleep(delay);
            if !flag.is_cancelled() {
                // Receiver gone means the app is shutting down
                let _ = sender.send(Event::ConnectReady(ticket));
            }
        });

        handle
    }
}

/// Scheduler that records requests instead of running them.
///
/// Used by headless callers and tests that drive the clock themselves.
#[derive(Default)]
pub struct ManualScheduler {
    /// Every request made so far, oldest first.
    pub scheduled: Vec<(ConnectTicket, Duration, TimerHandle)>,
}

impl ManualScheduler {
    /// Most recent request that has not been cancelled.
    #[must_use]
    pub fn last_live(&self) -> Option<ConnectTicket> {
        self.scheduled
            .iter()
            .rev()
            .find(|(_, _, handle)| !handle.is_cancelled())
            .map(|(ticket, _, _)| *ticket)
    }
}

impl ConnectScheduler for ManualScheduler {
    fn schedule(&mut self, ticket: ConnectTicket, delay: Duration) -> TimerHandle {
        let handle = TimerHandle::new();
        self.scheduled.push((ticket, delay, handle.clone()));
        handle
    }
}
