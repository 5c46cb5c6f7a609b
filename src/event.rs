//! Terminal event handling for the TUI.
//!
//! This module provides an event loop that handles keyboard input, terminal resize
//! events, and periodic tick events for UI updates. Events are processed in a
//! background thread and delivered through a channel. The connect timer posts
//! onto the same channel, so every state change is applied on the UI thread.

use color_eyre::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crate::state::ConnectTicket;

/// Events that drive the application.
#[derive(Debug)]
pub enum Event {
    /// Keyboard input event.
    Key(KeyEvent),
    /// Terminal window resize event.
    Resize(u16, u16),
    /// Periodic tick for UI updates.
    Tick,
    /// The simulated connect delay for an attempt elapsed.
    ConnectReady(ConnectTicket),
}

/// Handles terminal events in a background thread.
///
/// Spawns a thread that polls for terminal events and sends them through
/// a channel. Also generates periodic tick events for time-based updates.
pub struct EventHandler {
    sender: mpsc::Sender<Event>,
    receiver: mpsc::Receiver<Event>,
    #[allow(dead_code)]
    handler: thread::JoinHandle<()>,
}

impl EventHandler {
    /// Creates a new event handler with the specified tick rate.
    ///
    /// # Arguments
    ///
    /// * `tick_rate_ms` - Milliseconds between tick events
    #[must_use]
    pub fn new(tick_rate_ms: u64) -> Self {
        let tick_rate = Duration::from_millis(tick_rate_ms);
        let (sender, receiver) = mpsc::channel();
        let poll_sender = sender.clone();

        let handler = thread::spawn(move || {
            let sender = poll_sender;
            let mut last_tick = Instant::now();
            loop {
                let timeout = tick_rate
                    .checked_sub(last_tick.elapsed())
                    .unwrap_or(Duration::ZERO);

                if event::poll(timeout).unwrap_or(false) {
                    if let Ok(evt) = event::read() {
                        let forwarded = match evt {
                            // Ignore key release/repeat reports on platforms that send them
                            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                                Some(Event::Key(key))
                            }
                            CrosstermEvent::Resize(w, h) => Some(Event::Resize(w, h)),
                            _ => None,
                        };
                        if let Some(evt) = forwarded {
                            if sender.send(evt).is_err() {
                                return;
                            }
                        }
                    }
                }

                if last_tick.elapsed() >= tick_rate {
                    if sender.send(Event::Tick).is_err() {
                        return;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        Self {
            sender,
            receiver,
            handler,
        }
    }

    /// A sender that posts onto this handler's channel.
    #[must_use]
    pub fn sender(&self) -> mpsc::Sender<Event> {
        self.sender.clone()
    }

    /// Blocks until the next event is available.
    ///
    /// # Errors
    ///
    /// Returns an error if the event channel is disconnected.
    pub fn next(&self) -> Result<Event> {
        Ok(self.receiver.recv()?)
    }
}
