//! # Event bus for hub runtime events.
//!
//! [`Bus`] wraps [`tokio::sync::broadcast`] so that registration, the service loop
//! and dispatch passes can publish from any thread without blocking.
//!
//! ```text
//! Publishers:                             Consumer:
//!   Hub::register ──┐
//!   service loop  ──┼──► Bus ──► observer listener ──► ObserverSet
//!   Dispatcher    ──┘  (broadcast)
//! ```
//!
//! ## Rules
//! - `publish()` never blocks and never fails; with no receivers the event is dropped.
//! - One ring buffer of `capacity` events shared by all receivers; laggards see
//!   `RecvError::Lagged(n)` and skip `n` events.
//! - Not for interrupt context: `broadcast::Sender::send` may take an internal lock.

use tokio::sync::broadcast;

use super::event::Event;

/// Broadcast channel for hub events. Cheap to clone.
#[derive(Clone, Debug)]
pub struct Bus {
    tx: broadcast::Sender<Event>,
}

impl Bus {
    /// Creates a new bus; capacity is clamped to at least 1.
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel::<Event>(capacity.max(1));
        Self { tx }
    }

    /// Publishes an event to all current receivers.
    pub fn publish(&self, ev: Event) {
        let _ = self.tx.send(ev);
    }

    /// Creates a receiver for events published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }
}
