//! # Runtime events emitted by the hub.
//!
//! The [`EventKind`] enum classifies events across three categories:
//! - **Registry events**: subscriptions accepted or rejected
//! - **Sensor events**: ready signals raised and serviced
//! - **Dispatch events**: pass start/end and handler faults
//!
//! plus observer housekeeping (panics, overflow).
//!
//! The ISR never publishes: it runs in interrupt context where the bus (which may
//! lock internally) is off limits. `IsrServiced` is published by the service loop
//! after the ISR returned.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//!
//! ## Example
//! ```rust
//! use sensor_hub::{Event, EventKind, SensorKind};
//!
//! let ev = Event::new(EventKind::HandlerFaulted)
//!     .with_handler("logger")
//!     .with_sensor(SensorKind::Temp)
//!     .with_index(2)
//!     .with_reason("boom");
//!
//! assert_eq!(ev.kind, EventKind::HandlerFaulted);
//! assert_eq!(ev.handler.as_deref(), Some("logger"));
//! assert_eq!(ev.sensor, Some(SensorKind::Temp));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

use crate::sensors::SensorKind;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Registry events ===
    /// A subscription was accepted.
    ///
    /// Sets:
    /// - `handler`: handler name
    /// - `sensor`: subscribed kind
    /// - `index`: insertion index
    SubscriptionAdded,

    /// A subscription was rejected because the registry is full.
    ///
    /// Sets:
    /// - `handler`: handler name
    /// - `sensor`: requested kind
    /// - `count`: registry capacity
    RegistryFull,

    // === Sensor events ===
    /// A ready bit was raised (simulated hardware).
    ///
    /// Sets:
    /// - `sensor`: kind
    ReadyRaised,

    /// The service loop ran the ISR for a kind.
    ///
    /// Sets:
    /// - `sensor`: kind
    IsrServiced,

    // === Dispatch events ===
    /// A dispatch pass took its registry and snapshot copies.
    ///
    /// Sets:
    /// - `pass`: pass number (1-based, per hub)
    /// - `count`: subscriptions to notify
    DispatchStarted,

    /// A handler panicked during a pass.
    ///
    /// Sets:
    /// - `pass`, `handler`, `sensor`, `index`
    /// - `reason`: panic message
    HandlerFaulted,

    /// All workers of a pass were joined.
    ///
    /// Sets:
    /// - `pass`: pass number
    /// - `count`: handlers that completed normally
    /// - `reason`: `faults=N` if any handler faulted
    DispatchCompleted,

    /// The service loop observed cancellation and exited.
    ServiceStopped,

    // === Observer events ===
    /// An observer panicked while processing an event.
    ///
    /// Sets:
    /// - `handler`: observer name
    /// - `reason`: panic info
    ObserverPanicked,

    /// An observer dropped an event (queue full or worker closed).
    ///
    /// Sets:
    /// - `handler`: observer name
    /// - `reason`: `full` or `closed`
    ObserverOverflow,
}

/// Runtime event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Sensor kind, if applicable.
    pub sensor: Option<SensorKind>,
    /// Handler (or observer) name, if applicable.
    pub handler: Option<Arc<str>>,
    /// Subscription insertion index.
    pub index: Option<usize>,
    /// Dispatch pass number.
    pub pass: Option<u64>,
    /// Event-specific count (subscriptions, capacity, completed handlers).
    pub count: Option<usize>,
    /// Human-readable reason (panic messages, overflow details, etc.).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            sensor: None,
            handler: None,
            index: None,
            pass: None,
            count: None,
            reason: None,
        }
    }

    /// Attaches a sensor kind.
    #[inline]
    pub fn with_sensor(mut self, kind: SensorKind) -> Self {
        self.sensor = Some(kind);
        self
    }

    /// Attaches a handler or observer name.
    #[inline]
    pub fn with_handler(mut self, name: impl Into<Arc<str>>) -> Self {
        self.handler = Some(name.into());
        self
    }

    /// Attaches a subscription index.
    #[inline]
    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    /// Attaches a dispatch pass number.
    #[inline]
    pub fn with_pass(mut self, pass: u64) -> Self {
        self.pass = Some(pass);
        self
    }

    /// Attaches a count.
    #[inline]
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Creates an observer overflow event.
    #[inline]
    pub fn observer_overflow(observer: &'static str, reason: &'static str) -> Self {
        Event::new(EventKind::ObserverOverflow)
            .with_handler(observer)
            .with_reason(reason)
    }

    /// Creates an observer panic event.
    #[inline]
    pub fn observer_panicked(observer: &'static str, info: String) -> Self {
        Event::new(EventKind::ObserverPanicked)
            .with_handler(observer)
            .with_reason(info)
    }

    /// True for [`EventKind::ObserverOverflow`]; such events are never re-reported.
    #[inline]
    pub fn is_observer_overflow(&self) -> bool {
        matches!(self.kind, EventKind::ObserverOverflow)
    }
}
