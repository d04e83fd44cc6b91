//! # LogWriter: forwards hub events to `tracing`
//!
//! A minimal observer that logs every incoming [`Event`] with structured fields.
//! Install any `tracing` subscriber to see the output.
//!
//! ## Example output (fmt subscriber)
//! ```text
//! INFO  subscription added handler="thermostat" sensor=temp index=0
//! WARN  registry full handler="late" sensor=temp capacity=10
//! DEBUG ready raised sensor=acc
//! DEBUG isr serviced sensor=acc
//! DEBUG dispatch started pass=1 subscriptions=3
//! ERROR handler faulted pass=1 handler="flaky" sensor=gps index=2 reason="boom"
//! INFO  dispatch completed pass=1 completed=2 faults=Some("faults=1")
//! ```

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use crate::events::{Event, EventKind};

use super::Observe;

/// Event writer observer.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Observe for LogWriter {
    async fn on_event(&self, e: &Event) {
        let handler = e.handler.as_deref().unwrap_or("-");
        let sensor = e.sensor.map(|k| k.as_label()).unwrap_or("-");
        match e.kind {
            EventKind::SubscriptionAdded => {
                info!(seq = e.seq, handler, sensor, index = ?e.index, "subscription added");
            }
            EventKind::RegistryFull => {
                warn!(seq = e.seq, handler, sensor, capacity = ?e.count, "registry full");
            }
            EventKind::ReadyRaised => {
                debug!(seq = e.seq, sensor, "ready raised");
            }
            EventKind::IsrServiced => {
                debug!(seq = e.seq, sensor, "isr serviced");
            }
            EventKind::DispatchStarted => {
                debug!(seq = e.seq, pass = ?e.pass, subscriptions = ?e.count, "dispatch started");
            }
            EventKind::HandlerFaulted => {
                error!(
                    seq = e.seq,
                    pass = ?e.pass,
                    handler,
                    sensor,
                    index = ?e.index,
                    reason = e.reason.as_deref().unwrap_or("unknown"),
                    "handler faulted"
                );
            }
            EventKind::DispatchCompleted => {
                info!(
                    seq = e.seq,
                    pass = ?e.pass,
                    completed = ?e.count,
                    faults = ?e.reason,
                    "dispatch completed"
                );
            }
            EventKind::ServiceStopped => {
                info!(seq = e.seq, "service loop stopped");
            }
            EventKind::ObserverPanicked => {
                error!(
                    seq = e.seq,
                    observer = handler,
                    info = e.reason.as_deref().unwrap_or("unknown"),
                    "observer panicked"
                );
            }
            EventKind::ObserverOverflow => {
                warn!(
                    seq = e.seq,
                    observer = handler,
                    reason = e.reason.as_deref().unwrap_or("unknown"),
                    "observer dropped event"
                );
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
