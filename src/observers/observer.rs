//! # Observer: hook into hub runtime events
//!
//! [`Observe`] is the extension point for plugging logging, metrics or alerting into
//! the hub. Every [`Event`] published on the bus reaches each observer through a
//! dedicated worker fed by a bounded queue owned by the
//! [`ObserverSet`](crate::ObserverSet).
//!
//! ## Contract
//! - Observers may be slow; they never block the publisher, the ISR or other observers.
//! - Each observer declares its queue capacity via [`Observe::queue_capacity`]. On
//!   overflow the event is dropped for that observer and `ObserverOverflow` is published.
//!
//! ## Example
//! ```rust
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use async_trait::async_trait;
//! use sensor_hub::{Event, EventKind, Observe};
//!
//! #[derive(Default)]
//! struct FaultCounter(AtomicUsize);
//!
//! #[async_trait]
//! impl Observe for FaultCounter {
//!     async fn on_event(&self, ev: &Event) {
//!         if ev.kind == EventKind::HandlerFaulted {
//!             self.0.fetch_add(1, Ordering::Relaxed);
//!         }
//!     }
//!     fn name(&self) -> &'static str { "fault-counter" }
//! }
//! ```

use async_trait::async_trait;

use crate::events::Event;

/// Contract for event observers.
///
/// Called from an observer-dedicated worker task. Implementations should avoid
/// blocking the async runtime.
#[async_trait]
pub trait Observe: Send + Sync + 'static {
    /// Handle a single event.
    async fn on_event(&self, event: &Event);

    /// Human-readable name (for logs/metrics).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Preferred capacity of this observer's queue.
    fn queue_capacity(&self) -> usize {
        1024
    }
}
