//! # Interrupt service routine.
//!
//! [`Isr`] is the entry the platform interrupt vector (or, on a hosted build, a
//! driver thread) calls when a sensor's ready bit is asserted.
//!
//! ```text
//! isr(kind):
//!   1. ready.clear(kind)
//!   2. reader.read_<kind>() ──► Ok(v)  ──► store.write_<kind>(v)
//!                           └─► Err(_) ──► store.write_sentinel(kind)
//!   3. return  (no handlers, no events, no locks, no allocation)
//! ```
//!
//! The handle is cheap to clone and can be moved into whatever context services
//! interrupts. It only touches the ready register and its own kind's store slot.

use std::sync::Arc;

use crate::sensors::{GpsText, SensorKind, SensorReader};

use super::{ready::ReadyRegister, store::SnapshotStore};

/// Cloneable ISR entry point.
#[derive(Clone)]
pub struct Isr {
    ready: Arc<ReadyRegister>,
    store: Arc<SnapshotStore>,
    reader: Arc<dyn SensorReader>,
}

impl Isr {
    pub(crate) fn new(
        ready: Arc<ReadyRegister>,
        store: Arc<SnapshotStore>,
        reader: Arc<dyn SensorReader>,
    ) -> Self {
        Self {
            ready,
            store,
            reader,
        }
    }

    /// Services the interrupt for `kind`. Infallible.
    pub fn service(&self, kind: SensorKind) {
        self.ready.clear(kind);

        let ok = match kind {
            SensorKind::Temp => self.reader.read_temp().map(|t| self.store.write_temp(t)),
            SensorKind::Acc => self.reader.read_acc().map(|a| self.store.write_acc(a)),
            SensorKind::Gps => {
                let mut text = GpsText::new();
                self.reader
                    .read_gps(&mut text)
                    .map(|()| self.store.write_gps(&text))
            }
        }
        .is_ok();

        if !ok {
            self.store.write_sentinel(kind);
        }
    }
}
