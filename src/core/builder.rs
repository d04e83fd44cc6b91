use std::sync::Arc;

use crate::{
    config::Config,
    events::Bus,
    observers::{Observe, ObserverSet},
    sensors::{FixedReader, SensorReader},
};

use super::{
    hub::Hub, isr::Isr, ready::ReadyRegister, registry::Registry, store::SnapshotStore,
};

/// Builder for constructing a [`Hub`] with optional collaborators.
pub struct HubBuilder {
    cfg: Config,
    reader: Option<Arc<dyn SensorReader>>,
    observers: Vec<Arc<dyn Observe>>,
}

impl HubBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            reader: None,
            observers: Vec::new(),
        }
    }

    /// Sets the sensor read routines used by the ISR.
    ///
    /// Defaults to [`FixedReader::default`].
    pub fn with_reader(mut self, reader: Arc<dyn SensorReader>) -> Self {
        self.reader = Some(reader);
        self
    }

    /// Sets event observers for logging/metrics.
    ///
    /// Observers receive hub events through dedicated workers with bounded queues.
    /// A non-empty list requires [`build`](Self::build) to run inside a Tokio runtime.
    pub fn with_observers(mut self, observers: Vec<Arc<dyn Observe>>) -> Self {
        self.observers = observers;
        self
    }

    /// Builds the hub.
    ///
    /// Allocates every fixed-size structure up front:
    /// - Event bus
    /// - Registry table (`max_subscriptions` slots)
    /// - Ready register and snapshot store
    /// - Observer workers and their bus listener (if any observers)
    pub fn build(self) -> Arc<Hub> {
        let bus = Bus::new(self.cfg.bus_capacity_clamped());
        let has_observers = !self.observers.is_empty();
        let observers = Arc::new(ObserverSet::new(self.observers, bus.clone()));
        if has_observers {
            observer_listener(&bus, Arc::clone(&observers));
        }

        let registry = Arc::new(Registry::new(self.cfg.max_subscriptions));
        let ready = Arc::new(ReadyRegister::new());
        let store = Arc::new(SnapshotStore::new());
        let reader = self
            .reader
            .unwrap_or_else(|| Arc::new(FixedReader::default()) as Arc<dyn SensorReader>);
        let isr = Isr::new(Arc::clone(&ready), Arc::clone(&store), reader);

        Arc::new(Hub::new_internal(
            self.cfg, bus, registry, ready, store, isr, observers,
        ))
    }
}

/// Subscribes to the bus and forwards events to the observer set (fire-and-forget).
fn observer_listener(bus: &Bus, set: Arc<ObserverSet>) {
    let mut rx = bus.subscribe();
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(ev) => set.emit(&ev),
                Err(tokio::sync::broadcast::error::RecvError::Lagged(_)) => continue,
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            }
        }
    });
}
