//! # Hub: owns the ready register, snapshot store, registry and dispatcher.
//!
//! The [`Hub`] is the public face of the crate. It wires the ISR, the registry and
//! the dispatcher to one event bus and exposes the operations clients, platform glue
//! and schedulers need.
//!
//! ## High-level architecture
//! ```text
//! hardware stub ── notify_ready(kind) ──► ReadyRegister
//!                                             │
//! interrupt vector / service loop ── isr(kind)┘──► SnapshotStore[kind]
//!
//! clients ── register(handler, kind) ──► Registry
//!
//! scheduler ── dispatch() ──► Registry ⨯ SnapshotStore ──► worker per handler
//!
//! run(token): every poll_interval
//!   ├─► service_pending(): isr(kind) for each ready bit, publish IsrServiced
//!   └─► dispatch() if anything was serviced (or dispatch_when_idle)
//! ```
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use sensor_hub::{Config, HandlerFn, Hub, SensorKind, SensorValue};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let hub = Hub::builder(Config::default()).build();
//!
//!     hub.register(
//!         HandlerFn::arc("thermostat", |v: SensorValue| println!("temp: {v}")),
//!         SensorKind::Temp,
//!     )?;
//!
//!     hub.notify_ready(SensorKind::Temp);
//!     hub.isr(SensorKind::Temp);
//!
//!     let report = hub.dispatch().await;
//!     assert_eq!(report.notified, 1);
//!     assert!(report.is_clean());
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::{
    config::Config,
    error::RegistryError,
    events::{Bus, Event, EventKind},
    handlers::HandlerRef,
    observers::ObserverSet,
    sensors::SensorKind,
};

use super::{
    builder::HubBuilder,
    dispatcher::{DispatchReport, Dispatcher},
    isr::Isr,
    ready::ReadyRegister,
    registry::{Registry, Subscription},
    store::SnapshotStore,
};

/// Sensor notification hub.
pub struct Hub {
    cfg: Config,
    bus: Bus,
    registry: Arc<Registry>,
    ready: Arc<ReadyRegister>,
    store: Arc<SnapshotStore>,
    isr: Isr,
    dispatcher: Dispatcher,
    // Keeps observer workers reachable for the hub's lifetime.
    _observers: Arc<ObserverSet>,
}

impl Hub {
    /// Starts building a hub with the given configuration.
    pub fn builder(cfg: Config) -> HubBuilder {
        HubBuilder::new(cfg)
    }

    pub(crate) fn new_internal(
        cfg: Config,
        bus: Bus,
        registry: Arc<Registry>,
        ready: Arc<ReadyRegister>,
        store: Arc<SnapshotStore>,
        isr: Isr,
        observers: Arc<ObserverSet>,
    ) -> Self {
        let dispatcher = Dispatcher::new(Arc::clone(&registry), Arc::clone(&store), bus.clone());
        Self {
            cfg,
            bus,
            registry,
            ready,
            store,
            isr,
            dispatcher,
            _observers: observers,
        }
    }

    /// Subscribes `handler` to `kind`; returns the subscription index.
    ///
    /// Callable from any thread. Fails with [`RegistryError::Full`] once
    /// [`Config::max_subscriptions`] handlers are registered.
    pub fn register(&self, handler: HandlerRef, kind: SensorKind) -> Result<usize, RegistryError> {
        let name: Arc<str> = Arc::from(handler.name());
        match self.registry.register(handler, kind) {
            Ok(index) => {
                self.bus.publish(
                    Event::new(EventKind::SubscriptionAdded)
                        .with_handler(name)
                        .with_sensor(kind)
                        .with_index(index),
                );
                Ok(index)
            }
            Err(err) => {
                self.bus.publish(
                    Event::new(EventKind::RegistryFull)
                        .with_handler(name)
                        .with_sensor(kind)
                        .with_count(self.registry.capacity()),
                );
                Err(err)
            }
        }
    }

    /// Simulates the hardware raising the ready signal for `kind`.
    pub fn notify_ready(&self, kind: SensorKind) {
        self.ready.set(kind);
        self.bus
            .publish(Event::new(EventKind::ReadyRaised).with_sensor(kind));
    }

    /// Runs the interrupt service routine for `kind`.
    ///
    /// Clears the ready bit and stores a fresh reading. Never calls handlers.
    pub fn isr(&self, kind: SensorKind) {
        self.isr.service(kind);
    }

    /// Cloneable ISR entry for interrupt glue or driver threads.
    pub fn isr_handle(&self) -> Isr {
        self.isr.clone()
    }

    /// Runs one dispatch pass over every registered handler.
    pub async fn dispatch(&self) -> DispatchReport {
        self.dispatcher.dispatch().await
    }

    /// Runs the ISR for every kind whose ready bit is set.
    ///
    /// Returns how many kinds were serviced.
    pub fn service_pending(&self) -> usize {
        let mut serviced = 0;
        for kind in self.ready.pending() {
            self.isr.service(kind);
            self.bus
                .publish(Event::new(EventKind::IsrServiced).with_sensor(kind));
            serviced += 1;
        }
        serviced
    }

    /// Service loop: polls the ready register and dispatches until `token` is cancelled.
    ///
    /// A pass in progress is always joined before cancellation is observed.
    pub async fn run(&self, token: CancellationToken) {
        let mut ticker = tokio::time::interval(self.cfg.poll_interval_clamped());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                _ = ticker.tick() => {
                    let serviced = self.service_pending();
                    if serviced > 0 || self.cfg.dispatch_when_idle {
                        self.dispatch().await;
                    }
                }
            }
        }
        self.bus.publish(Event::new(EventKind::ServiceStopped));
    }

    /// Receiver for hub events published after this call.
    pub fn events(&self) -> broadcast::Receiver<Event> {
        self.bus.subscribe()
    }

    /// Locked copy of the current subscriptions.
    pub fn subscriptions(&self) -> Vec<Subscription> {
        self.registry.snapshot()
    }

    /// The ready register.
    pub fn ready(&self) -> &ReadyRegister {
        &self.ready
    }

    /// The snapshot store.
    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    /// Registry capacity.
    pub fn capacity(&self) -> usize {
        self.registry.capacity()
    }

    /// Active configuration.
    pub fn config(&self) -> &Config {
        &self.cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt::Write as _;
    use std::sync::atomic::{AtomicI32, AtomicU32, AtomicUsize, Ordering};
    use std::sync::{Barrier, Mutex};
    use std::time::Duration;

    use crate::error::ReadFault;
    use crate::handlers::HandlerFn;
    use crate::sensors::{FixedReader, GpsText, SensorReader, SensorValue};

    const MAX_TEST_SUBS: usize = crate::config::MAX_SUBSCRIPTIONS;

    /// Reader whose readings tests can change between interrupts.
    struct Bench {
        temp: AtomicU32,
        acc: AtomicI32,
        gps: &'static str,
    }

    impl Bench {
        fn new(gps: &'static str) -> Arc<Self> {
            Arc::new(Self {
                temp: AtomicU32::new(0f32.to_bits()),
                acc: AtomicI32::new(0),
                gps,
            })
        }

        fn set_temp(&self, t: f32) {
            self.temp.store(t.to_bits(), Ordering::Relaxed);
        }
    }

    impl SensorReader for Bench {
        fn read_temp(&self) -> Result<f32, ReadFault> {
            Ok(f32::from_bits(self.temp.load(Ordering::Relaxed)))
        }

        // Every read yields a fresh (n, n, n) so torn triples are detectable.
        fn read_acc(&self) -> Result<(i32, i32, i32), ReadFault> {
            let n = self.acc.fetch_add(1, Ordering::Relaxed);
            Ok((n, n, n))
        }

        fn read_gps(&self, out: &mut GpsText) -> Result<(), ReadFault> {
            out.write_str(self.gps).map_err(|_| ReadFault::Format)
        }
    }

    /// Bench values with the short "Lat/Long" GPS format.
    struct ShortGps(FixedReader);

    impl SensorReader for ShortGps {
        fn read_temp(&self) -> Result<f32, ReadFault> {
            self.0.read_temp()
        }

        fn read_acc(&self) -> Result<(i32, i32, i32), ReadFault> {
            self.0.read_acc()
        }

        fn read_gps(&self, out: &mut GpsText) -> Result<(), ReadFault> {
            write!(out, "Lat: {:.2}, Long: {:.2}", self.0.latitude, self.0.longitude)
                .map_err(|_| ReadFault::Format)
        }
    }

    fn hub_with(reader: Arc<dyn SensorReader>) -> Arc<Hub> {
        Hub::builder(Config::default()).with_reader(reader).build()
    }

    fn recorder(name: &'static str, sink: &Arc<Mutex<Vec<SensorValue>>>) -> HandlerRef {
        let sink = Arc::clone(sink);
        HandlerFn::arc(name, move |v: SensorValue| sink.lock().unwrap().push(v))
    }

    fn counter(name: &'static str, hits: &Arc<AtomicUsize>) -> HandlerRef {
        let hits = Arc::clone(hits);
        HandlerFn::arc(name, move |_v: SensorValue| {
            hits.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[tokio::test]
    async fn every_kind_reaches_its_handler() {
        let hub = hub_with(Arc::new(ShortGps(FixedReader::default())));
        let temp = Arc::new(Mutex::new(Vec::new()));
        let acc = Arc::new(Mutex::new(Vec::new()));
        let gps = Arc::new(Mutex::new(Vec::new()));

        hub.register(recorder("temp", &temp), SensorKind::Temp).unwrap();
        hub.register(recorder("acc", &acc), SensorKind::Acc).unwrap();
        hub.register(recorder("gps", &gps), SensorKind::Gps).unwrap();

        for kind in SensorKind::ALL {
            hub.notify_ready(kind);
            hub.isr(kind);
        }
        assert_eq!(hub.ready().bits(), 0);
        for kind in SensorKind::ALL {
            assert_eq!(hub.store().updates(kind), 1, "{kind} was not stored");
        }

        let report = hub.dispatch().await;
        assert_eq!(report.notified, 3);
        assert!(report.is_clean());

        assert_eq!(*temp.lock().unwrap(), vec![SensorValue::Temp(25.67)]);
        assert_eq!(*acc.lock().unwrap(), vec![SensorValue::Acc(1, 2, 3)]);
        assert_eq!(
            *gps.lock().unwrap(),
            vec![SensorValue::Gps("Lat: 12.34, Long: 56.78".to_string())]
        );
    }

    #[tokio::test]
    async fn eleventh_registration_is_rejected() {
        let hub = Hub::builder(Config::default()).build();
        let hits = Arc::new(AtomicUsize::new(0));
        for i in 0..MAX_TEST_SUBS {
            assert_eq!(hub.register(counter("t", &hits), SensorKind::Temp), Ok(i));
        }

        let late = Arc::new(AtomicUsize::new(0));
        let mut rx = hub.events();
        let err = hub
            .register(counter("late", &late), SensorKind::Temp)
            .unwrap_err();
        assert_eq!(err, RegistryError::Full { capacity: MAX_TEST_SUBS });

        let ev = rx.try_recv().unwrap();
        assert_eq!(ev.kind, EventKind::RegistryFull);
        assert_eq!(ev.count, Some(MAX_TEST_SUBS));
        assert_eq!(ev.handler.as_deref(), Some("late"));

        let report = hub.dispatch().await;
        assert_eq!(report.notified, MAX_TEST_SUBS);
        assert_eq!(hits.load(Ordering::SeqCst), MAX_TEST_SUBS);
        assert_eq!(late.load(Ordering::SeqCst), 0);
        assert_eq!(hub.subscriptions().len(), MAX_TEST_SUBS);
    }

    #[tokio::test]
    async fn dispatch_without_isr_delivers_initial_values() {
        let hub = Hub::builder(Config::default()).build();
        let seen = Arc::new(Mutex::new(Vec::new()));
        hub.register(recorder("temp", &seen), SensorKind::Temp).unwrap();
        hub.register(recorder("gps", &seen), SensorKind::Gps).unwrap();

        hub.dispatch().await;

        let mut seen = seen.lock().unwrap().clone();
        seen.sort_by_key(|v| v.kind().index());
        assert_eq!(
            seen,
            vec![SensorValue::Temp(0.0), SensorValue::Gps(String::new())]
        );
    }

    #[tokio::test]
    async fn latest_reading_wins() {
        let bench = Bench::new("");
        let hub = hub_with(Arc::clone(&bench) as Arc<dyn SensorReader>);
        let seen = Arc::new(Mutex::new(Vec::new()));
        hub.register(recorder("temp", &seen), SensorKind::Temp).unwrap();

        bench.set_temp(10.0);
        hub.isr(SensorKind::Temp);
        bench.set_temp(20.0);
        hub.isr(SensorKind::Temp);

        hub.dispatch().await;
        assert_eq!(*seen.lock().unwrap(), vec![SensorValue::Temp(20.0)]);
        assert_eq!(hub.store().updates(SensorKind::Temp), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn registration_races_interrupts() {
        let hub = hub_with(Bench::new("fix"));
        let hits = Arc::new(AtomicUsize::new(0));

        let irq = {
            let isr = hub.isr_handle();
            std::thread::spawn(move || {
                for _ in 0..2_000 {
                    isr.service(SensorKind::Acc);
                }
            })
        };
        let clients = {
            let hub = Arc::clone(&hub);
            let hits = Arc::clone(&hits);
            std::thread::spawn(move || {
                (0..MAX_TEST_SUBS + 5)
                    .filter(|_| hub.register(counter("acc", &hits), SensorKind::Acc).is_ok())
                    .count()
            })
        };

        irq.join().unwrap();
        let accepted = clients.join().unwrap();
        assert_eq!(accepted, MAX_TEST_SUBS);

        let report = hub.dispatch().await;
        assert!(report.is_clean());
        assert_eq!(hits.load(Ordering::SeqCst), MAX_TEST_SUBS);
        assert_eq!(hub.store().read_acc(), (1_999, 1_999, 1_999));
    }

    #[tokio::test]
    async fn faulting_handler_does_not_stop_siblings() {
        let hub = Hub::builder(Config::default()).build();
        let hits = Arc::new(AtomicUsize::new(0));
        hub.register(counter("first", &hits), SensorKind::Temp).unwrap();
        hub.register(
            HandlerFn::arc("broken", |_v: SensorValue| panic!("no display attached")),
            SensorKind::Acc,
        )
        .unwrap();
        hub.register(counter("third", &hits), SensorKind::Gps).unwrap();

        let report = hub.dispatch().await;
        assert_eq!(report.notified, 3);
        assert_eq!(report.completed(), 2);
        assert_eq!(report.faults.len(), 1);
        assert_eq!(report.faults[0].index, 1);
        assert_eq!(report.faults[0].reason, "no display attached");
        assert_eq!(hits.load(Ordering::SeqCst), 2);

        // Faults are not sticky: the next pass calls everyone again.
        let report = hub.dispatch().await;
        assert_eq!(report.failed(), 1);
        assert_eq!(hits.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn each_subscription_runs_once_per_pass() {
        let hub = Hub::builder(Config::default()).build();
        let hits: Vec<_> = (0..4).map(|_| Arc::new(AtomicUsize::new(0))).collect();
        for (i, h) in hits.iter().enumerate() {
            hub.register(counter("h", h), SensorKind::ALL[i % SensorKind::COUNT])
                .unwrap();
        }
        // Same handler object twice counts as two subscriptions.
        let twice = Arc::new(AtomicUsize::new(0));
        let handler = counter("twice", &twice);
        hub.register(Arc::clone(&handler), SensorKind::Temp).unwrap();
        hub.register(handler, SensorKind::Temp).unwrap();

        for pass in 1..=3 {
            hub.dispatch().await;
            for h in &hits {
                assert_eq!(h.load(Ordering::SeqCst), pass);
            }
            assert_eq!(twice.load(Ordering::SeqCst), 2 * pass);
        }
    }

    #[tokio::test]
    async fn handlers_run_concurrently() {
        let hub = Hub::builder(Config::default()).build();
        let barrier = Arc::new(Barrier::new(2));
        for name in ["left", "right"] {
            let barrier = Arc::clone(&barrier);
            hub.register(
                HandlerFn::arc(name, move |_v: SensorValue| {
                    barrier.wait();
                }),
                SensorKind::Temp,
            )
            .unwrap();
        }

        // A serial pass would block forever on the barrier.
        let report = tokio::time::timeout(Duration::from_secs(10), hub.dispatch())
            .await
            .expect("handlers did not run in parallel");
        assert!(report.is_clean());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn handlers_never_see_torn_triples() {
        let hub = hub_with(Bench::new(""));
        let torn = Arc::new(AtomicUsize::new(0));
        for _ in 0..4 {
            let torn = Arc::clone(&torn);
            hub.register(
                HandlerFn::arc("acc", move |v: SensorValue| {
                    if let SensorValue::Acc(x, y, z) = v {
                        if x != y || y != z {
                            torn.fetch_add(1, Ordering::SeqCst);
                        }
                    }
                }),
                SensorKind::Acc,
            )
            .unwrap();
        }

        let stop = Arc::new(std::sync::atomic::AtomicBool::new(false));
        let irq = {
            let isr = hub.isr_handle();
            let stop = Arc::clone(&stop);
            std::thread::spawn(move || {
                while !stop.load(Ordering::Relaxed) {
                    isr.service(SensorKind::Acc);
                }
            })
        };

        for _ in 0..200 {
            assert!(hub.dispatch().await.is_clean());
        }
        stop.store(true, Ordering::Relaxed);
        irq.join().unwrap();

        assert_eq!(torn.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn same_kind_handlers_agree_within_a_pass() {
        let hub = hub_with(Bench::new(""));
        let seen = Arc::new(Mutex::new(Vec::new()));
        for _ in 0..5 {
            hub.register(recorder("acc", &seen), SensorKind::Acc).unwrap();
        }
        hub.isr(SensorKind::Acc);
        hub.dispatch().await;

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 5);
        assert!(seen.iter().all(|v| *v == seen[0]));
    }

    #[tokio::test]
    async fn service_pending_runs_isr_for_raised_bits() {
        let hub = Hub::builder(Config::default()).build();
        hub.notify_ready(SensorKind::Temp);
        hub.notify_ready(SensorKind::Gps);

        let mut rx = hub.events();
        assert_eq!(hub.service_pending(), 2);
        assert_eq!(hub.ready().bits(), 0);
        assert_eq!(hub.store().read_temp(), 25.67);
        assert_eq!(
            hub.store().read_gps().as_str(),
            "Latitude: 12.34, Longitude: 56.78"
        );
        assert_eq!(hub.store().updates(SensorKind::Acc), 0);

        let serviced: Vec<_> = std::iter::from_fn(|| rx.try_recv().ok())
            .filter(|e| e.kind == EventKind::IsrServiced)
            .filter_map(|e| e.sensor)
            .collect();
        assert_eq!(serviced, vec![SensorKind::Temp, SensorKind::Gps]);
        assert_eq!(hub.service_pending(), 0);
    }

    #[tokio::test]
    async fn run_services_and_dispatches_until_cancelled() {
        let cfg = Config {
            poll_interval: Duration::from_millis(1),
            ..Config::default()
        };
        let hub = Hub::builder(cfg).build();
        let hits = Arc::new(AtomicUsize::new(0));
        hub.register(counter("temp", &hits), SensorKind::Temp).unwrap();
        let mut rx = hub.events();

        let token = CancellationToken::new();
        let service = {
            let hub = Arc::clone(&hub);
            let token = token.clone();
            tokio::spawn(async move { hub.run(token).await })
        };

        hub.notify_ready(SensorKind::Temp);
        tokio::time::timeout(Duration::from_secs(5), async {
            while hits.load(Ordering::SeqCst) == 0 {
                tokio::time::sleep(Duration::from_millis(1)).await;
            }
        })
        .await
        .expect("service loop never dispatched");

        token.cancel();
        service.await.unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        let kinds: Vec<_> = std::iter::from_fn(|| rx.try_recv().ok()).map(|e| e.kind).collect();
        assert_eq!(kinds.last(), Some(&EventKind::ServiceStopped));
        assert!(kinds.contains(&EventKind::IsrServiced));
    }
}
