//! # sensor-hub
//!
//! **sensor-hub** dispatches sensor-ready notifications to in-process clients on a
//! resource-constrained device.
//!
//! Sensors raise hardware-ready signals; an interrupt service routine latches the
//! signal, reads the sensor and stores the value; a dispatch pass then hands each
//! subscribed handler, in parallel, the freshest value of the sensor it cares about.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   ┌────────────┐   ┌────────────┐   ┌────────────┐
//!   │  Temp      │   │  Acc       │   │  Gps       │   hardware-ready signals
//!   └─────┬──────┘   └─────┬──────┘   └─────┬──────┘
//!         ▼  notify_ready  ▼                ▼
//! ┌───────────────────────────────────────────────────┐
//! │ ReadyRegister (atomic word, one bit per kind)     │
//! └─────────────────────────┬─────────────────────────┘
//!                           ▼ isr(kind): clear bit, read, store
//! ┌───────────────────────────────────────────────────┐
//! │ SnapshotStore (seq-locked slot per kind)          │
//! └─────────────────────────┬─────────────────────────┘
//!                           │          clients ── register(handler, kind)
//!                           │                          ▼
//!                           │          ┌───────────────────────────────┐
//!                           │          │ Registry (Mutex, capacity C)  │
//!                           │          └───────────────┬───────────────┘
//!                           ▼                          ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │ Dispatcher::dispatch()                                            │
//! │   copy registry ─► copy store ─► spawn worker per subscription    │
//! │   ─► join all ─► DispatchReport { notified, faults }              │
//! └──────┬──────────────────┬──────────────────┬──────────────────────┘
//!        ▼                  ▼                  ▼
//!   handler#0(Temp)    handler#1(Acc)     handler#2(Gps)
//! ```
//!
//! Every component publishes bookkeeping [`Event`]s on a [`Bus`]; observers (such as
//! the `tracing`-backed `LogWriter`) consume them off the hot path. The ISR publishes
//! nothing: it stays lock-free and allocation-free.
//!
//! ## Features
//! | Area              | Description                                            | Key types                                   |
//! |-------------------|--------------------------------------------------------|---------------------------------------------|
//! | **Sensors**       | Kinds, typed values, read-stub contract                | [`SensorKind`], [`SensorValue`], [`SensorReader`] |
//! | **Hardware side** | Ready bits, ISR, lock-free snapshot store              | [`ReadyRegister`], [`Isr`], [`SnapshotStore`] |
//! | **Clients**       | Fixed-capacity registration of handlers                | [`Handler`], [`HandlerFn`], [`Registry`]    |
//! | **Dispatch**      | Parallel pass with per-handler fault isolation         | [`Dispatcher`], [`DispatchReport`]          |
//! | **Observability** | Runtime events and observers                           | [`Event`], [`Observe`], [`ObserverSet`]     |
//! | **Errors**        | Typed errors                                           | [`RegistryError`], [`HandlerFault`], [`ReadFault`] |
//! | **Configuration** | Capacity, bus size, service-loop timing                | [`Config`]                                  |
//!
//! ## Optional features
//! - `logging` (default): exports [`LogWriter`], an observer that logs through `tracing`.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicU32, Ordering};
//! use sensor_hub::{Config, HandlerFn, Hub, SensorKind, SensorValue};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let hub = Hub::builder(Config::default()).build();
//!
//!     let last = Arc::new(AtomicU32::new(0));
//!     let sink = Arc::clone(&last);
//!     hub.register(
//!         HandlerFn::arc("thermostat", move |v: SensorValue| {
//!             if let SensorValue::Temp(t) = v {
//!                 sink.store(t.to_bits(), Ordering::Relaxed);
//!             }
//!         }),
//!         SensorKind::Temp,
//!     )?;
//!
//!     // Hardware raises the signal, the interrupt vector services it.
//!     hub.notify_ready(SensorKind::Temp);
//!     hub.isr(SensorKind::Temp);
//!
//!     // The scheduler runs a pass.
//!     let report = hub.dispatch().await;
//!     assert!(report.is_clean());
//!     assert_eq!(f32::from_bits(last.load(Ordering::Relaxed)), 25.67);
//!     Ok(())
//! }
//! ```
mod config;
mod core;
mod error;
mod events;
mod handlers;
mod observers;
mod sensors;

// ---- Public re-exports ----

pub use config::{Config, MAX_SUBSCRIPTIONS};
pub use crate::core::{
    DispatchReport, Dispatcher, Hub, HubBuilder, Isr, ReadyRegister, Registry, SeqSlot, Snapshot,
    SnapshotStore, Subscription,
};
pub use error::{HandlerFault, ReadFault, RegistryError, UnknownSensorTag};
pub use events::{Bus, Event, EventKind};
pub use handlers::{Handler, HandlerFn, HandlerRef};
pub use observers::{Observe, ObserverSet};
pub use sensors::{FixedReader, GPS_CAPACITY, GpsText, SensorKind, SensorReader, SensorValue};

// Optional: built-in observer that forwards events to `tracing`.
// Enable with: `--features logging` (on by default)
#[cfg(feature = "logging")]
pub use observers::LogWriter;
