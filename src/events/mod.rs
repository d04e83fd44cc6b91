//! Runtime events: types and broadcast bus.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: `Hub` (registration, ready signals, service loop),
//!   `Dispatcher` (pass lifecycle, handler faults), `ObserverSet` workers (overflow/panic).
//! - **Consumers**: the observer listener spawned by `HubBuilder::build`, and any
//!   receiver obtained from [`Hub::events`](crate::Hub::events).

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
