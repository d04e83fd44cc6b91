//! Hub core: hardware-facing state, registry and dispatch.
//!
//! The public entry point is [`Hub`]; the building blocks are exported for
//! platform glue and tests.
//!
//! Internal modules:
//! - [`ready`]: atomic per-kind "data ready" bits;
//! - [`store`]: sequence-locked latest value per kind;
//! - [`isr`]: interrupt service routine (clear bit, read, store);
//! - [`registry`]: fixed-capacity subscription table;
//! - [`dispatcher`]: parallel notification pass with fault isolation;
//! - [`hub`] / [`builder`]: wiring, service loop and construction.

mod builder;
mod dispatcher;
mod hub;
mod isr;
mod ready;
mod registry;
mod store;

pub use builder::HubBuilder;
pub use dispatcher::{DispatchReport, Dispatcher};
pub use hub::Hub;
pub use isr::Isr;
pub use ready::ReadyRegister;
pub use registry::{Registry, Subscription};
pub use store::{SeqSlot, Snapshot, SnapshotStore};
