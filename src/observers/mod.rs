//! # Event observers for the hub runtime.
//!
//! This module provides the [`Observe`] trait, the [`ObserverSet`] fan-out and the
//! built-in [`LogWriter`].
//!
//! ## Architecture
//! ```text
//! Hub / Dispatcher ── publish(Event) ──► Bus ──► observer listener
//!                                                     │
//!                                                     ▼
//!                                               ObserverSet::emit
//!                                        ┌────────────┼────────────┐
//!                                        ▼            ▼            ▼
//!                                    LogWriter     Metrics       Custom
//! ```
//!
//! Observers see the hub's bookkeeping (registrations, passes, faults). They are not
//! sensor-data handlers; those implement [`Handler`](crate::Handler).

#[cfg(feature = "logging")]
mod log;
mod observer;
mod set;

#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use observer::Observe;
pub use set::ObserverSet;

pub(crate) use set::panic_message;
