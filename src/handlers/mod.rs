//! # Sensor-data handlers.
//!
//! - [`Handler`] - trait implemented by client routines
//! - [`HandlerFn`] - closure-backed implementation
//! - [`HandlerRef`] - shared reference (`Arc<dyn Handler>`) stored in the registry

mod handler;
mod handler_fn;

pub use handler::Handler;
pub use handler_fn::{HandlerFn, HandlerRef};
