//! # Function-backed handler (`HandlerFn`)
//!
//! [`HandlerFn`] wraps a closure `F: Fn(SensorValue)`. Shared state goes into an
//! `Arc<...>` captured by the closure; the closure itself is never mutated.
//!
//! ## Example
//! ```rust
//! use sensor_hub::{HandlerFn, HandlerRef, SensorValue};
//!
//! let h: HandlerRef = HandlerFn::arc("printer", |v: SensorValue| println!("{v}"));
//! assert_eq!(h.name(), "printer");
//! ```

use std::borrow::Cow;
use std::sync::Arc;

use crate::handlers::handler::Handler;
use crate::sensors::SensorValue;

/// Shared handle to a handler object.
pub type HandlerRef = Arc<dyn Handler>;

/// Function-backed handler implementation.
#[derive(Debug)]
pub struct HandlerFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> HandlerFn<F> {
    /// Creates a new function-backed handler.
    ///
    /// Prefer [`HandlerFn::arc`] when you immediately need a [`HandlerRef`].
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }

    /// Creates the handler and returns it as a shared handle.
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

impl<F> Handler for HandlerFn<F>
where
    F: Fn(SensorValue) + Send + Sync + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn on_value(&self, value: SensorValue) {
        (self.f)(value)
    }
}
