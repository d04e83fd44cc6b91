//! # Sensor-data handler trait.
//!
//! A [`Handler`] is the routine a client subscribes against a
//! [`SensorKind`](crate::SensorKind). The dispatcher calls
//! [`on_value`](Handler::on_value) from a dedicated worker thread with the value of
//! the kind the handler was registered for, so a handler never receives another
//! kind's value.
//!
//! Handlers may block or be slow; they only delay the end of the dispatch pass.
//! A panic inside `on_value` is caught and reported as a
//! [`HandlerFault`](crate::HandlerFault).
//!
//! # Example
//! ```
//! use sensor_hub::{Handler, SensorValue};
//!
//! struct Display;
//!
//! impl Handler for Display {
//!     fn name(&self) -> &str { "display" }
//!
//!     fn on_value(&self, value: SensorValue) {
//!         if let SensorValue::Temp(t) = value {
//!             println!("{t:.1} °C");
//!         }
//!     }
//! }
//! ```

/// Client routine that consumes sensor values.
pub trait Handler: Send + Sync + 'static {
    /// Returns a stable, human-readable handler name (for events and faults).
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Consumes one value of the subscribed kind.
    fn on_value(&self, value: crate::sensors::SensorValue);
}
