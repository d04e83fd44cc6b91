//! Error types used by the hub and its collaborators.
//!
//! This module defines:
//!
//! - [`RegistryError`]: raised by [`Hub::register`](crate::Hub::register).
//! - [`HandlerFault`]: a handler that panicked during a dispatch pass; collected in a
//!   [`DispatchReport`](crate::DispatchReport), never re-raised.
//! - [`ReadFault`]: returned by a [`SensorReader`](crate::SensorReader); absorbed by the ISR.
//! - [`UnknownSensorTag`]: a character that does not name a [`SensorKind`].
//!
//! Each type provides `as_label` for logging/metrics.

use std::sync::Arc;

use thiserror::Error;

use crate::sensors::SensorKind;

/// # Errors produced by the subscription registry.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The registry already holds `capacity` subscriptions.
    ///
    /// Retrying is pointless: there is no unregistration.
    #[error("registry full: capacity {capacity} reached")]
    Full {
        /// The configured capacity.
        capacity: usize,
    },
}

impl RegistryError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use sensor_hub::RegistryError;
    ///
    /// let err = RegistryError::Full { capacity: 10 };
    /// assert_eq!(err.as_label(), "registry_full");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RegistryError::Full { .. } => "registry_full",
        }
    }
}

/// # A handler that failed during a dispatch pass.
///
/// Faults are isolated per worker: the other handlers of the pass still run and the
/// pass still joins. The dispatcher only counts and reports them.
#[derive(Error, Debug, Clone)]
#[error("handler '{handler}' (#{index}, {kind}) faulted: {reason}")]
pub struct HandlerFault {
    /// Insertion index of the subscription.
    pub index: usize,
    /// Handler name.
    pub handler: Arc<str>,
    /// Sensor kind the handler was subscribed to.
    pub kind: SensorKind,
    /// Panic payload rendered as text.
    pub reason: String,
}

impl HandlerFault {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        "handler_fault"
    }
}

/// # Failure of a sensor read stub.
///
/// Never escapes the ISR: the slot receives the kind's sentinel instead.
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadFault {
    /// The device did not answer in time.
    #[error("sensor read timed out")]
    Timeout,
    /// The device answered with data that failed validation.
    #[error("sensor returned invalid data")]
    InvalidData,
    /// No device of this kind is fitted on the board.
    #[error("sensor not fitted")]
    NotFitted,
    /// The reading could not be formatted into its slot.
    #[error("sensor reading could not be formatted")]
    Format,
}

impl ReadFault {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            ReadFault::Timeout => "read_timeout",
            ReadFault::InvalidData => "read_invalid_data",
            ReadFault::NotFitted => "read_not_fitted",
            ReadFault::Format => "read_format",
        }
    }
}

/// # A character that does not name a sensor kind.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("unknown sensor tag {tag:?}")]
pub struct UnknownSensorTag {
    /// The rejected tag.
    pub tag: char,
}
