//! Sensor data model: kinds, typed values, bounded GPS text and the read-stub contract.
//!
//! ## Contents
//! - [`SensorKind`] closed set of sensors (bit, slot, tag per kind)
//! - [`SensorValue`] typed reading handed to handlers
//! - [`GpsText`] inline, allocation-free GPS buffer
//! - [`SensorReader`] per-kind read routines called from the ISR, plus [`FixedReader`]

mod gps;
mod kind;
mod reader;
mod value;

pub use gps::{GPS_CAPACITY, GpsText};
pub use kind::SensorKind;
pub use reader::{FixedReader, SensorReader};
pub use value::SensorValue;
