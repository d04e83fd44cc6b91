//! # Sensor read stubs.
//!
//! [`SensorReader`] is the contract between the ISR and the hardware drivers.
//! Every method is called from interrupt context, so implementations must be:
//! - bounded in time,
//! - free of heap allocation,
//! - free of any lock that non-ISR code may hold.
//!
//! A read that cannot produce a value returns [`ReadFault`]; the ISR then stores
//! the kind's sentinel (see [`SensorValue::sentinel`](crate::SensorValue::sentinel)).
//!
//! ## Example
//! ```rust
//! use std::fmt::Write;
//! use std::sync::atomic::{AtomicU32, Ordering};
//! use sensor_hub::{GpsText, ReadFault, SensorReader};
//!
//! struct Thermistor { raw: AtomicU32 }
//!
//! impl SensorReader for Thermistor {
//!     fn read_temp(&self) -> Result<f32, ReadFault> {
//!         Ok(f32::from_bits(self.raw.load(Ordering::Relaxed)))
//!     }
//!     fn read_acc(&self) -> Result<(i32, i32, i32), ReadFault> {
//!         Err(ReadFault::NotFitted)
//!     }
//!     fn read_gps(&self, _out: &mut GpsText) -> Result<(), ReadFault> {
//!         Err(ReadFault::NotFitted)
//!     }
//! }
//! ```

use std::fmt::Write;

use crate::error::ReadFault;

use super::gps::GpsText;

/// Per-kind sensor read routines, invoked by the ISR.
pub trait SensorReader: Send + Sync + 'static {
    /// Reads the temperature sensor.
    fn read_temp(&self) -> Result<f32, ReadFault>;

    /// Reads the accelerometer `(x, y, z)`.
    fn read_acc(&self) -> Result<(i32, i32, i32), ReadFault>;

    /// Formats the current GPS position into `out` (already cleared).
    fn read_gps(&self, out: &mut GpsText) -> Result<(), ReadFault>;
}

/// Reader that always returns the same readings.
///
/// Defaults reproduce the bench values used during bring-up:
/// `25.67`, `(1, 2, 3)` and `"Latitude: 12.34, Longitude: 56.78"`.
#[derive(Debug, Clone, Copy)]
pub struct FixedReader {
    /// Temperature returned by [`read_temp`](SensorReader::read_temp).
    pub temp: f32,
    /// Triple returned by [`read_acc`](SensorReader::read_acc).
    pub acc: (i32, i32, i32),
    /// Latitude used to format the GPS text.
    pub latitude: f32,
    /// Longitude used to format the GPS text.
    pub longitude: f32,
}

impl Default for FixedReader {
    fn default() -> Self {
        Self {
            temp: 25.67,
            acc: (1, 2, 3),
            latitude: 12.34,
            longitude: 56.78,
        }
    }
}

impl SensorReader for FixedReader {
    fn read_temp(&self) -> Result<f32, ReadFault> {
        Ok(self.temp)
    }

    fn read_acc(&self) -> Result<(i32, i32, i32), ReadFault> {
        Ok(self.acc)
    }

    fn read_gps(&self, out: &mut GpsText) -> Result<(), ReadFault> {
        write!(
            out,
            "Latitude: {:.2}, Longitude: {:.2}",
            self.latitude, self.longitude
        )
        .map_err(|_| ReadFault::Format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_reader_defaults() {
        let r = FixedReader::default();
        assert_eq!(r.read_temp().unwrap(), 25.67);
        assert_eq!(r.read_acc().unwrap(), (1, 2, 3));

        let mut out = GpsText::new();
        r.read_gps(&mut out).unwrap();
        assert_eq!(out.as_str(), "Latitude: 12.34, Longitude: 56.78");
    }
}
