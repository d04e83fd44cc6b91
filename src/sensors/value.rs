//! # Typed sensor values.
//!
//! [`SensorValue`] is what handlers receive. Each variant matches exactly one
//! [`SensorKind`], so a handler never has to reinterpret raw bytes.

use std::fmt;

use super::kind::SensorKind;

/// Reading delivered to handlers.
#[derive(Debug, Clone, PartialEq)]
pub enum SensorValue {
    /// Temperature reading.
    Temp(f32),
    /// Accelerometer `(x, y, z)`.
    Acc(i32, i32, i32),
    /// GPS position text (at most [`GPS_CAPACITY`](crate::GPS_CAPACITY) bytes).
    Gps(String),
}

impl SensorValue {
    /// Sentinel stored for a TEMP read failure.
    pub const TEMP_SENTINEL: f32 = f32::NAN;
    /// Sentinel stored (on every axis) for an ACC read failure.
    pub const ACC_SENTINEL: i32 = i32::MIN;

    /// Sensor kind this value belongs to.
    #[must_use]
    pub fn kind(&self) -> SensorKind {
        match self {
            SensorValue::Temp(_) => SensorKind::Temp,
            SensorValue::Acc(..) => SensorKind::Acc,
            SensorValue::Gps(_) => SensorKind::Gps,
        }
    }

    /// Value a slot holds before its first ISR.
    #[must_use]
    pub fn initial(kind: SensorKind) -> Self {
        match kind {
            SensorKind::Temp => SensorValue::Temp(0.0),
            SensorKind::Acc => SensorValue::Acc(0, 0, 0),
            SensorKind::Gps => SensorValue::Gps(String::new()),
        }
    }

    /// Value the ISR stores when the read stub reports a fault.
    ///
    /// - `Temp`: NaN
    /// - `Acc`: `i32::MIN` on every axis
    /// - `Gps`: empty text
    #[must_use]
    pub fn sentinel(kind: SensorKind) -> Self {
        match kind {
            SensorKind::Temp => SensorValue::Temp(Self::TEMP_SENTINEL),
            SensorKind::Acc => {
                SensorValue::Acc(Self::ACC_SENTINEL, Self::ACC_SENTINEL, Self::ACC_SENTINEL)
            }
            SensorKind::Gps => SensorValue::Gps(String::new()),
        }
    }

    /// True if this value is the read-failure sentinel for its kind.
    ///
    /// An empty GPS text doubles as "no fix yet", so it also reports `true`.
    #[must_use]
    pub fn is_sentinel(&self) -> bool {
        match self {
            SensorValue::Temp(t) => t.is_nan(),
            SensorValue::Acc(x, y, z) => {
                [*x, *y, *z].iter().all(|v| *v == Self::ACC_SENTINEL)
            }
            SensorValue::Gps(s) => s.is_empty(),
        }
    }
}

impl fmt::Display for SensorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorValue::Temp(t) => write!(f, "{t:.2}"),
            SensorValue::Acc(x, y, z) => write!(f, "x = {x}, y = {y}, z = {z}"),
            SensorValue::Gps(s) => f.write_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        for kind in SensorKind::ALL {
            assert_eq!(SensorValue::initial(kind).kind(), kind);
            assert_eq!(SensorValue::sentinel(kind).kind(), kind);
        }
    }

    #[test]
    fn sentinels_are_recognised() {
        for kind in SensorKind::ALL {
            assert!(SensorValue::sentinel(kind).is_sentinel());
        }
        assert!(!SensorValue::Temp(25.67).is_sentinel());
        assert!(!SensorValue::Acc(1, 2, 3).is_sentinel());
        assert!(!SensorValue::Gps("fix".into()).is_sentinel());
    }

    #[test]
    fn display_matches_client_printouts() {
        assert_eq!(SensorValue::Temp(25.67).to_string(), "25.67");
        assert_eq!(SensorValue::Acc(1, 2, 3).to_string(), "x = 1, y = 2, z = 3");
        assert_eq!(SensorValue::Gps("Lat: 1".into()).to_string(), "Lat: 1");
    }
}
