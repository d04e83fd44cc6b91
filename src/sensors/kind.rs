//! # Sensor kinds.
//!
//! [`SensorKind`] is the closed set of sensors the hub knows about. Each kind owns
//! one bit in the [`ReadyRegister`](crate::ReadyRegister), one slot in the
//! [`SnapshotStore`](crate::SnapshotStore) and one method on
//! [`SensorReader`](crate::SensorReader).
//!
//! ```text
//! kind   bit  mask   tag  value shape
//! Temp    0   0b001  'T'  f32
//! Acc     1   0b010  'A'  (i32, i32, i32)
//! Gps     2   0b100  'G'  text, <= 50 bytes
//! ```

use std::fmt;

use crate::error::UnknownSensorTag;

/// Distinguishable sensor with a fixed value shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SensorKind {
    /// Temperature sensor, single `f32` reading.
    Temp,
    /// Accelerometer, `(x, y, z)` integer triple.
    Acc,
    /// GPS receiver, bounded position text.
    Gps,
}

impl SensorKind {
    /// Number of sensor kinds.
    pub const COUNT: usize = 3;

    /// All kinds, in bit order.
    pub const ALL: [SensorKind; Self::COUNT] = [SensorKind::Temp, SensorKind::Acc, SensorKind::Gps];

    /// Bit position of this kind in the ready register (also its slot index).
    #[inline]
    pub const fn bit(self) -> u32 {
        match self {
            SensorKind::Temp => 0,
            SensorKind::Acc => 1,
            SensorKind::Gps => 2,
        }
    }

    /// Slot index for per-kind arrays.
    #[inline]
    pub const fn index(self) -> usize {
        self.bit() as usize
    }

    /// Single-bit mask for this kind.
    #[inline]
    pub const fn mask(self) -> u32 {
        1 << self.bit()
    }

    /// Single-character tag used by hardware glue (`'T'`, `'A'`, `'G'`).
    #[inline]
    pub const fn tag(self) -> char {
        match self {
            SensorKind::Temp => 'T',
            SensorKind::Acc => 'A',
            SensorKind::Gps => 'G',
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(self) -> &'static str {
        match self {
            SensorKind::Temp => "temp",
            SensorKind::Acc => "acc",
            SensorKind::Gps => "gps",
        }
    }

    /// Iterates over the kinds whose bit is set in `bits`, in bit order.
    pub fn from_bits(bits: u32) -> impl Iterator<Item = SensorKind> {
        Self::ALL.into_iter().filter(move |k| bits & k.mask() != 0)
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

impl TryFrom<char> for SensorKind {
    type Error = UnknownSensorTag;

    fn try_from(tag: char) -> Result<Self, Self::Error> {
        match tag {
            'T' => Ok(SensorKind::Temp),
            'A' => Ok(SensorKind::Acc),
            'G' => Ok(SensorKind::Gps),
            other => Err(UnknownSensorTag { tag: other }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_are_shifted_bits() {
        assert_eq!(SensorKind::Temp.mask(), 0b001);
        assert_eq!(SensorKind::Acc.mask(), 0b010);
        assert_eq!(SensorKind::Gps.mask(), 0b100);
    }

    #[test]
    fn all_is_in_bit_order() {
        for (i, kind) in SensorKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn tags_round_trip() {
        for kind in SensorKind::ALL {
            assert_eq!(SensorKind::try_from(kind.tag()).ok(), Some(kind));
        }
        let err = SensorKind::try_from('X').unwrap_err();
        assert_eq!(err.tag, 'X');
    }

    #[test]
    fn from_bits_skips_clear_bits() {
        let kinds: Vec<_> = SensorKind::from_bits(0b101).collect();
        assert_eq!(kinds, vec![SensorKind::Temp, SensorKind::Gps]);
        assert_eq!(SensorKind::from_bits(0).count(), 0);
    }
}
