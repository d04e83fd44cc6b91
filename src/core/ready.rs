//! # Ready register.
//!
//! Word-sized bitfield, one bit per [`SensorKind`], latched by hardware when a
//! sensor has data and cleared by the ISR when it starts reading.
//!
//! ```text
//! hardware ── set(kind) ──► [ ... | G | A | T ] ◄── clear(kind) ── isr(kind)
//!                              bit2  bit1 bit0
//! ```
//!
//! ## Rules
//! - Every operation is a single atomic RMW on the whole word, so concurrent
//!   updates to different kinds never lose each other's bits.
//! - Lock-free and allocation-free: safe to call from interrupt context.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::sensors::SensorKind;

/// Atomic per-kind "data ready" bits.
#[derive(Debug, Default)]
pub struct ReadyRegister {
    bits: AtomicU32,
}

impl ReadyRegister {
    /// Creates a register with every bit clear.
    pub const fn new() -> Self {
        Self {
            bits: AtomicU32::new(0),
        }
    }

    /// Latches the ready bit for `kind`; returns `true` if it was already set.
    pub fn set(&self, kind: SensorKind) -> bool {
        self.bits.fetch_or(kind.mask(), Ordering::AcqRel) & kind.mask() != 0
    }

    /// Clears the ready bit for `kind`; returns `true` if it was set.
    pub fn clear(&self, kind: SensorKind) -> bool {
        self.bits.fetch_and(!kind.mask(), Ordering::AcqRel) & kind.mask() != 0
    }

    /// True if the ready bit for `kind` is set.
    pub fn test(&self, kind: SensorKind) -> bool {
        self.bits() & kind.mask() != 0
    }

    /// Raw register value.
    pub fn bits(&self) -> u32 {
        self.bits.load(Ordering::Acquire)
    }

    /// Kinds whose bit is currently set, in bit order.
    pub fn pending(&self) -> impl Iterator<Item = SensorKind> {
        SensorKind::from_bits(self.bits())
    }
}
