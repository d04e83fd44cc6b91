//! # Sensor snapshot store.
//!
//! Holds the latest value of every [`SensorKind`]. Each kind owns one [`SeqSlot`]:
//! a sequence counter plus a fixed number of atomic words holding the encoded value.
//!
//! ```text
//!           writer (ISR, one per kind)            readers (dispatch workers)
//! seq:  even ─► odd ─► store words ─► even+2      load seq ─► load words ─► reload seq
//!                                                  retry if odd or changed
//! ```
//!
//! ## Rules
//! - Writers never block on readers and never allocate: safe from interrupt context.
//! - Readers only return a copy whose sequence did not move while it was taken, so a
//!   handler can never observe half of one write and half of another.
//! - All data words are atomics; there is no `unsafe` and no data race.
//! - Two writers on the same slot are serialized by a CAS on the sequence (the
//!   interrupt controller already guarantees this on hardware).

use std::hint;
use std::sync::atomic::{AtomicU32, Ordering, fence};

use crate::sensors::{GPS_CAPACITY, GpsText, SensorKind, SensorValue};

/// Words needed for a GPS slot: one length word plus the packed bytes.
const GPS_WORDS: usize = 1 + GPS_CAPACITY.div_ceil(4);

/// Sequence-locked array of `N` atomic words.
#[derive(Debug)]
pub struct SeqSlot<const N: usize> {
    seq: AtomicU32,
    words: [AtomicU32; N],
}

impl<const N: usize> SeqSlot<N> {
    /// Creates a slot with every word zero.
    pub const fn new() -> Self {
        Self {
            seq: AtomicU32::new(0),
            words: [const { AtomicU32::new(0) }; N],
        }
    }

    /// Publishes `data` as the slot's new content.
    pub fn write(&self, data: &[u32; N]) {
        let mut seq = self.seq.load(Ordering::Relaxed);
        loop {
            if seq & 1 == 1 {
                hint::spin_loop();
                seq = self.seq.load(Ordering::Relaxed);
                continue;
            }
            match self.seq.compare_exchange_weak(
                seq,
                seq.wrapping_add(1),
                Ordering::Acquire,
                Ordering::Relaxed,
            ) {
                Ok(_) => break,
                Err(current) => seq = current,
            }
        }
        fence(Ordering::Release);

        for (word, value) in self.words.iter().zip(data) {
            word.store(*value, Ordering::Relaxed);
        }
        self.seq.store(seq.wrapping_add(2), Ordering::Release);
    }

    /// Returns a consistent copy of the slot's content.
    pub fn read(&self) -> [u32; N] {
        loop {
            let before = self.seq.load(Ordering::Acquire);
            if before & 1 == 1 {
                hint::spin_loop();
                continue;
            }

            let mut out = [0u32; N];
            for (o, word) in out.iter_mut().zip(&self.words) {
                *o = word.load(Ordering::Relaxed);
            }
            fence(Ordering::Acquire);

            if self.seq.load(Ordering::Relaxed) == before {
                return out;
            }
        }
    }

    /// Number of completed writes (wraps at `u32::MAX / 2`).
    pub fn generation(&self) -> u32 {
        self.seq.load(Ordering::Acquire) >> 1
    }
}

impl<const N: usize> Default for SeqSlot<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Stable per-pass copy of every slot.
///
/// Taken once per dispatch so that all handlers of the same kind see the same value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    /// Temperature slot.
    pub temp: f32,
    /// Accelerometer slot.
    pub acc: (i32, i32, i32),
    /// GPS slot.
    pub gps: GpsText,
}

impl Snapshot {
    /// Value for `kind`.
    pub fn value(&self, kind: SensorKind) -> SensorValue {
        match kind {
            SensorKind::Temp => SensorValue::Temp(self.temp),
            SensorKind::Acc => SensorValue::Acc(self.acc.0, self.acc.1, self.acc.2),
            SensorKind::Gps => SensorValue::Gps(self.gps.as_str().to_owned()),
        }
    }
}

/// Latest value of every sensor kind.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    temp: SeqSlot<1>,
    acc: SeqSlot<3>,
    gps: SeqSlot<GPS_WORDS>,
    read_faults: [AtomicU32; SensorKind::COUNT],
}

impl SnapshotStore {
    /// Creates a store holding each kind's initial value (`0.0`, `(0, 0, 0)`, `""`).
    pub const fn new() -> Self {
        Self {
            temp: SeqSlot::new(),
            acc: SeqSlot::new(),
            gps: SeqSlot::new(),
            read_faults: [const { AtomicU32::new(0) }; SensorKind::COUNT],
        }
    }

    /// Publishes a temperature reading.
    pub fn write_temp(&self, value: f32) {
        self.temp.write(&[value.to_bits()]);
    }

    /// Publishes an accelerometer triple.
    pub fn write_acc(&self, (x, y, z): (i32, i32, i32)) {
        self.acc.write(&[x as u32, y as u32, z as u32]);
    }

    /// Publishes a GPS text, packed little-endian after a length word.
    pub fn write_gps(&self, text: &GpsText) {
        let mut words = [0u32; GPS_WORDS];
        words[0] = text.len() as u32;
        for (word, chunk) in words[1..].iter_mut().zip(text.raw().chunks(4)) {
            let mut b = [0u8; 4];
            b[..chunk.len()].copy_from_slice(chunk);
            *word = u32::from_le_bytes(b);
        }
        self.gps.write(&words);
    }

    /// Latest temperature.
    pub fn read_temp(&self) -> f32 {
        let [bits] = self.temp.read();
        f32::from_bits(bits)
    }

    /// Latest accelerometer triple.
    pub fn read_acc(&self) -> (i32, i32, i32) {
        let [x, y, z] = self.acc.read();
        (x as i32, y as i32, z as i32)
    }

    /// Latest GPS text.
    pub fn read_gps(&self) -> GpsText {
        let words = self.gps.read();
        let mut bytes = [0u8; GPS_CAPACITY];
        for (chunk, word) in bytes.chunks_mut(4).zip(&words[1..]) {
            chunk.copy_from_slice(&word.to_le_bytes()[..chunk.len()]);
        }
        GpsText::from_raw(bytes, words[0] as usize)
    }

    /// Current value for `kind`.
    pub fn read(&self, kind: SensorKind) -> SensorValue {
        match kind {
            SensorKind::Temp => SensorValue::Temp(self.read_temp()),
            SensorKind::Acc => {
                let (x, y, z) = self.read_acc();
                SensorValue::Acc(x, y, z)
            }
            SensorKind::Gps => SensorValue::Gps(self.read_gps().as_str().to_owned()),
        }
    }

    /// Copies every slot.
    ///
    /// Each slot is individually consistent; slots are read in bit order.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            temp: self.read_temp(),
            acc: self.read_acc(),
            gps: self.read_gps(),
        }
    }

    /// Number of completed writes to `kind`'s slot.
    pub fn updates(&self, kind: SensorKind) -> u32 {
        match kind {
            SensorKind::Temp => self.temp.generation(),
            SensorKind::Acc => self.acc.generation(),
            SensorKind::Gps => self.gps.generation(),
        }
    }

    /// Number of failed reads recorded for `kind`.
    pub fn read_faults(&self, kind: SensorKind) -> u32 {
        self.read_faults[kind.index()].load(Ordering::Relaxed)
    }

    /// Stores the sentinel for `kind` and counts the fault.
    pub(crate) fn write_sentinel(&self, kind: SensorKind) {
        self.read_faults[kind.index()].fetch_add(1, Ordering::Relaxed);
        match kind {
            SensorKind::Temp => self.write_temp(SensorValue::TEMP_SENTINEL),
            SensorKind::Acc => self.write_acc((
                SensorValue::ACC_SENTINEL,
                SensorValue::ACC_SENTINEL,
                SensorValue::ACC_SENTINEL,
            )),
            SensorKind::Gps => self.write_gps(&GpsText::new()),
        }
    }
}
