//! # Bounded GPS text buffer.
//!
//! [`GpsText`] is an inline, fixed-size UTF-8 buffer so that GPS readers can format
//! a position from interrupt context without touching the heap:
//!
//! ```rust
//! use std::fmt::Write;
//! use sensor_hub::GpsText;
//!
//! let mut text = GpsText::new();
//! write!(text, "Lat: {:.2}, Long: {:.2}", 12.34, 56.78).unwrap();
//! assert_eq!(text.as_str(), "Lat: 12.34, Long: 56.78");
//! ```
//!
//! Writes past [`GPS_CAPACITY`] are truncated at the last whole character that fits.

use std::fmt;

/// Maximum GPS text length in bytes.
pub const GPS_CAPACITY: usize = 50;

/// Fixed-capacity GPS position text.
#[derive(Clone, Copy)]
pub struct GpsText {
    len: u8,
    bytes: [u8; GPS_CAPACITY],
}

impl GpsText {
    /// Creates an empty buffer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            len: 0,
            bytes: [0; GPS_CAPACITY],
        }
    }

    /// Copies `s` into a new buffer, truncating to [`GPS_CAPACITY`] bytes.
    #[must_use]
    pub fn from_str_truncated(s: &str) -> Self {
        let mut text = Self::new();
        text.push_str(s);
        text
    }

    /// Rebuilds a buffer from raw parts, as stored in a snapshot slot.
    ///
    /// Invalid UTF-8 (which a torn read could never produce, but a corrupted
    /// slot might) is cut back to the longest valid prefix.
    pub(crate) fn from_raw(bytes: [u8; GPS_CAPACITY], len: usize) -> Self {
        let len = len.min(GPS_CAPACITY);
        let valid = match std::str::from_utf8(&bytes[..len]) {
            Ok(_) => len,
            Err(e) => e.valid_up_to(),
        };
        Self {
            len: valid as u8,
            bytes,
        }
    }

    /// Raw backing bytes; only the first [`len`](Self::len) are meaningful.
    pub(crate) fn raw(&self) -> &[u8; GPS_CAPACITY] {
        &self.bytes
    }

    /// Appends as much of `s` as fits; returns `false` if anything was cut.
    pub fn push_str(&mut self, s: &str) -> bool {
        let free = GPS_CAPACITY - self.len();
        let take = if s.len() <= free {
            s.len()
        } else {
            // back off to a char boundary
            (0..=free).rev().find(|&i| s.is_char_boundary(i)).unwrap_or(0)
        };
        let start = self.len();
        self.bytes[start..start + take].copy_from_slice(&s.as_bytes()[..take]);
        self.len += take as u8;
        take == s.len()
    }

    /// Empties the buffer.
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Current length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// True if no text is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Borrow the text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        // push_str and from_raw only ever keep whole UTF-8 sequences
        std::str::from_utf8(&self.bytes[..self.len()]).unwrap_or_default()
    }
}

impl Default for GpsText {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for GpsText {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for GpsText {}

impl fmt::Write for GpsText {
    /// Truncating write: never fails, extra input is dropped.
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_str(s);
        Ok(())
    }
}

impl fmt::Debug for GpsText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("GpsText").field(&self.as_str()).finish()
    }
}

impl fmt::Display for GpsText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
