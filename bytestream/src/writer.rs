//! Byte-level writer for encoding RakNet-style binary data.

use crate::error::{ByteError, ByteResult};
use crate::U24_MAX;

/// A byte-level writer backed by a growable buffer.
///
/// Call [`finish`](Self::finish) to get the final byte buffer.
#[derive(Debug, Default, Clone)]
pub struct ByteWriter {
    bytes: Vec<u8>,
}

impl ByteWriter {
    /// Creates a new empty `ByteWriter`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new `ByteWriter` with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bytes),
        }
    }

    /// Returns the number of bytes written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Writes a single byte.
    pub fn write_u8(&mut self, value: u8) {
        self.bytes.push(value);
    }

    /// Writes a one-byte boolean (`0x01` or `0x00`).
    pub fn write_bool(&mut self, value: bool) {
        self.write_u8(u8::from(value));
    }

    /// Writes a big-endian `u16`.
    pub fn write_u16(&mut self, value: u16) {
        self.bytes.extend_from_slice(&value.to_be_bytes());
    }

    /// Writes a little-endian unsigned 24-bit integer (a "triad").
    ///
    /// # Errors
    ///
    /// Returns [`ByteError::ValueOutOfRange`] if `value > U24_MAX`.
    pub fn write_u24_le(&mut self, value: u32) -> ByteResult<()> {
        if value > U24_MAX {
            return Err(ByteError::ValueOutOfRange {
                value: u64::from(value),
                bits: 24,
            });
        }
        self.bytes.extend_from_slice(&value.to_le_bytes()[..3]);
        Ok(())
    }

    /// Writes a big-endian `u64`.
    pub fn write_u64(&mut self, value: u64) {
        self.bytes.extend_from_slice(&value.to_be_bytes());
    }

    /// Writes a big-endian `i64`.
    pub fn write_i64(&mut self, value: i64) {
        self.bytes.extend_from_slice(&value.to_be_bytes());
    }

    /// Writes raw bytes with no prefix.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    /// Writes a string prefixed with its big-endian `u16` byte length.
    ///
    /// # Errors
    ///
    /// Returns [`ByteError::LengthOverflow`] if the string is longer than
    /// `u16::MAX` bytes.
    pub fn write_string(&mut self, value: &str) -> ByteResult<()> {
        let len = u16::try_from(value.len()).map_err(|_| ByteError::LengthOverflow {
            length: value.len(),
            max: usize::from(u16::MAX),
        })?;
        self.write_u16(len);
        self.write_bytes(value.as_bytes());
        Ok(())
    }

    /// Finishes writing and returns the byte buffer.
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.bytes
    }

    /// Finishes writing and appends to the provided buffer.
    pub fn finish_into(mut self, buf: &mut Vec<u8>) {
        buf.append(&mut self.bytes);
    }
}
