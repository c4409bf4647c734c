//! Byte-level reader with bounded operations.

use crate::error::{ByteError, ByteResult};

/// A byte-level reader for decoding RakNet-style binary data.
///
/// All read operations are bounds-checked and return errors on failure.
/// The reader never panics on malformed input.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Creates a new `ByteReader` from a byte slice.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the number of bytes remaining to read.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Returns `true` if there are no more bytes to read.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Returns the current byte position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Reads a single byte.
    pub fn read_u8(&mut self) -> ByteResult<u8> {
        let [value] = self.read_array::<1>()?;
        Ok(value)
    }

    /// Reads a one-byte boolean. Any non-zero byte is `true`.
    pub fn read_bool(&mut self) -> ByteResult<bool> {
        Ok(self.read_u8()? != 0)
    }

    /// Reads a big-endian `u16`.
    pub fn read_u16(&mut self) -> ByteResult<u16> {
        Ok(u16::from_be_bytes(self.read_array()?))
    }

    /// Reads a little-endian unsigned 24-bit integer (a "triad").
    pub fn read_u24_le(&mut self) -> ByteResult<u32> {
        let [b0, b1, b2] = self.read_array()?;
        Ok(u32::from_le_bytes([b0, b1, b2, 0]))
    }

    /// Reads a big-endian `u64`.
    pub fn read_u64(&mut self) -> ByteResult<u64> {
        Ok(u64::from_be_bytes(self.read_array()?))
    }

    /// Reads a big-endian `i64`.
    pub fn read_i64(&mut self) -> ByteResult<i64> {
        Ok(i64::from_be_bytes(self.read_array()?))
    }

    /// Reads exactly `N` bytes into an array.
    pub fn read_array<const N: usize>(&mut self) -> ByteResult<[u8; N]> {
        let slice = self.read_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        Ok(out)
    }

    /// Reads `len` bytes, borrowing them from the underlying buffer.
    pub fn read_bytes(&mut self, len: usize) -> ByteResult<&'a [u8]> {
        let slice = self.peek_bytes(len)?;
        self.pos += len;
        Ok(slice)
    }

    /// Returns the next `len` bytes without consuming them.
    pub fn peek_bytes(&self, len: usize) -> ByteResult<&'a [u8]> {
        self.ensure_bytes(len)?;
        let data = self.data;
        Ok(&data[self.pos..self.pos + len])
    }

    /// Reads a string prefixed with its big-endian `u16` byte length.
    pub fn read_string(&mut self) -> ByteResult<String> {
        let len = usize::from(self.read_u16()?);
        let position = self.pos;
        let bytes = self.read_bytes(len)?;
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|_| ByteError::InvalidUtf8 { position })
    }

    /// Ensures at least `len` bytes remain.
    pub fn ensure_bytes(&self, len: usize) -> ByteResult<()> {
        let available = self.remaining();
        if len > available {
            return Err(ByteError::UnexpectedEof {
                requested: len,
                available,
            });
        }
        Ok(())
    }
}
