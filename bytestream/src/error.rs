//! Error types for bytestream operations.

use std::fmt;

/// Result type for bytestream operations.
pub type ByteResult<T> = Result<T, ByteError>;

/// Errors that can occur during byte-level encoding/decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ByteError {
    /// Attempted to read past the end of the buffer.
    UnexpectedEof {
        /// Number of bytes requested.
        requested: usize,
        /// Number of bytes available.
        available: usize,
    },

    /// Value exceeds the range representable by the field width.
    ValueOutOfRange {
        /// The value that was out of range.
        value: u64,
        /// Width of the field in bits.
        bits: usize,
    },

    /// A length prefix cannot represent the payload length.
    LengthOverflow {
        /// The payload length.
        length: usize,
        /// Largest length the prefix can carry.
        max: usize,
    },

    /// A length-prefixed string was not valid UTF-8.
    InvalidUtf8 {
        /// Byte offset of the string payload.
        position: usize,
    },
}

impl fmt::Display for ByteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEof {
                requested,
                available,
            } => {
                write!(
                    f,
                    "attempted to read {requested} bytes but only {available} bytes available"
                )
            }
            Self::ValueOutOfRange { value, bits } => {
                write!(f, "value {value} cannot be represented in {bits} bits")
            }
            Self::LengthOverflow { length, max } => {
                write!(f, "length {length} exceeds prefix maximum {max}")
            }
            Self::InvalidUtf8 { position } => {
                write!(f, "invalid utf-8 string at byte {position}")
            }
        }
    }
}

impl std::error::Error for ByteError {}
