//! Error types for wire format operations.

use std::fmt;

use bytestream::ByteError;

/// Result type for decode operations.
pub type WireResult<T> = Result<T, DecodeError>;

/// Result type for encode operations.
pub type EncodeResult<T> = Result<T, EncodeError>;

/// Errors that can occur while decoding a datagram.
///
/// Every variant aborts the decode call; a partially read packet is never
/// returned.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    /// Buffer is shorter than the field being read.
    UnexpectedEndOfBuffer { requested: usize, available: usize },

    /// Opcode byte is not a recognized packet kind.
    UnknownPacketKind { id: u8 },

    /// Limits exceeded.
    LimitsExceeded {
        kind: LimitKind,
        limit: usize,
        actual: usize,
    },

    /// Length-prefixed string was not valid UTF-8.
    InvalidString { position: usize },

    /// Catch-all for primitive failures without a dedicated variant; the
    /// current readers only raise the two mapped above.
    Primitive(ByteError),
}

/// Specific wire limits that can be exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    PacketBytes,
    AckRecords,
    AckSequenceNumbers,
}

/// Errors that can occur during encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// Value does not fit its fixed-width field.
    ValueOutOfRange { value: u64, bits: usize },

    /// Collection or string is too long for its length prefix.
    LengthOverflow { length: usize, max: usize },

    /// Output would be rejected by a decoder using the same limits.
    LimitsExceeded {
        kind: LimitKind,
        limit: usize,
        actual: usize,
    },

    /// Any other primitive failure.
    Primitive(ByteError),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEndOfBuffer {
                requested,
                available,
            } => {
                write!(
                    f,
                    "unexpected end of buffer: need {requested} bytes, have {available}"
                )
            }
            Self::UnknownPacketKind { id } => {
                write!(f, "unknown packet kind: 0x{id:02X}")
            }
            Self::LimitsExceeded {
                kind,
                limit,
                actual,
            } => {
                write!(f, "{kind} limit exceeded: {actual} > {limit}")
            }
            Self::InvalidString { position } => {
                write!(f, "invalid utf-8 string at byte {position}")
            }
            Self::Primitive(err) => write!(f, "primitive error: {err}"),
        }
    }
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PacketBytes => "packet bytes",
            Self::AckRecords => "ack records",
            Self::AckSequenceNumbers => "ack sequence numbers",
        };
        write!(f, "{name}")
    }
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValueOutOfRange { value, bits } => {
                write!(f, "value {value} does not fit in {bits} bits")
            }
            Self::LengthOverflow { length, max } => {
                write!(f, "length overflow: {length} > {max}")
            }
            Self::LimitsExceeded {
                kind,
                limit,
                actual,
            } => {
                write!(f, "{kind} limit exceeded: {actual} > {limit}")
            }
            Self::Primitive(err) => write!(f, "primitive error: {err}"),
        }
    }
}

impl std::error::Error for DecodeError {}

impl std::error::Error for EncodeError {}

impl From<ByteError> for DecodeError {
    fn from(err: ByteError) -> Self {
        match err {
            ByteError::UnexpectedEof {
                requested,
                available,
            } => Self::UnexpectedEndOfBuffer {
                requested,
                available,
            },
            ByteError::InvalidUtf8 { position } => Self::InvalidString { position },
            other => Self::Primitive(other),
        }
    }
}

impl From<ByteError> for EncodeError {
    fn from(err: ByteError) -> Self {
        match err {
            ByteError::ValueOutOfRange { value, bits } => Self::ValueOutOfRange { value, bits },
            ByteError::LengthOverflow { length, max } => Self::LengthOverflow { length, max },
            other => Self::Primitive(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_error_display_unknown_kind() {
        let err = DecodeError::UnknownPacketKind { id: 0xFE };
        let msg = err.to_string();
        assert!(msg.contains("0xFE"));
    }

    #[test]
    fn decode_error_display_limits_exceeded() {
        let err = DecodeError::LimitsExceeded {
            kind: LimitKind::AckRecords,
            limit: 4,
            actual: 10,
        };
        let msg = err.to_string();
        assert!(msg.contains("ack records"));
        assert!(msg.contains("10"));
    }

    #[test]
    fn eof_maps_to_unexpected_end_of_buffer() {
        let err: DecodeError = ByteError::UnexpectedEof {
            requested: 3,
            available: 1,
        }
        .into();
        assert_eq!(
            err,
            DecodeError::UnexpectedEndOfBuffer {
                requested: 3,
                available: 1
            }
        );
    }

    #[test]
    fn utf8_maps_to_invalid_string() {
        let err: DecodeError = ByteError::InvalidUtf8 { position: 9 }.into();
        assert_eq!(err, DecodeError::InvalidString { position: 9 });
    }

    #[test]
    fn range_maps_to_encode_value_out_of_range() {
        let err: EncodeError = ByteError::ValueOutOfRange {
            value: 1 << 24,
            bits: 24,
        }
        .into();
        assert!(matches!(err, EncodeError::ValueOutOfRange { bits: 24, .. }));
    }

    #[test]
    fn encode_error_display() {
        let err = EncodeError::LengthOverflow {
            length: 70_000,
            max: 65_535,
        };
        let msg = err.to_string();
        assert!(msg.contains("length overflow"));
        assert!(msg.contains("70000"));
    }

    #[test]
    fn encode_error_display_limits_exceeded() {
        let err = EncodeError::LimitsExceeded {
            kind: LimitKind::PacketBytes,
            limit: 1492,
            actual: 2394,
        };
        assert_eq!(err.to_string(), "packet bytes limit exceeded: 2394 > 1492");
    }
}
