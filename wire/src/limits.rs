//! Configurable limits for bounded decoding.

/// Wire-level limits for datagram decoding.
///
/// These limits are enforced during decoding to prevent resource exhaustion
/// from hostile peers. A single acknowledgment record can name millions of
/// sequence numbers, so the expanded count is bounded separately from the
/// record count.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Limits {
    /// Maximum datagram size in bytes.
    pub max_packet_bytes: usize,

    /// Maximum number of records in one ACK/NACK.
    pub max_ack_records: usize,

    /// Maximum number of sequence numbers one ACK/NACK may expand to.
    pub max_ack_sequence_numbers: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            // Largest MTU RakNet negotiates on Ethernet
            max_packet_bytes: 1492,

            // The record count is a u16 on the wire
            max_ack_records: usize::from(u16::MAX),
            max_ack_sequence_numbers: 1 << 16,
        }
    }
}

impl Limits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_packet_bytes: 512,
            max_ack_records: 32,
            max_ack_sequence_numbers: 256,
        }
    }

    /// Creates limits with no restrictions (use with caution).
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_packet_bytes: usize::MAX,
            max_ack_records: usize::MAX,
            max_ack_sequence_numbers: usize::MAX,
        }
    }
}
