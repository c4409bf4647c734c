//! ACK/NACK packet codec.
//!
//! Wire layout after the opcode:
//!
//! | Field | Size |
//! |---|---|
//! | record count | u16, big-endian |
//! | per record: single flag | 1 byte, `0x01` when single, `0x00` when ranged |
//! | per record: index | triad |
//! | per record: end index | triad, only when ranged |
//!
//! Outgoing records are condensed before writing; incoming records are
//! expanded to one record per sequence number before they reach the caller.

use bytestream::{ByteReader, ByteWriter};
use wire::{
    DecodeError, EncodeError, EncodeResult, LimitKind, Packet, PacketId, WireConfig, WireResult,
};

use crate::record::{condense, expand, number_count, Record};

/// Smallest encoded record: flag plus one triad.
const MIN_RECORD_BYTES: usize = 1 + 3;

/// Positive or negative acknowledgment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AckKind {
    /// Confirms receipt.
    Ack,
    /// Signals loss.
    Nack,
}

impl AckKind {
    /// The opcode this kind is framed with.
    #[must_use]
    pub const fn packet_id(self) -> PacketId {
        match self {
            Self::Ack => PacketId::Ack,
            Self::Nack => PacketId::Nack,
        }
    }

    /// Maps an opcode back to a kind.
    #[must_use]
    pub const fn from_packet_id(id: PacketId) -> Option<Self> {
        match id {
            PacketId::Ack => Some(Self::Ack),
            PacketId::Nack => Some(Self::Nack),
            _ => None,
        }
    }
}

/// An ACK or NACK packet.
///
/// Encoding writes the condensed form of `records` without storing it; call
/// [`Acknowledgment::condense`] to keep the condensed list.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Acknowledgment {
    pub kind: AckKind,
    pub records: Vec<Record>,
}

impl Acknowledgment {
    /// Creates an acknowledgment from any records.
    #[must_use]
    pub fn new(kind: AckKind, records: impl Into<Vec<Record>>) -> Self {
        Self {
            kind,
            records: records.into(),
        }
    }

    /// Creates a positive acknowledgment of the given sequence numbers.
    #[must_use]
    pub fn ack(numbers: impl IntoIterator<Item = u32>) -> Self {
        Self::from_numbers(AckKind::Ack, numbers)
    }

    /// Creates a negative acknowledgment of the given sequence numbers.
    #[must_use]
    pub fn nack(numbers: impl IntoIterator<Item = u32>) -> Self {
        Self::from_numbers(AckKind::Nack, numbers)
    }

    /// Blank packet of the given kind, ready for [`Packet::decode_body`].
    #[must_use]
    pub const fn prototype(kind: AckKind) -> Self {
        Self {
            kind,
            records: Vec::new(),
        }
    }

    fn from_numbers(kind: AckKind, numbers: impl IntoIterator<Item = u32>) -> Self {
        Self {
            kind,
            records: numbers.into_iter().map(Record::single).collect(),
        }
    }

    /// Replaces the records with their condensed form.
    pub fn condense(&mut self) {
        self.records = condense(&self.records);
    }

    /// Every sequence number the records denote, in record order.
    pub fn sequence_numbers(&self) -> impl Iterator<Item = u32> + '_ {
        self.records.iter().flat_map(|record| record.numbers())
    }
}

impl Packet for Acknowledgment {
    fn id(&self) -> PacketId {
        self.kind.packet_id()
    }

    fn encode_body(&self, writer: &mut ByteWriter, config: &WireConfig) -> EncodeResult<()> {
        let limits = &config.limits;
        let records = condense(&self.records);
        let count = u16::try_from(records.len()).map_err(|_| EncodeError::LengthOverflow {
            length: records.len(),
            max: usize::from(u16::MAX),
        })?;
        // Same bounds the decoder applies, so the peer can read what we send.
        if records.len() > limits.max_ack_records {
            return Err(EncodeError::LimitsExceeded {
                kind: LimitKind::AckRecords,
                limit: limits.max_ack_records,
                actual: records.len(),
            });
        }
        let total = number_count(&records);
        if total > limits.max_ack_sequence_numbers {
            return Err(EncodeError::LimitsExceeded {
                kind: LimitKind::AckSequenceNumbers,
                limit: limits.max_ack_sequence_numbers,
                actual: total,
            });
        }
        writer.write_u16(count);

        for record in &records {
            let single = !record.is_ranged();
            writer.write_bool(single);
            writer.write_u24_le(record.index())?;
            if !single {
                writer.write_u24_le(record.end_index())?;
            }
        }
        Ok(())
    }

    fn decode_body(
        &mut self,
        reader: &mut ByteReader<'_>,
        config: &WireConfig,
    ) -> WireResult<()> {
        let limits = &config.limits;
        let count = usize::from(reader.read_u16()?);
        if count > limits.max_ack_records {
            return Err(DecodeError::LimitsExceeded {
                kind: LimitKind::AckRecords,
                limit: limits.max_ack_records,
                actual: count,
            });
        }
        // Reject impossible counts before allocating for them.
        reader.ensure_bytes(count * MIN_RECORD_BYTES)?;

        let mut records = Vec::with_capacity(count);
        for _ in 0..count {
            let single = reader.read_bool()?;
            let index = reader.read_u24_le()?;
            let end_index = if single {
                index
            } else {
                reader.read_u24_le()?
            };
            records.push(Record::from_wire(index, end_index));
        }

        let total = number_count(&records);
        if total > limits.max_ack_sequence_numbers {
            return Err(DecodeError::LimitsExceeded {
                kind: LimitKind::AckSequenceNumbers,
                limit: limits.max_ack_sequence_numbers,
                actual: total,
            });
        }

        self.records = expand(&records);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(ack: &Acknowledgment) -> Vec<u8> {
        wire::encode_packet(ack, &WireConfig::default()).unwrap()
    }

    fn decode_body(
        kind: AckKind,
        body: &[u8],
        config: &WireConfig,
    ) -> WireResult<Acknowledgment> {
        let mut ack = Acknowledgment::prototype(kind);
        let mut reader = ByteReader::new(body);
        ack.decode_body(&mut reader, config)?;
        Ok(ack)
    }

    #[test]
    fn kind_maps_to_opcode() {
        assert_eq!(AckKind::Ack.packet_id(), PacketId::Ack);
        assert_eq!(AckKind::Nack.packet_id(), PacketId::Nack);
        assert_eq!(AckKind::from_packet_id(PacketId::Nack), Some(AckKind::Nack));
        assert_eq!(AckKind::from_packet_id(PacketId::ConnectedPing), None);
    }

    #[test]
    fn encode_empty() {
        assert_eq!(encode(&Acknowledgment::ack([])), vec![0xC0, 0x00, 0x00]);
    }

    #[test]
    fn encode_condenses_before_writing() {
        let bytes = encode(&Acknowledgment::nack([2, 0, 1, 5]));
        assert_eq!(
            bytes,
            vec![
                0xA0, // opcode
                0x00, 0x02, // two records
                0x00, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00, // ranged 0..=2
                0x01, 0x05, 0x00, 0x00, // single 5
            ]
        );
    }

    #[test]
    fn encode_rejects_sequence_number_above_triad() {
        let ack = Acknowledgment::ack([bytestream::U24_MAX + 1]);
        let err = wire::encode_packet(&ack, &WireConfig::default()).unwrap_err();
        assert_eq!(
            err,
            EncodeError::ValueOutOfRange {
                value: 0x0100_0000,
                bits: 24
            }
        );
    }

    #[test]
    fn encode_rejects_too_many_records() {
        // Every other number so nothing merges.
        let ack = Acknowledgment::ack((0..=u32::from(u16::MAX)).map(|n| n * 2));
        let err = wire::encode_packet(&ack, &WireConfig::default()).unwrap_err();
        assert_eq!(
            err,
            EncodeError::LengthOverflow {
                length: 65_536,
                max: 65_535
            }
        );
    }

    #[test]
    fn encode_rejects_more_numbers_than_decode_accepts() {
        // One ranged record, tiny on the wire, too wide for the default limit.
        let ack = Acknowledgment::ack(0..70_000);
        let err = wire::encode_packet(&ack, &WireConfig::default()).unwrap_err();
        assert_eq!(
            err,
            EncodeError::LimitsExceeded {
                kind: LimitKind::AckSequenceNumbers,
                limit: 65_536,
                actual: 70_000
            }
        );
    }

    #[test]
    fn encode_rejects_more_records_than_decode_accepts() {
        let config = WireConfig::for_testing();
        let ack = Acknowledgment::ack((0..33).map(|n| n * 2));
        let err = wire::encode_packet(&ack, &config).unwrap_err();
        assert_eq!(
            err,
            EncodeError::LimitsExceeded {
                kind: LimitKind::AckRecords,
                limit: 32,
                actual: 33
            }
        );
    }

    #[test]
    fn encode_at_sequence_limit_decodes() {
        let config = WireConfig::default();
        let ack = Acknowledgment::ack(0..65_536);
        let bytes = wire::encode_packet(&ack, &config).unwrap();
        let decoded = decode_body(AckKind::Ack, &bytes[1..], &config).unwrap();
        assert_eq!(decoded.records.len(), 65_536);
    }

    #[test]
    fn encode_does_not_mutate_records() {
        let ack = Acknowledgment::ack([3, 1, 2]);
        let _ = encode(&ack);
        assert_eq!(ack.records.len(), 3);
    }

    #[test]
    fn condense_in_place() {
        let mut ack = Acknowledgment::ack([3, 1, 2, 9]);
        ack.condense();
        assert_eq!(ack.records, vec![Record::ranged(1, 3), Record::single(9)]);
    }

    #[test]
    fn decode_single_and_ranged() {
        let body = [
            0x00, 0x02, // count
            0x01, 0x07, 0x00, 0x00, // single 7
            0x00, 0x14, 0x00, 0x00, 0x16, 0x00, 0x00, // ranged 20..=22
        ];
        let ack = decode_body(AckKind::Ack, &body, &WireConfig::default()).unwrap();
        assert_eq!(ack.sequence_numbers().collect::<Vec<_>>(), vec![7, 20, 21, 22]);
        assert!(ack.records.iter().all(|record| !record.is_ranged()));
    }

    #[test]
    fn decode_empty() {
        let ack = decode_body(AckKind::Nack, &[0x00, 0x00], &WireConfig::default()).unwrap();
        assert!(ack.records.is_empty());
        assert_eq!(ack.kind, AckKind::Nack);
    }

    #[test]
    fn decode_count_exceeds_buffer() {
        let body = [0x00, 0x03, 0x01, 0x07, 0x00, 0x00];
        let err = decode_body(AckKind::Ack, &body, &WireConfig::default()).unwrap_err();
        assert_eq!(
            err,
            DecodeError::UnexpectedEndOfBuffer {
                requested: 12,
                available: 4
            }
        );
    }

    #[test]
    fn decode_truncated_end_index() {
        // Count fits the minimum size but the ranged record lacks its end triad.
        let body = [0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x05];
        let err = decode_body(AckKind::Ack, &body, &WireConfig::default()).unwrap_err();
        assert!(matches!(err, DecodeError::UnexpectedEndOfBuffer { .. }));
    }

    #[test]
    fn decode_missing_count() {
        let err = decode_body(AckKind::Ack, &[0x00], &WireConfig::default()).unwrap_err();
        assert_eq!(
            err,
            DecodeError::UnexpectedEndOfBuffer {
                requested: 2,
                available: 1
            }
        );
    }

    #[test]
    fn decode_tolerates_overlapping_and_malformed_records() {
        let body = [
            0x00, 0x03, // count
            0x00, 0x01, 0x00, 0x00, 0x03, 0x00, 0x00, // ranged 1..=3
            0x00, 0x02, 0x00, 0x00, 0x02, 0x00, 0x00, // "ranged" 2..=2
            0x00, 0x09, 0x00, 0x00, 0x04, 0x00, 0x00, // inverted 9..=4
        ];
        let ack = decode_body(AckKind::Ack, &body, &WireConfig::default()).unwrap();
        assert_eq!(ack.sequence_numbers().collect::<Vec<_>>(), vec![1, 2, 3, 2, 9]);
    }

    #[test]
    fn decode_enforces_record_limit() {
        let config = WireConfig::for_testing();
        let body = [0x00, 0x21];
        let err = decode_body(AckKind::Ack, &body, &config).unwrap_err();
        assert_eq!(
            err,
            DecodeError::LimitsExceeded {
                kind: LimitKind::AckRecords,
                limit: 32,
                actual: 33
            }
        );
    }

    #[test]
    fn decode_enforces_expansion_limit() {
        let config = WireConfig::for_testing();
        // One record covering 0..=0xFFFFFF.
        let body = [0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF];
        let err = decode_body(AckKind::Ack, &body, &config).unwrap_err();
        assert_eq!(
            err,
            DecodeError::LimitsExceeded {
                kind: LimitKind::AckSequenceNumbers,
                limit: 256,
                actual: 0x0100_0000
            }
        );
    }

    #[test]
    fn roundtrip_through_body() {
        let original = Acknowledgment::ack([15, 9, 0, 1, 2, 5, 8, 10]);
        let bytes = encode(&original);
        assert_eq!(bytes[0], PacketId::Ack.raw());

        let decoded = decode_body(AckKind::Ack, &bytes[1..], &WireConfig::default()).unwrap();
        let mut expected: Vec<u32> = original.sequence_numbers().collect();
        expected.sort_unstable();
        assert_eq!(decoded.sequence_numbers().collect::<Vec<_>>(), expected);
    }
}
