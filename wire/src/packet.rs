//! Packet envelope: one opcode byte followed by a type-specific body.

use bytestream::{ByteReader, ByteWriter};

use crate::config::WireConfig;
use crate::error::{DecodeError, EncodeError, EncodeResult, LimitKind, WireResult};
use crate::limits::Limits;

/// Opcodes for the packet kinds this codec understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum PacketId {
    ConnectedPing = 0x00,
    UnconnectedPing = 0x01,
    UnconnectedPingOpenConnections = 0x02,
    ConnectedPong = 0x03,
    UnconnectedPong = 0x1C,
    Nack = 0xA0,
    Ack = 0xC0,
}

impl PacketId {
    /// Every known opcode, in ascending order.
    pub const ALL: [Self; 7] = [
        Self::ConnectedPing,
        Self::UnconnectedPing,
        Self::UnconnectedPingOpenConnections,
        Self::ConnectedPong,
        Self::UnconnectedPong,
        Self::Nack,
        Self::Ack,
    ];

    /// Parses an opcode from a raw byte.
    pub const fn parse(id: u8) -> Result<Self, DecodeError> {
        match id {
            0x00 => Ok(Self::ConnectedPing),
            0x01 => Ok(Self::UnconnectedPing),
            0x02 => Ok(Self::UnconnectedPingOpenConnections),
            0x03 => Ok(Self::ConnectedPong),
            0x1C => Ok(Self::UnconnectedPong),
            0xA0 => Ok(Self::Nack),
            0xC0 => Ok(Self::Ack),
            _ => Err(DecodeError::UnknownPacketKind { id }),
        }
    }

    /// Returns the raw opcode byte.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self as u8
    }
}

/// Capability set shared by every packet kind.
///
/// Encoding always writes the opcode first and then the body. Decoding starts
/// after the opcode: a dispatcher has already consumed it to pick the
/// prototype whose [`decode_body`](Packet::decode_body) is called.
pub trait Packet {
    /// The opcode this packet is framed with.
    fn id(&self) -> PacketId;

    /// Writes the type-specific fields.
    fn encode_body(&self, writer: &mut ByteWriter, config: &WireConfig) -> EncodeResult<()>;

    /// Reads the type-specific fields into `self`.
    fn decode_body(&mut self, reader: &mut ByteReader<'_>, config: &WireConfig)
        -> WireResult<()>;

    /// Writes the opcode followed by the body.
    fn encode(&self, writer: &mut ByteWriter, config: &WireConfig) -> EncodeResult<()> {
        writer.write_u8(self.id().raw());
        self.encode_body(writer, config)
    }
}

/// Encodes a packet into a fresh buffer.
///
/// Fails when the datagram would exceed `max_packet_bytes`, so every
/// datagram produced here passes [`read_packet_id`] under the same limits.
pub fn encode_packet<P: Packet + ?Sized>(
    packet: &P,
    config: &WireConfig,
) -> EncodeResult<Vec<u8>> {
    let mut writer = ByteWriter::new();
    packet.encode(&mut writer, config)?;
    let max = config.limits.max_packet_bytes;
    if writer.len() > max {
        return Err(EncodeError::LimitsExceeded {
            kind: LimitKind::PacketBytes,
            limit: max,
            actual: writer.len(),
        });
    }
    Ok(writer.finish())
}

/// Validates datagram size and consumes the opcode.
///
/// Returns the opcode and a reader positioned at the start of the body.
pub fn read_packet_id<'a>(
    buf: &'a [u8],
    limits: &Limits,
) -> WireResult<(PacketId, ByteReader<'a>)> {
    if buf.len() > limits.max_packet_bytes {
        return Err(DecodeError::LimitsExceeded {
            kind: LimitKind::PacketBytes,
            limit: limits.max_packet_bytes,
            actual: buf.len(),
        });
    }
    let mut reader = ByteReader::new(buf);
    let id = PacketId::parse(reader.read_u8()?)?;
    Ok((id, reader))
}
