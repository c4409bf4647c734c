//! Opcode dispatch over the closed set of packet kinds.

use bytestream::{ByteReader, ByteWriter};
use wire::{EncodeResult, Packet, PacketId, WireConfig, WireResult};

use crate::ack::{AckKind, Acknowledgment};
use crate::ping::{ConnectedPing, ConnectedPong};
use crate::unconnected::{UnconnectedPing, UnconnectedPingOpenConnections, UnconnectedPong};

/// Any packet this codec can frame, one variant per opcode family.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RakPacket {
    ConnectedPing(ConnectedPing),
    ConnectedPong(ConnectedPong),
    UnconnectedPing(UnconnectedPing),
    UnconnectedPingOpenConnections(UnconnectedPingOpenConnections),
    UnconnectedPong(UnconnectedPong),
    Acknowledgment(Acknowledgment),
}

impl RakPacket {
    /// Blank packet for `id`, ready for [`Packet::decode_body`].
    #[must_use]
    pub fn prototype(id: PacketId) -> Self {
        match id {
            PacketId::ConnectedPing => Self::ConnectedPing(ConnectedPing::default()),
            PacketId::ConnectedPong => Self::ConnectedPong(ConnectedPong::default()),
            PacketId::UnconnectedPing => Self::UnconnectedPing(UnconnectedPing::default()),
            PacketId::UnconnectedPingOpenConnections => {
                Self::UnconnectedPingOpenConnections(UnconnectedPingOpenConnections::default())
            }
            PacketId::UnconnectedPong => Self::UnconnectedPong(UnconnectedPong::default()),
            PacketId::Ack => Self::Acknowledgment(Acknowledgment::prototype(AckKind::Ack)),
            PacketId::Nack => Self::Acknowledgment(Acknowledgment::prototype(AckKind::Nack)),
        }
    }

    fn as_packet(&self) -> &dyn Packet {
        match self {
            Self::ConnectedPing(packet) => packet,
            Self::ConnectedPong(packet) => packet,
            Self::UnconnectedPing(packet) => packet,
            Self::UnconnectedPingOpenConnections(packet) => packet,
            Self::UnconnectedPong(packet) => packet,
            Self::Acknowledgment(packet) => packet,
        }
    }

    fn as_packet_mut(&mut self) -> &mut dyn Packet {
        match self {
            Self::ConnectedPing(packet) => packet,
            Self::ConnectedPong(packet) => packet,
            Self::UnconnectedPing(packet) => packet,
            Self::UnconnectedPingOpenConnections(packet) => packet,
            Self::UnconnectedPong(packet) => packet,
            Self::Acknowledgment(packet) => packet,
        }
    }
}

impl Packet for RakPacket {
    fn id(&self) -> PacketId {
        self.as_packet().id()
    }

    fn encode_body(&self, writer: &mut ByteWriter, config: &WireConfig) -> EncodeResult<()> {
        self.as_packet().encode_body(writer, config)
    }

    fn decode_body(&mut self, reader: &mut ByteReader<'_>, config: &WireConfig) -> WireResult<()> {
        self.as_packet_mut().decode_body(reader, config)
    }
}

macro_rules! impl_from_packet {
    ($($ty:ident),* $(,)?) => {
        $(
            impl From<$ty> for RakPacket {
                fn from(packet: $ty) -> Self {
                    Self::$ty(packet)
                }
            }
        )*
    };
}

impl_from_packet!(
    ConnectedPing,
    ConnectedPong,
    UnconnectedPing,
    UnconnectedPingOpenConnections,
    UnconnectedPong,
    Acknowledgment,
);

/// Decodes one datagram: validates its size, reads the opcode, builds the
/// matching prototype and decodes the body into it.
///
/// Bytes after the body are ignored.
pub fn decode_packet(buf: &[u8], config: &WireConfig) -> WireResult<RakPacket> {
    let (id, mut reader) = wire::read_packet_id(buf, &config.limits)?;
    let mut packet = RakPacket::prototype(id);
    packet.decode_body(&mut reader, config)?;
    Ok(packet)
}

/// Encodes one packet, opcode first.
pub fn encode_packet(packet: &RakPacket, config: &WireConfig) -> EncodeResult<Vec<u8>> {
    wire::encode_packet(packet, config)
}
