//! Unconnected ping/pong, used for server discovery before a session exists.

use bytestream::{ByteReader, ByteWriter};
use wire::{ConnectionType, EncodeResult, Packet, PacketId, WireConfig, WireResult};

use crate::identifier::Identifier;

/// Discovery probe broadcast by clients.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnconnectedPing {
    pub timestamp: i64,
    /// Whether the received magic matched the configured one.
    ///
    /// Ignored on encode, where the configured magic is always written.
    pub magic_valid: bool,
    pub ping_id: i64,
    pub connection_type: ConnectionType,
}

impl UnconnectedPing {
    /// Creates a ping stamped with the configured local connection type.
    #[must_use]
    pub fn new(timestamp: i64, ping_id: i64, config: &WireConfig) -> Self {
        Self {
            timestamp,
            magic_valid: true,
            ping_id,
            connection_type: config.connection_type.clone(),
        }
    }

    fn write_fields(&self, writer: &mut ByteWriter, config: &WireConfig) -> EncodeResult<()> {
        writer.write_i64(self.timestamp);
        config.magic.write(writer);
        writer.write_i64(self.ping_id);
        self.connection_type.write(writer)
    }

    fn read_fields(&mut self, reader: &mut ByteReader<'_>, config: &WireConfig) -> WireResult<()> {
        self.timestamp = reader.read_i64()?;
        self.magic_valid = config.magic.check(reader)?;
        self.ping_id = reader.read_i64()?;
        self.connection_type = ConnectionType::read(reader)?;
        Ok(())
    }
}

impl Packet for UnconnectedPing {
    fn id(&self) -> PacketId {
        PacketId::UnconnectedPing
    }

    fn encode_body(&self, writer: &mut ByteWriter, config: &WireConfig) -> EncodeResult<()> {
        self.write_fields(writer, config)
    }

    fn decode_body(&mut self, reader: &mut ByteReader<'_>, config: &WireConfig) -> WireResult<()> {
        self.read_fields(reader, config)
    }
}

/// Discovery probe that only servers with free slots answer.
///
/// Same body as [`UnconnectedPing`], different opcode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnconnectedPingOpenConnections(pub UnconnectedPing);

impl Packet for UnconnectedPingOpenConnections {
    fn id(&self) -> PacketId {
        PacketId::UnconnectedPingOpenConnections
    }

    fn encode_body(&self, writer: &mut ByteWriter, config: &WireConfig) -> EncodeResult<()> {
        self.0.write_fields(writer, config)
    }

    fn decode_body(&mut self, reader: &mut ByteReader<'_>, config: &WireConfig) -> WireResult<()> {
        self.0.read_fields(reader, config)
    }
}

/// Server answer to an unconnected ping, carrying the status identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnconnectedPong {
    /// Timestamp echoed from the ping.
    pub timestamp: i64,
    /// Server GUID.
    pub pong_id: i64,
    /// Whether the received magic matched the configured one.
    pub magic_valid: bool,
    /// Rendered status string.
    pub identifier: String,
    pub connection_type: ConnectionType,
}

impl UnconnectedPong {
    /// Creates a pong, rendering `identifier` and stamping the configured
    /// local connection type.
    #[must_use]
    pub fn new<I: Identifier + ?Sized>(
        timestamp: i64,
        pong_id: i64,
        identifier: &I,
        config: &WireConfig,
    ) -> Self {
        Self {
            timestamp,
            pong_id,
            magic_valid: true,
            identifier: identifier.build(),
            connection_type: config.connection_type.clone(),
        }
    }

    /// Creates the reply to `ping`.
    #[must_use]
    pub fn reply_to<I: Identifier + ?Sized>(
        ping: &UnconnectedPing,
        pong_id: i64,
        identifier: &I,
        config: &WireConfig,
    ) -> Self {
        Self::new(ping.timestamp, pong_id, identifier, config)
    }
}

impl Packet for UnconnectedPong {
    fn id(&self) -> PacketId {
        PacketId::UnconnectedPong
    }

    fn encode_body(&self, writer: &mut ByteWriter, config: &WireConfig) -> EncodeResult<()> {
        writer.write_i64(self.timestamp);
        writer.write_i64(self.pong_id);
        config.magic.write(writer);
        writer.write_string(&self.identifier)?;
        self.connection_type.write(writer)
    }

    fn decode_body(&mut self, reader: &mut ByteReader<'_>, config: &WireConfig) -> WireResult<()> {
        self.timestamp = reader.read_i64()?;
        self.pong_id = reader.read_i64()?;
        self.magic_valid = config.magic.check(reader)?;
        self.identifier = reader.read_string()?;
        self.connection_type = ConnectionType::read(reader)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifier::MinecraftIdentifier;
    use wire::{ConnectionInfo, DecodeError, Magic, MAGIC_LEN};

    fn decode<P: Packet + Default>(bytes: &[u8], config: &WireConfig) -> WireResult<P> {
        let mut packet = P::default();
        let mut reader = ByteReader::new(&bytes[1..]);
        packet.decode_body(&mut reader, config)?;
        Ok(packet)
    }

    fn tagged_config() -> WireConfig {
        WireConfig::default().connection_type(ConnectionType::Tagged(ConnectionInfo::new(
            [9; 16], "rakcodec", "Rust", "0.3.0",
        )))
    }

    #[test]
    fn ping_layout_vanilla() {
        let config = WireConfig::default();
        let ping = UnconnectedPing::new(1, 2, &config);
        let bytes = wire::encode_packet(&ping, &config).unwrap();

        assert_eq!(bytes.len(), 1 + 8 + MAGIC_LEN + 8);
        assert_eq!(bytes[0], PacketId::UnconnectedPing.raw());
        assert_eq!(&bytes[9..9 + MAGIC_LEN], Magic::RAKNET.as_bytes());
    }

    #[test]
    fn ping_roundtrip_tagged() {
        let config = tagged_config();
        let ping = UnconnectedPing::new(123, -7, &config);
        let bytes = wire::encode_packet(&ping, &config).unwrap();
        let decoded: UnconnectedPing = decode(&bytes, &config).unwrap();
        assert_eq!(decoded, ping);
        assert!(!decoded.connection_type.is_vanilla());
    }

    #[test]
    fn open_connections_shares_body() {
        let config = WireConfig::default();
        let ping = UnconnectedPing::new(5, 6, &config);
        let plain = wire::encode_packet(&ping, &config).unwrap();
        let open =
            wire::encode_packet(&UnconnectedPingOpenConnections(ping.clone()), &config).unwrap();

        assert_eq!(open[0], PacketId::UnconnectedPingOpenConnections.raw());
        assert_eq!(plain[1..], open[1..]);

        let decoded: UnconnectedPingOpenConnections = decode(&open, &config).unwrap();
        assert_eq!(decoded.0, ping);
    }

    #[test]
    fn ping_with_foreign_magic_decodes_as_invalid() {
        let sender = WireConfig::with_magic(Magic::new([0x11; MAGIC_LEN]));
        let receiver = WireConfig::default();
        let bytes =
            wire::encode_packet(&UnconnectedPing::new(1, 1, &sender), &sender).unwrap();
        let decoded: UnconnectedPing = decode(&bytes, &receiver).unwrap();
        assert!(!decoded.magic_valid);
        assert_eq!(decoded.ping_id, 1);
    }

    #[test]
    fn pong_roundtrip_with_identifier() {
        let config = tagged_config();
        let status = MinecraftIdentifier {
            edition: MinecraftIdentifier::EDITION.to_owned(),
            motd: "hello".to_owned(),
            protocol: 390,
            version: "1.14.60".to_owned(),
            online_players: 0,
            max_players: 20,
            server_guid: 42,
            world_name: "world".to_owned(),
            gamemode: "Survival".to_owned(),
        };
        let ping = UnconnectedPing::new(77, 1, &config);
        let pong = UnconnectedPong::reply_to(&ping, 42, &status, &config);
        assert_eq!(pong.timestamp, 77);

        let bytes = wire::encode_packet(&pong, &config).unwrap();
        let decoded: UnconnectedPong = decode(&bytes, &config).unwrap();
        assert_eq!(decoded, pong);
        assert_eq!(
            MinecraftIdentifier::parse(&decoded.identifier),
            Some(status)
        );
    }

    #[test]
    fn pong_truncated_identifier() {
        let config = WireConfig::default();
        let pong = UnconnectedPong::new(1, 2, "status", &config);
        let bytes = wire::encode_packet(&pong, &config).unwrap();
        let err = decode::<UnconnectedPong>(&bytes[..bytes.len() - 2], &config).unwrap_err();
        assert!(matches!(err, DecodeError::UnexpectedEndOfBuffer { .. }));
    }
}
