//! Connected ping/pong, exchanged inside an established session.

use bytestream::{ByteReader, ByteWriter};
use wire::{EncodeResult, Packet, PacketId, WireConfig, WireResult};

/// Latency probe sent by either peer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConnectedPing {
    /// Sender clock in milliseconds.
    pub timestamp: i64,
}

impl ConnectedPing {
    #[must_use]
    pub const fn new(timestamp: i64) -> Self {
        Self { timestamp }
    }

    /// Builds the reply, echoing the ping timestamp.
    #[must_use]
    pub const fn reply(&self, pong_timestamp: i64) -> ConnectedPong {
        ConnectedPong {
            timestamp: self.timestamp,
            pong_timestamp,
        }
    }
}

impl Packet for ConnectedPing {
    fn id(&self) -> PacketId {
        PacketId::ConnectedPing
    }

    fn encode_body(&self, writer: &mut ByteWriter, _config: &WireConfig) -> EncodeResult<()> {
        writer.write_i64(self.timestamp);
        Ok(())
    }

    fn decode_body(
        &mut self,
        reader: &mut ByteReader<'_>,
        _config: &WireConfig,
    ) -> WireResult<()> {
        self.timestamp = reader.read_i64()?;
        Ok(())
    }
}

/// Reply to a [`ConnectedPing`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConnectedPong {
    /// Timestamp echoed from the ping.
    pub timestamp: i64,
    /// Responder clock when the pong was sent.
    pub pong_timestamp: i64,
}

impl ConnectedPong {
    /// Round-trip time given the local clock at receipt.
    #[must_use]
    pub const fn round_trip(&self, now: i64) -> i64 {
        now.saturating_sub(self.timestamp)
    }
}

impl Packet for ConnectedPong {
    fn id(&self) -> PacketId {
        PacketId::ConnectedPong
    }

    fn encode_body(&self, writer: &mut ByteWriter, _config: &WireConfig) -> EncodeResult<()> {
        writer.write_i64(self.timestamp);
        writer.write_i64(self.pong_timestamp);
        Ok(())
    }

    fn decode_body(
        &mut self,
        reader: &mut ByteReader<'_>,
        _config: &WireConfig,
    ) -> WireResult<()> {
        self.timestamp = reader.read_i64()?;
        self.pong_timestamp = reader.read_i64()?;
        Ok(())
    }
}
