//! Selective-acknowledgment and ping/pong packet codecs for RakNet.
//!
//! This is the main codec crate that ties together bytestream and wire to
//! encode and decode whole RakNet packets.
//!
//! # Features
//!
//! - [`Record`] with [`condense`] and [`expand`] range compression
//! - ACK/NACK encoding/decoding ([`Acknowledgment`])
//! - Connected and unconnected ping/pong bodies
//! - Server status identifiers ([`Identifier`])
//! - Opcode dispatch ([`RakPacket`], [`decode_packet`])
//!
//! # Design Principles
//!
//! - **Canonical output** - Outgoing acknowledgments are always sorted, disjoint and maximal.
//! - **Tolerant input** - Decoded records are exposed as sent; nothing is re-sorted.
//! - **Stateless** - No globals; every call takes a caller-owned buffer and [`WireConfig`].
//!
//! # Example
//!
//! ```
//! use codec::{decode_packet, encode_packet, Acknowledgment, RakPacket};
//! use wire::WireConfig;
//!
//! let config = WireConfig::default();
//! let ack = Acknowledgment::ack([0, 1, 2, 5]);
//! let bytes = encode_packet(&ack.into(), &config).unwrap();
//!
//! let RakPacket::Acknowledgment(decoded) = decode_packet(&bytes, &config).unwrap() else {
//!     unreachable!();
//! };
//! assert_eq!(decoded.sequence_numbers().collect::<Vec<_>>(), vec![0, 1, 2, 5]);
//! ```

mod ack;
mod identifier;
mod packet;
mod ping;
mod record;
mod unconnected;

pub use ack::{AckKind, Acknowledgment};
pub use identifier::{BasicIdentifier, Identifier, MinecraftIdentifier};
pub use packet::{decode_packet, encode_packet, RakPacket};
pub use ping::{ConnectedPing, ConnectedPong};
pub use record::{condense, expand, number_count, Record};
pub use unconnected::{UnconnectedPing, UnconnectedPingOpenConnections, UnconnectedPong};
pub use wire::{DecodeError, EncodeError, Limits, Packet, PacketId, WireConfig};
