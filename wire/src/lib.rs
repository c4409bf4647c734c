//! Envelope framing and offline-message primitives for the rakcodec RakNet codec.
//!
//! This crate handles the parts of the wire format every packet shares: the
//! opcode byte, the [`Packet`] capability trait, the offline-message magic, the
//! connection-type tag and bounded-decoding limits. It does not know the body
//! layout of any particular packet.
//!
//! # Design Principles
//!
//! - **Byte-exact** - Peers are stock RakNet implementations; framing never changes.
//! - **Bounded decoding** - Datagram size and ack expansion are validated against [`Limits`].
//! - **Injected constants** - Magic and connection type travel in a [`WireConfig`], not globals.

mod config;
mod connection;
mod error;
mod limits;
mod magic;
mod packet;

pub use config::WireConfig;
pub use connection::{
    ConnectionInfo, ConnectionType, CONNECTION_TYPE_MAGIC, MAX_METADATA_ENTRIES,
};
pub use error::{DecodeError, EncodeError, EncodeResult, LimitKind, WireResult};
pub use limits::Limits;
pub use magic::{Magic, MAGIC_LEN};
pub use packet::{encode_packet, read_packet_id, Packet, PacketId};
