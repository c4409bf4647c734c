//! Introspection and debugging tools for captured RakNet datagrams.
//!
//! This crate provides utilities for inspecting and understanding encoded packets:
//!
//! - Summarize a datagram (opcode, body size, trailing bytes)
//! - Decode a datagram into structured JSON
//! - Show how a set of sequence numbers condenses on the wire
//!
//! # Design Principles
//!
//! - **Same decoder** - Everything goes through the codec crate; no parallel parsing.
//! - **Human-readable output** - Make it easy to understand what the codec is doing.

use std::fmt::Write as _;

use anyhow::{Context, Result};
use bytestream::ByteReader;
use codec::{
    condense, AckKind, Acknowledgment, RakPacket, Record, UnconnectedPingOpenConnections,
};
use serde::Serialize;
use wire::{ConnectionType, Packet, PacketId, WireConfig};

/// Summary of one datagram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InspectReport {
    pub packet_id: PacketId,
    pub total_bytes: usize,
    /// Bytes consumed by the body, opcode excluded.
    pub body_bytes: usize,
    /// Bytes left after the body; the decoder ignores them.
    pub trailing_bytes: usize,
    pub ack: Option<AckSummary>,
}

/// Acknowledgment-specific part of an [`InspectReport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AckSummary {
    /// Record count as written in the datagram.
    pub wire_records: u16,
    /// Sequence numbers after expansion.
    pub sequence_numbers: usize,
}

/// A decoded datagram, ready for serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodeOutput {
    pub packet_id: PacketId,
    pub packet: RakPacket,
}

/// Result of condensing a list of sequence numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CondenseReport {
    pub records: Vec<Record>,
    /// The full datagram, opcode included.
    pub encoded: Vec<u8>,
}

/// Decodes `bytes` and reports where its bytes went.
pub fn inspect_packet(bytes: &[u8], config: &WireConfig) -> Result<InspectReport> {
    let (packet, trailing_bytes) = decode_with_trailing(bytes, config)?;
    let packet_id = packet.id();
    let ack = match &packet {
        RakPacket::Acknowledgment(ack) => {
            let mut reader = ByteReader::new(&bytes[1..]);
            let wire_records = reader.read_u16().context("read record count")?;
            Some(AckSummary {
                wire_records,
                sequence_numbers: ack.records.len(),
            })
        }
        _ => None,
    };
    Ok(InspectReport {
        packet_id,
        total_bytes: bytes.len(),
        body_bytes: bytes.len() - 1 - trailing_bytes,
        trailing_bytes,
        ack,
    })
}

/// Decodes `bytes` into a JSON value.
pub fn decode_packet_json(bytes: &[u8], config: &WireConfig) -> Result<serde_json::Value> {
    let (packet, _) = decode_with_trailing(bytes, config)?;
    let output = DecodeOutput {
        packet_id: packet.id(),
        packet,
    };
    serde_json::to_value(&output).context("serialize decoded packet")
}

/// Renders a decoded packet as indented text.
#[must_use]
pub fn format_decode_pretty(packet: &RakPacket) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:?} (0x{:02x})", packet.id(), packet.id().raw());
    match packet {
        RakPacket::ConnectedPing(ping) => {
            let _ = writeln!(out, "  timestamp: {}", ping.timestamp);
        }
        RakPacket::ConnectedPong(pong) => {
            let _ = writeln!(out, "  timestamp: {}", pong.timestamp);
            let _ = writeln!(out, "  pong_timestamp: {}", pong.pong_timestamp);
        }
        RakPacket::UnconnectedPing(ping)
        | RakPacket::UnconnectedPingOpenConnections(UnconnectedPingOpenConnections(ping)) => {
            let _ = writeln!(out, "  timestamp: {}", ping.timestamp);
            let _ = writeln!(out, "  magic_valid: {}", ping.magic_valid);
            let _ = writeln!(out, "  ping_id: {}", ping.ping_id);
            write_connection_type(&mut out, &ping.connection_type);
        }
        RakPacket::UnconnectedPong(pong) => {
            let _ = writeln!(out, "  timestamp: {}", pong.timestamp);
            let _ = writeln!(out, "  pong_id: {}", pong.pong_id);
            let _ = writeln!(out, "  magic_valid: {}", pong.magic_valid);
            let _ = writeln!(out, "  identifier: {}", pong.identifier);
            write_connection_type(&mut out, &pong.connection_type);
        }
        RakPacket::Acknowledgment(ack) => {
            let records = condense(&ack.records);
            let _ = writeln!(out, "  sequence numbers: {}", ack.records.len());
            let _ = writeln!(out, "  ranges: {}", join_records(&records));
        }
    }
    out.trim_end().to_string()
}

/// Condenses `numbers` into records and encodes them as an acknowledgment.
pub fn condense_numbers(
    numbers: &[u32],
    kind: AckKind,
    config: &WireConfig,
) -> Result<CondenseReport> {
    let records: Vec<Record> = numbers.iter().copied().map(Record::single).collect();
    let ack = Acknowledgment::new(kind, records);
    let encoded = wire::encode_packet(&ack, config).context("encode acknowledgment")?;
    Ok(CondenseReport {
        records: condense(&ack.records),
        encoded,
    })
}

/// Lowercase hex with a space between bytes.
#[must_use]
pub fn hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for (i, byte) in bytes.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{byte:02x}");
    }
    out
}

/// Comma-separated record list, e.g. `0..=2, 5`.
#[must_use]
pub fn join_records(records: &[Record]) -> String {
    records
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn decode_with_trailing(bytes: &[u8], config: &WireConfig) -> Result<(RakPacket, usize)> {
    let (id, mut reader) = wire::read_packet_id(bytes, &config.limits).context("read opcode")?;
    let mut packet = RakPacket::prototype(id);
    packet
        .decode_body(&mut reader, config)
        .with_context(|| format!("decode {id:?} body"))?;
    Ok((packet, reader.remaining()))
}

fn write_connection_type(out: &mut String, connection_type: &ConnectionType) {
    match connection_type {
        ConnectionType::Vanilla => {
            let _ = writeln!(out, "  connection_type: vanilla");
        }
        ConnectionType::Tagged(info) => {
            let _ = writeln!(
                out,
                "  connection_type: {} {} ({})",
                info.name,
                info.version,
                info.language
            );
            for (key, value) in &info.metadata {
                let _ = writeln!(out, "    {key} = {value}");
            }
        }
    }
}
