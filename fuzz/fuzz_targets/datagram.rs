#![no_main]

use codec::{condense, decode_packet, encode_packet, RakPacket};
use libfuzzer_sys::fuzz_target;
use wire::{Packet, WireConfig};

fuzz_target!(|data: &[u8]| {
    let config = WireConfig::for_testing();
    let Ok(packet) = decode_packet(data, &config) else {
        return;
    };

    // Whatever decodes must re-encode and decode to the same packet.
    let Ok(bytes) = encode_packet(&packet, &config) else {
        return;
    };
    let again = decode_packet(&bytes, &config).expect("re-decode of encoded packet");
    match (&packet, &again) {
        (RakPacket::Acknowledgment(first), RakPacket::Acknowledgment(second)) => {
            assert_eq!(first.kind, second.kind);
            assert_eq!(condense(&first.records), condense(&second.records));
        }
        // A foreign magic is replaced by the configured one on encode.
        _ if !magic_valid(&packet) => assert_eq!(packet.id(), again.id()),
        _ => assert_eq!(packet, again),
    }
});

fn magic_valid(packet: &RakPacket) -> bool {
    match packet {
        RakPacket::UnconnectedPing(ping) => ping.magic_valid,
        RakPacket::UnconnectedPingOpenConnections(ping) => ping.0.magic_valid,
        RakPacket::UnconnectedPong(pong) => pong.magic_valid,
        _ => true,
    }
}
