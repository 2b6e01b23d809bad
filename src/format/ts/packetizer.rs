use super::adaptation::AdaptationField;
use super::header::TSHeader;
use super::track::Track;
use super::types::*;
use crate::format::PacketSink;
use bytes::Bytes;
use log::{debug, trace};

/// Splits elementary stream payloads into 188-byte transport packets.
///
/// Every packet carries an adaptation field; only the final packet of a call
/// can carry stuffing, and only as much as needed to reach 188 bytes.
pub struct Packetizer;

impl Packetizer {
    /// Number of packets `packetize` emits for `payload_len` bytes
    pub fn packet_count(payload_len: usize) -> usize {
        payload_len.div_ceil(MAX_PAYLOAD_SIZE)
    }

    /// Packetizes `payload` for `track`, handing each packet to `on_packet`.
    ///
    /// Empty payloads emit nothing. The track's continuity counter advances
    /// once per emitted packet. `force_pusi` forces the payload unit start
    /// indicator on the first packet of this call only; that packet is
    /// always flagged, so it never changes the output.
    pub fn packetize<F>(payload: &[u8], track: &mut Track, force_pusi: bool, mut on_packet: F)
    where
        F: FnMut(&[u8; TS_PACKET_SIZE]),
    {
        if payload.is_empty() {
            return;
        }

        debug!(
            "packetizing {} bytes on pid {} into {} packets (force_pusi {})",
            payload.len(),
            track.pid(),
            Self::packet_count(payload.len()),
            force_pusi
        );

        let mut packet = [0u8; TS_PACKET_SIZE];

        for (index, chunk) in payload.chunks(MAX_PAYLOAD_SIZE).enumerate() {
            let header = TSHeader {
                transport_error: false,
                payload_unit_start: index == 0,
                transport_priority: false,
                pid: track.pid(),
                is_scrambled: false,
                adaptation_mode: AdaptationMode::AdaptationAndPayload,
                continuity_counter: track.next_continuity_counter(),
            };
            let adaptation = AdaptationField::with_stuffing(MAX_PAYLOAD_SIZE - chunk.len());

            packet[..TS_HEADER_SIZE].copy_from_slice(&header.encode());
            let payload_start =
                TS_HEADER_SIZE + adaptation.encode_into(&mut packet[TS_HEADER_SIZE..]);
            packet[payload_start..].copy_from_slice(chunk);

            trace!(
                "pid {} cc {} pusi {} payload {} stuffing {}",
                header.pid,
                header.continuity_counter.value(),
                header.payload_unit_start,
                chunk.len(),
                adaptation.stuffed_byte_count()
            );

            on_packet(&packet);
        }
    }

    /// Same as [`packetize`](Self::packetize), writing into a [`PacketSink`]
    pub fn packetize_into<S>(payload: &[u8], track: &mut Track, force_pusi: bool, sink: &mut S)
    where
        S: PacketSink + ?Sized,
    {
        Self::packetize(payload, track, force_pusi, |packet| sink.write_packet(packet));
    }

    /// Same as [`packetize`](Self::packetize), collecting the packets
    pub fn packetize_to_vec(payload: &[u8], track: &mut Track, force_pusi: bool) -> Vec<Bytes> {
        let mut packets = Vec::with_capacity(Self::packet_count(payload.len()));
        Self::packetize_into(payload, track, force_pusi, &mut packets);
        packets
    }
}
