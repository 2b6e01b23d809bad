use bytes::{Bytes, BytesMut};
use pretty_assertions::assert_eq;
use std::thread;
use tsframe::format::ts::{
    ContinuityCheckResult, ContinuityTracker, Packetizer, Pid, StreamType, TSPacket,
    TSPacketParser, Track, TrackRegistry, TS_PACKET_SIZE,
};
use tsframe::format::PacketSink;
use tsframe::TsError;

/// Sink that counts packets and remembers the last one
#[derive(Default)]
struct CountingSink {
    count: usize,
    last: Option<Bytes>,
}

impl PacketSink for CountingSink {
    fn write_packet(&mut self, packet: &[u8; TS_PACKET_SIZE]) {
        self.count += 1;
        self.last = Some(Bytes::copy_from_slice(packet));
    }
}

#[test]
fn test_round_trip_through_contiguous_stream() {
    let mut registry = TrackRegistry::new(Pid::new(0x100).unwrap());
    let video = registry.add_track(StreamType::H264).unwrap();
    let audio = registry.add_track(StreamType::AdtsAac).unwrap();

    let video_payload: Vec<u8> = (0..2000).map(|i| i as u8).collect();
    let audio_payload = vec![0xa5u8; 300];

    let mut stream = BytesMut::new();
    Packetizer::packetize_into(&video_payload, &mut video.lock(), false, &mut stream);
    Packetizer::packetize_into(&audio_payload, &mut audio.lock(), false, &mut stream);
    assert_eq!(stream.len() % TS_PACKET_SIZE, 0);

    let packets = TSPacketParser::with_continuity_check(true).parse_chunked(&stream);
    assert_eq!(packets.len(), 11 + 2);

    let mut video_out = Vec::new();
    let mut audio_out = Vec::new();
    for packet in &packets {
        match packet.header.pid.value() {
            0x100 => video_out.extend_from_slice(&packet.payload),
            0x101 => audio_out.extend_from_slice(&packet.payload),
            other => panic!("unexpected pid {:#x}", other),
        }
    }
    assert_eq!(video_out, video_payload);
    assert_eq!(audio_out, audio_payload);
}

#[test]
fn test_custom_sink() {
    let mut track = Track::new(Pid::new(0x200).unwrap(), StreamType::H265);
    let mut sink = CountingSink::default();
    Packetizer::packetize_into(&[0u8; 365], &mut track, false, &mut sink);

    assert_eq!(sink.count, 3);
    let last = TSPacket::parse(&sink.last.unwrap()).unwrap();
    assert_eq!(last.payload.len(), 1);
    assert_eq!(last.adaptation_field.field_length(), 182);
}

#[test]
fn test_continuity_across_calls() {
    let mut track = Track::new(Pid::new(0x300).unwrap(), StreamType::H264);
    track.set_continuity_counter(200);
    assert_eq!(track.continuity_counter().value(), 8);

    let mut tracker = ContinuityTracker::new();
    for _ in 0..10 {
        for data in Packetizer::packetize_to_vec(&[1u8; 400], &mut track, false) {
            let packet = TSPacket::parse(&data).unwrap();
            assert_eq!(tracker.check(&packet.header), ContinuityCheckResult::Ok);
        }
    }
    assert_eq!(track.continuity_counter().value(), (8 + 30) % 16);
}

#[test]
fn test_parallel_tracks_are_independent() {
    let mut registry = TrackRegistry::new(Pid::new(0x100).unwrap());
    let tracks: Vec<_> = (0..4)
        .map(|_| registry.add_track(StreamType::H264).unwrap())
        .collect();

    let handles: Vec<_> = tracks
        .iter()
        .cloned()
        .map(|track| {
            thread::spawn(move || {
                let mut track = track.lock();
                Packetizer::packetize_to_vec(&[0u8; 182 * 5], &mut track, false).len()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 5);
    }
    for track in &tracks {
        assert_eq!(track.lock().continuity_counter().value(), 4);
    }
}

#[test]
fn test_parse_errors_surface() {
    let mut track = Track::new(Pid::new(0x100).unwrap(), StreamType::H264);
    let packets = Packetizer::packetize_to_vec(&[0u8; 10], &mut track, false);

    let mut data = packets[0].to_vec();
    assert!(matches!(
        TSPacket::parse(&data[..100]),
        Err(TsError::WrongSize { actual: 100 })
    ));

    data[0] = 0xb8;
    let err = TSPacket::parse(&data).unwrap_err();
    assert!(matches!(err, TsError::MalformedHeader { found: 0xb8 }));
    assert!(err.to_string().contains("0xb8"));
}
