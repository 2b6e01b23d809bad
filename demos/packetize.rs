use bytes::BytesMut;
use tsframe::format::ts::{
    Packetizer, StreamType, TSPacketParser, TrackRegistry, MAX_PAYLOAD_SIZE, TS_PACKET_SIZE,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut registry = TrackRegistry::from_config();
    let video = registry.add_track(StreamType::H264)?;
    let audio = registry.add_track(StreamType::AdtsAac)?;

    // Packetize a few dummy access units per stream
    let mut stream = BytesMut::new();
    for i in 0..10 {
        let video_unit = vec![0u8; 1024 + i * 7];
        Packetizer::packetize_into(&video_unit, &mut video.lock(), false, &mut stream);

        let audio_unit = vec![0u8; 256];
        Packetizer::packetize_into(&audio_unit, &mut audio.lock(), false, &mut stream);
    }

    println!(
        "Wrote {} packets ({} bytes, up to {} payload bytes each)",
        stream.len() / TS_PACKET_SIZE,
        stream.len(),
        MAX_PAYLOAD_SIZE
    );

    // Read the stream back
    let packets = TSPacketParser::new().parse_chunked(&stream);
    for track in registry.tracks() {
        let track = track.lock();
        let count = packets.iter().filter(|p| p.header.pid == track.pid()).count();
        let stuffing: usize = packets
            .iter()
            .filter(|p| p.header.pid == track.pid())
            .map(|p| p.adaptation_field.stuffed_byte_count())
            .sum();
        println!(
            "pid {} ({:?}): {} packets, {} stuffing bytes, cc now {}",
            track.pid(),
            track.stream_type(),
            count,
            stuffing,
            track.continuity_counter().value()
        );
    }

    Ok(())
}
