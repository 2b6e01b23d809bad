//! # MPEG Transport Stream (TS) Packet Framing
//!
//! This module turns elementary stream payloads into fixed-size 188-byte
//! transport packets and decodes such packets back into their parts:
//!
//! - 4-byte packet header encoding and decoding
//! - Padding-only adaptation field (length, flags, `0xff` stuffing)
//! - Payload packetization with per-track continuity counters
//! - Single-packet and chunked parsing
//! - Continuity counter validation per PID
//!
//! Every emitted packet carries an adaptation field, so at most 182 payload
//! bytes fit in one packet. Only the last packet of a payload is stuffed.
//!
//! ## Example Usage
//!
//! ### Packetizing a payload
//!
//! ```rust
//! use tsframe::format::ts::{Packetizer, Pid, StreamType, Track, TS_PACKET_SIZE};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut track = Track::new(Pid::new(256)?, StreamType::H264);
//!
//! let packets = Packetizer::packetize_to_vec(&[0u8; 1000], &mut track, false);
//! assert_eq!(packets.len(), 6);
//! assert!(packets.iter().all(|p| p.len() == TS_PACKET_SIZE));
//! assert_eq!(track.continuity_counter().value(), 5);
//! # Ok(())
//! # }
//! ```
//!
//! ### Parsing packets back
//!
//! ```rust
//! use tsframe::format::ts::{Packetizer, Pid, StreamType, TSPacket, Track};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut track = Track::new(Pid::new(257)?, StreamType::AdtsAac);
//! let packets = Packetizer::packetize_to_vec(b"hello", &mut track, false);
//!
//! let packet = TSPacket::parse(&packets[0])?;
//! assert!(packet.header.payload_unit_start);
//! assert_eq!(&packet.payload[..], b"hello");
//! assert_eq!(packet.adaptation_field.stuffed_byte_count(), 177);
//! # Ok(())
//! # }
//! ```

/// Padding-only adaptation field codec
pub mod adaptation;

/// Continuity counter validation
pub mod continuity;

/// 4-byte packet header codec
pub mod header;

/// Payload to packet splitting
pub mod packetizer;

/// Packet decoding, single and chunked
pub mod parser;

/// Elementary stream tracks and PID assignment
pub mod track;

/// Core TS types and constants
pub mod types;


// Re-export commonly used types and constants
pub use adaptation::AdaptationField;
pub use continuity::{ContinuityCheckResult, ContinuityChecker, ContinuityTracker};
pub use header::TSHeader;
pub use packetizer::Packetizer;
pub use parser::{TSPacket, TSPacketIter, TSPacketParser};
pub use track::{SharedTrack, Track, TrackRegistry};
pub use types::{
    AdaptationMode,
    ContinuityCounter,
    Pid,
    StreamType,
    MAX_PAYLOAD_SIZE,
    PID_NULL,
    PID_PAT,
    STREAM_TYPE_AAC,
    STREAM_TYPE_H264,
    STREAM_TYPE_H265,
    STUFFING_BYTE,
    SYNC_BYTE,
    TS_HEADER_SIZE,
    TS_PACKET_SIZE,
};
