#![doc(html_root_url = "https://docs.rs/tsframe/0.1.0")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(rustdoc::missing_crate_level_docs)]

//! # tsframe - MPEG Transport Stream packet framing
//!
//! `tsframe` packetizes arbitrary elementary stream payload bytes into
//! fixed-size 188-byte transport packets and reconstructs packet structure
//! from raw bytes.
//!
//! ## Features
//!
//! - Exact-size 4-byte packet header codec
//! - Padding-only adaptation field codec
//! - Packetizer producing the minimum stuffing, with per-track continuity counters
//! - Packet parser with typed errors for corrupt input
//! - Continuity counter validation per PID
//!
//! ## Quick Start
//!
//! ```rust
//! use tsframe::format::ts::{Packetizer, Pid, StreamType, TSPacketParser, Track};
//! use bytes::BytesMut;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut track = Track::new(Pid::new(0x100)?, StreamType::H264);
//!
//! let mut stream = BytesMut::new();
//! Packetizer::packetize_into(&[0x42; 500], &mut track, false, &mut stream);
//!
//! let packets = TSPacketParser::with_continuity_check(true).parse_chunked(&stream);
//! assert_eq!(packets.len(), 3);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - `format`: transport stream framing and the packet sink interface
//! - `error`: error type and result alias
//! - `config`: process-wide settings loaded from the environment or a file

/// Configuration module
pub mod config;

/// Error types and utilities
pub mod error;

/// Media format implementations
pub mod format;

pub use error::{Result, TsError};
