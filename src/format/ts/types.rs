use crate::error::{Result, TsError};
use std::fmt;

// Sizes
pub const TS_PACKET_SIZE: usize = 188;
pub const TS_HEADER_SIZE: usize = 4;
/// Length byte plus the mandatory flags byte
pub const ADAPTATION_HEADER_SIZE: usize = 2;
pub const MAX_PAYLOAD_SIZE: usize = TS_PACKET_SIZE - TS_HEADER_SIZE - ADAPTATION_HEADER_SIZE;
/// Largest adaptation_field_length that still fits after the header and length byte
pub const MAX_ADAPTATION_FIELD_LENGTH: usize = TS_PACKET_SIZE - TS_HEADER_SIZE - 1;

pub const SYNC_BYTE: u8 = 0x47;
pub const STUFFING_BYTE: u8 = 0xff;

// PIDs
pub const PID_PAT: u16 = 0x0000;
pub const PID_CAT: u16 = 0x0001;
pub const PID_TSDT: u16 = 0x0002;
pub const PID_IPMP: u16 = 0x0003;
pub const PID_ASI: u16 = 0x0004;
pub const PID_OTHER_START: u16 = 0x0010;
pub const PID_OTHER_END: u16 = 0x1ffe;
pub const PID_NULL: u16 = 0x1fff;
pub const PID_MAX: u16 = 0x1fff;

// Elementary Stream Types
pub const STREAM_TYPE_MPEG2_VIDEO: u8 = 0x02;
pub const STREAM_TYPE_MPEG1_AUDIO: u8 = 0x03;
pub const STREAM_TYPE_MPEG2_AUDIO: u8 = 0x04;
pub const STREAM_TYPE_PRIVATE_DATA: u8 = 0x06;
pub const STREAM_TYPE_AAC: u8 = 0x0f;
pub const STREAM_TYPE_H264: u8 = 0x1b;
pub const STREAM_TYPE_H265: u8 = 0x24;

// Stream IDs
pub const STREAM_ID_PRIVATE_STREAM_1: u8 = 0xbd;
pub const STREAM_ID_AUDIO: u8 = 0xc0;
pub const STREAM_ID_VIDEO: u8 = 0xe0;

/// A 13-bit packet identifier.
///
/// Construction rejects anything wider than 13 bits, so a `Pid` is always
/// safe to pack into a header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pid(u16);

impl Pid {
    pub const PAT: Pid = Pid(PID_PAT);
    pub const NULL: Pid = Pid(PID_NULL);

    /// Creates a PID, failing with `InvalidPid` above 0x1fff
    pub fn new(value: u16) -> Result<Self> {
        if value > PID_MAX {
            return Err(TsError::InvalidPid(value));
        }
        Ok(Pid(value))
    }

    /// Builds a PID from the low 13 bits of a wire value
    pub(crate) fn from_wire(value: u16) -> Self {
        Pid(value & PID_MAX)
    }

    pub fn value(self) -> u16 {
        self.0
    }

    /// PIDs 0x0000-0x000f are reserved by ISO/IEC 13818-1
    pub fn is_reserved(self) -> bool {
        self.0 < PID_OTHER_START
    }

    pub fn is_null(self) -> bool {
        self.0 == PID_NULL
    }

    /// True when the PID may carry an elementary stream or PMT
    pub fn is_valid_elementary(self) -> bool {
        (PID_OTHER_START..=PID_OTHER_END).contains(&self.0)
    }
}

impl TryFrom<u16> for Pid {
    type Error = TsError;

    fn try_from(value: u16) -> Result<Self> {
        Pid::new(value)
    }
}

impl From<Pid> for u16 {
    fn from(pid: Pid) -> u16 {
        pid.0
    }
}

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06x}", self.0)
    }
}

/// 4-bit per-PID packet counter.
///
/// Every write path goes through [`ContinuityCounter::new`], which reduces
/// the value modulo 16. Setting 255 yields 15.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ContinuityCounter(u8);

impl ContinuityCounter {
    pub const MODULUS: u8 = 16;

    pub fn new(value: u8) -> Self {
        ContinuityCounter(value % Self::MODULUS)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// The counter that follows this one, wrapping 15 -> 0
    pub fn next(self) -> Self {
        ContinuityCounter::new(self.0.wrapping_add(1))
    }

    /// The counter that precedes this one, wrapping 0 -> 15
    pub fn prev(self) -> Self {
        ContinuityCounter::new(self.0.wrapping_add(Self::MODULUS - 1))
    }
}

impl From<u8> for ContinuityCounter {
    fn from(value: u8) -> Self {
        ContinuityCounter::new(value)
    }
}

impl From<ContinuityCounter> for u8 {
    fn from(cc: ContinuityCounter) -> u8 {
        cc.0
    }
}

/// The 2-bit adaptation_field_control field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdaptationMode {
    /// 0b00, reserved for future use by ISO/IEC
    Reserved,
    /// 0b01
    PayloadOnly,
    /// 0b10
    AdaptationOnly,
    /// 0b11
    AdaptationAndPayload,
}

impl AdaptationMode {
    /// Decodes the low two bits of `raw`. Total: every value maps to a variant.
    pub fn from_raw(raw: u8) -> Self {
        match raw & 0x03 {
            0x01 => AdaptationMode::PayloadOnly,
            0x02 => AdaptationMode::AdaptationOnly,
            0x03 => AdaptationMode::AdaptationAndPayload,
            _ => AdaptationMode::Reserved,
        }
    }

    pub fn raw(self) -> u8 {
        match self {
            AdaptationMode::Reserved => 0x00,
            AdaptationMode::PayloadOnly => 0x01,
            AdaptationMode::AdaptationOnly => 0x02,
            AdaptationMode::AdaptationAndPayload => 0x03,
        }
    }

    pub fn has_adaptation_field(self) -> bool {
        matches!(
            self,
            AdaptationMode::AdaptationOnly | AdaptationMode::AdaptationAndPayload
        )
    }

    pub fn has_payload(self) -> bool {
        matches!(
            self,
            AdaptationMode::PayloadOnly | AdaptationMode::AdaptationAndPayload
        )
    }
}

/// Elementary stream kind, as carried in the PMT stream_type byte.
///
/// Not encoded into packet headers; kept on the track for bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamType {
    Mpeg2Video,
    Mpeg1Audio,
    Mpeg2Audio,
    PrivateData,
    AdtsAac,
    H264,
    H265,
    Other(u8),
}

impl StreamType {
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            STREAM_TYPE_MPEG2_VIDEO => StreamType::Mpeg2Video,
            STREAM_TYPE_MPEG1_AUDIO => StreamType::Mpeg1Audio,
            STREAM_TYPE_MPEG2_AUDIO => StreamType::Mpeg2Audio,
            STREAM_TYPE_PRIVATE_DATA => StreamType::PrivateData,
            STREAM_TYPE_AAC => StreamType::AdtsAac,
            STREAM_TYPE_H264 => StreamType::H264,
            STREAM_TYPE_H265 => StreamType::H265,
            other => StreamType::Other(other),
        }
    }

    pub fn raw(self) -> u8 {
        match self {
            StreamType::Mpeg2Video => STREAM_TYPE_MPEG2_VIDEO,
            StreamType::Mpeg1Audio => STREAM_TYPE_MPEG1_AUDIO,
            StreamType::Mpeg2Audio => STREAM_TYPE_MPEG2_AUDIO,
            StreamType::PrivateData => STREAM_TYPE_PRIVATE_DATA,
            StreamType::AdtsAac => STREAM_TYPE_AAC,
            StreamType::H264 => STREAM_TYPE_H264,
            StreamType::H265 => STREAM_TYPE_H265,
            StreamType::Other(raw) => raw,
        }
    }

    pub fn is_audio(self) -> bool {
        matches!(
            self,
            StreamType::Mpeg1Audio | StreamType::Mpeg2Audio | StreamType::AdtsAac
        )
    }

    pub fn is_video(self) -> bool {
        matches!(
            self,
            StreamType::Mpeg2Video | StreamType::H264 | StreamType::H265
        )
    }

    /// PES stream_id for this stream type (H.222.0 table 2-22)
    pub fn stream_id(self) -> u8 {
        if self.is_video() {
            STREAM_ID_VIDEO
        } else if self.is_audio() {
            STREAM_ID_AUDIO
        } else {
            STREAM_ID_PRIVATE_STREAM_1
        }
    }
}

impl From<u8> for StreamType {
    fn from(raw: u8) -> Self {
        StreamType::from_raw(raw)
    }
}
