use super::adaptation::AdaptationField;
use super::continuity::{ContinuityCheckResult, ContinuityTracker};
use super::header::TSHeader;
use super::types::*;
use crate::config;
use crate::error::{Result, TsError};
use bytes::{Bytes, BytesMut};
use log::{debug, warn};

/// One decoded 188-byte transport packet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TSPacket {
    pub header: TSHeader,
    pub adaptation_field: AdaptationField,
    pub payload: Bytes,
}

impl TSPacket {
    /// Decodes exactly one packet.
    ///
    /// The adaptation field is read at offset 4 regardless of the header's
    /// adaptation mode. Continuity counters are not validated here.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() != TS_PACKET_SIZE {
            return Err(TsError::WrongSize { actual: data.len() });
        }

        let mut header_bytes = [0u8; TS_HEADER_SIZE];
        header_bytes.copy_from_slice(&data[..TS_HEADER_SIZE]);
        let header = TSHeader::decode(&header_bytes)?;

        let field_length = data[TS_HEADER_SIZE];
        if field_length as usize > MAX_ADAPTATION_FIELD_LENGTH {
            return Err(TsError::InconsistentAdaptationLength { field_length });
        }
        let (adaptation_field, consumed) = AdaptationField::decode(data, TS_HEADER_SIZE)?;

        let payload = Bytes::copy_from_slice(&data[TS_HEADER_SIZE + consumed..]);

        Ok(TSPacket {
            header,
            adaptation_field,
            payload,
        })
    }

    /// Re-encodes the packet, writing stuffing bytes for the adaptation field
    pub fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(TS_PACKET_SIZE);
        self.header.write_to(&mut buf);
        self.adaptation_field.write_to(&mut buf);
        buf.extend_from_slice(&self.payload);
        buf.freeze()
    }
}

/// Lazily parses consecutive 188-byte packets out of a contiguous buffer.
///
/// A trailing partial packet is not yielded.
pub struct TSPacketIter<'a> {
    chunks: std::slice::ChunksExact<'a, u8>,
}

impl<'a> TSPacketIter<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            chunks: data.chunks_exact(TS_PACKET_SIZE),
        }
    }
}

impl Iterator for TSPacketIter<'_> {
    type Item = Result<TSPacket>;

    fn next(&mut self) -> Option<Self::Item> {
        self.chunks.next().map(TSPacket::parse)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chunks.size_hint()
    }
}

/// Parses chunked transport stream data, optionally tracking continuity per PID.
pub struct TSPacketParser {
    continuity: Option<ContinuityTracker>,
}

impl Default for TSPacketParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TSPacketParser {
    /// Parser honouring the configured `continuity_check` setting
    pub fn new() -> Self {
        Self::with_continuity_check(config::current().continuity_check)
    }

    pub fn with_continuity_check(enabled: bool) -> Self {
        Self {
            continuity: enabled.then(ContinuityTracker::new),
        }
    }

    /// Parses every whole packet in `data`.
    ///
    /// Packets that fail to decode are skipped. With continuity checking on,
    /// duplicate packets are dropped and gaps are logged.
    pub fn parse_chunked(&mut self, data: &[u8]) -> Vec<TSPacket> {
        if data.len() % TS_PACKET_SIZE != 0 {
            debug!(
                "ignoring {} trailing bytes",
                data.len() % TS_PACKET_SIZE
            );
        }

        let mut packets = Vec::with_capacity(data.len() / TS_PACKET_SIZE);
        for (index, result) in TSPacketIter::new(data).enumerate() {
            let packet = match result {
                Ok(packet) => packet,
                Err(e) => {
                    debug!("skipping packet {}: {}", index, e);
                    continue;
                }
            };

            if let Some(tracker) = self.continuity.as_mut() {
                match tracker.check(&packet.header) {
                    ContinuityCheckResult::Ok => {}
                    ContinuityCheckResult::Duplicate => {
                        debug!("dropping duplicate packet on pid {}", packet.header.pid);
                        continue;
                    }
                    ContinuityCheckResult::Gap { expected, found } => {
                        warn!(
                            "continuity gap on pid {}: expected {}, found {}",
                            packet.header.pid,
                            expected.value(),
                            found.value()
                        );
                    }
                }
            }

            packets.push(packet);
        }
        packets
    }
}
