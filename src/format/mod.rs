use bytes::{BufMut, Bytes, BytesMut};

pub mod ts;

use self::ts::TS_PACKET_SIZE;

/// Receives fully formed transport packets, one at a time, in emission order
pub trait PacketSink {
    /// Accept the next packet
    fn write_packet(&mut self, packet: &[u8; TS_PACKET_SIZE]);
}

/// Collects each packet as its own buffer
impl PacketSink for Vec<Bytes> {
    fn write_packet(&mut self, packet: &[u8; TS_PACKET_SIZE]) {
        self.push(Bytes::copy_from_slice(packet));
    }
}

/// Appends packets to one contiguous transport stream
impl PacketSink for BytesMut {
    fn write_packet(&mut self, packet: &[u8; TS_PACKET_SIZE]) {
        self.put_slice(packet);
    }
}

pub use self::ts::{Packetizer, TSPacket, TSPacketParser};
