use super::types::*;
use crate::error::{Result, TsError};
use bytes::{BufMut, BytesMut};

/// The fixed 4-byte transport packet header.
///
/// The sync byte is not a field: it is always written as 0x47 and checked on
/// decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TSHeader {
    pub transport_error: bool,
    pub payload_unit_start: bool,
    pub transport_priority: bool,
    pub pid: Pid,
    /// Encoded as scrambling control 0b01; 0b10 and 0b11 are never produced
    pub is_scrambled: bool,
    pub adaptation_mode: AdaptationMode,
    pub continuity_counter: ContinuityCounter,
}

impl Default for TSHeader {
    fn default() -> Self {
        Self {
            transport_error: false,
            payload_unit_start: false,
            transport_priority: false,
            pid: Pid::NULL,
            is_scrambled: false,
            adaptation_mode: AdaptationMode::PayloadOnly,
            continuity_counter: ContinuityCounter::default(),
        }
    }
}

impl TSHeader {
    /// Packs the header into its wire representation. Never fails.
    pub fn encode(&self) -> [u8; TS_HEADER_SIZE] {
        let pid = self.pid.value();

        let mut b1 = ((pid >> 8) & 0x1f) as u8;
        if self.transport_error {
            b1 |= 0x80;
        }
        if self.payload_unit_start {
            b1 |= 0x40;
        }
        if self.transport_priority {
            b1 |= 0x20;
        }

        let mut b3 = self.adaptation_mode.raw() << 4;
        if self.is_scrambled {
            b3 |= 0x40;
        }
        b3 |= self.continuity_counter.value() & 0x0f;

        [SYNC_BYTE, b1, (pid & 0xff) as u8, b3]
    }

    pub fn write_to(&self, buf: &mut BytesMut) {
        buf.put_slice(&self.encode());
    }

    /// Unpacks a header, failing with `MalformedHeader` if the sync byte is wrong.
    ///
    /// Any non-zero scrambling control reads back as scrambled; the adaptation
    /// mode decode is total.
    pub fn decode(data: &[u8; TS_HEADER_SIZE]) -> Result<Self> {
        if data[0] != SYNC_BYTE {
            return Err(TsError::MalformedHeader { found: data[0] });
        }

        Ok(TSHeader {
            transport_error: (data[1] & 0x80) != 0,
            payload_unit_start: (data[1] & 0x40) != 0,
            transport_priority: (data[1] & 0x20) != 0,
            pid: Pid::from_wire((((data[1] & 0x1f) as u16) << 8) | data[2] as u16),
            is_scrambled: (data[3] >> 6) & 0x03 != 0,
            adaptation_mode: AdaptationMode::from_raw((data[3] >> 4) & 0x03),
            continuity_counter: ContinuityCounter::new(data[3] & 0x0f),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use quickcheck::{Arbitrary, Gen};
    use quickcheck_macros::quickcheck;

    impl Arbitrary for TSHeader {
        fn arbitrary(g: &mut Gen) -> Self {
            TSHeader {
                transport_error: bool::arbitrary(g),
                payload_unit_start: bool::arbitrary(g),
                transport_priority: bool::arbitrary(g),
                pid: Pid::from_wire(u16::arbitrary(g)),
                is_scrambled: bool::arbitrary(g),
                adaptation_mode: AdaptationMode::from_raw(u8::arbitrary(g)),
                continuity_counter: ContinuityCounter::new(u8::arbitrary(g)),
            }
        }
    }

    #[test]
    fn test_encode_bit_layout() {
        let header = TSHeader {
            transport_error: true,
            payload_unit_start: false,
            transport_priority: true,
            pid: Pid::new(777).unwrap(),
            is_scrambled: true,
            adaptation_mode: AdaptationMode::AdaptationAndPayload,
            continuity_counter: ContinuityCounter::new(7),
        };

        let data = header.encode();
        assert_eq!(data[0], 0x47);
        assert_eq!(data[1], 0x80 | 0x20 | 0x03); // 777 = 0x0309
        assert_eq!(data[2], 0x09);
        assert_eq!(data[3], 0b01_11_0111);
    }

    #[test]
    fn test_scrambling_only_produces_01() {
        for scrambled in [true, false] {
            let header = TSHeader {
                is_scrambled: scrambled,
                ..Default::default()
            };
            let bits = header.encode()[3] >> 6;
            assert_eq!(bits, scrambled as u8);
        }
    }

    #[test]
    fn test_round_trip_all_modes() {
        for mode in [
            AdaptationMode::AdaptationAndPayload,
            AdaptationMode::PayloadOnly,
            AdaptationMode::AdaptationOnly,
            AdaptationMode::Reserved,
        ] {
            for flag in [true, false] {
                let header = TSHeader {
                    transport_error: flag,
                    payload_unit_start: flag,
                    transport_priority: flag,
                    pid: Pid::new(7777).unwrap(),
                    is_scrambled: flag,
                    adaptation_mode: mode,
                    continuity_counter: ContinuityCounter::new(7),
                };
                assert_eq!(TSHeader::decode(&header.encode()).unwrap(), header);
            }
        }
    }

    #[test]
    fn test_decode_rejects_bad_sync() {
        let err = TSHeader::decode(&[0x48, 0x00, 0x00, 0x10]).unwrap_err();
        assert!(matches!(err, TsError::MalformedHeader { found: 0x48 }));
    }

    #[test]
    fn test_decode_reserved_mode() {
        let header = TSHeader::decode(&[0x47, 0x1f, 0xff, 0x05]).unwrap();
        assert_eq!(header.adaptation_mode, AdaptationMode::Reserved);
        assert_eq!(header.pid, Pid::NULL);
        assert_eq!(header.continuity_counter.value(), 5);
    }

    #[test]
    fn test_write_to_appends() {
        let mut buf = BytesMut::new();
        TSHeader::default().write_to(&mut buf);
        assert_eq!(buf.len(), TS_HEADER_SIZE);
        assert_eq!(buf[0], SYNC_BYTE);
    }

    #[quickcheck]
    fn prop_header_round_trip(header: TSHeader) -> bool {
        TSHeader::decode(&header.encode()).map(|h| h == header).unwrap_or(false)
    }
}
