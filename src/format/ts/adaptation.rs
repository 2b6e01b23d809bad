use super::types::*;
use crate::error::{Result, TsError};
use bytes::{BufMut, Bytes, BytesMut};

/// Padding-only adaptation field: `[length][flags = 0][0xff; length - 1]`.
///
/// PCR, splicing, private data and the other optional sections are not
/// modelled. `field_length` is always at least 1 because the flags byte is
/// mandatory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdaptationField {
    field_length: u8,
}

impl AdaptationField {
    /// Largest stuffing count whose length still fits the length byte
    pub const MAX_STUFFING: usize = u8::MAX as usize - 1;

    /// Creates a field carrying `stuffed_byte_count` stuffing bytes.
    ///
    /// # Panics
    ///
    /// Panics if `stuffed_byte_count` exceeds [`Self::MAX_STUFFING`].
    pub fn with_stuffing(stuffed_byte_count: usize) -> Self {
        assert!(
            stuffed_byte_count <= Self::MAX_STUFFING,
            "stuffing count {} does not fit the adaptation field length byte",
            stuffed_byte_count
        );
        Self {
            field_length: (stuffed_byte_count + 1) as u8,
        }
    }

    /// Bytes following the length byte: flags byte plus stuffing
    pub fn field_length(&self) -> u8 {
        self.field_length
    }

    pub fn stuffed_byte_count(&self) -> usize {
        self.field_length as usize - 1
    }

    /// Total bytes on the wire, length byte included
    pub fn encoded_len(&self) -> usize {
        1 + self.field_length as usize
    }

    pub fn write_to(&self, buf: &mut BytesMut) {
        buf.put_u8(self.field_length);
        buf.put_u8(0x00);
        buf.put_bytes(STUFFING_BYTE, self.stuffed_byte_count());
    }

    /// Writes the field at the start of `out` and returns the bytes written.
    ///
    /// # Panics
    ///
    /// Panics if `out` is shorter than [`encoded_len`](Self::encoded_len).
    pub fn encode_into(&self, out: &mut [u8]) -> usize {
        let len = self.encoded_len();
        out[0] = self.field_length;
        out[1] = 0x00;
        out[ADAPTATION_HEADER_SIZE..len].fill(STUFFING_BYTE);
        len
    }

    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.encoded_len());
        self.write_to(&mut buf);
        buf.freeze()
    }

    /// Reads a field whose length byte sits at `offset`.
    ///
    /// Returns the field and the number of bytes consumed. The stuffing
    /// content is not checked. A zero length byte is rejected because the
    /// flags byte is mandatory here.
    pub fn decode(data: &[u8], offset: usize) -> Result<(Self, usize)> {
        let available = data.len().saturating_sub(offset);
        if available == 0 {
            return Err(TsError::TruncatedAdaptationField {
                declared: 1,
                available,
            });
        }

        let field_length = data[offset];
        let consumed = 1 + field_length as usize;
        if available < consumed {
            return Err(TsError::TruncatedAdaptationField {
                declared: consumed,
                available,
            });
        }

        if field_length == 0 {
            return Err(TsError::InconsistentAdaptationLength { field_length });
        }

        Ok((Self { field_length }, consumed))
    }
}
