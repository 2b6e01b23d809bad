use thiserror::Error;

/// Errors raised while decoding transport stream packets or building tracks.
#[derive(Error, Debug)]
pub enum TsError {
    /// The first header byte is not the 0x47 sync byte
    #[error("malformed header: expected sync byte 0x47, found {found:#04x}")]
    MalformedHeader {
        /// The byte found where the sync byte was expected
        found: u8,
    },

    /// The declared adaptation field length runs past the end of the buffer
    #[error("truncated adaptation field: declared {declared} bytes, {available} available")]
    TruncatedAdaptationField {
        /// Bytes required by the length byte (length byte included)
        declared: usize,
        /// Bytes left in the buffer from the field offset
        available: usize,
    },

    /// The adaptation field leaves no room (or negative room) for the mandatory layout
    #[error("inconsistent adaptation field length: {field_length}")]
    InconsistentAdaptationLength {
        /// The adaptation_field_length read from the wire
        field_length: u8,
    },

    /// The input is not exactly one packet long
    #[error("wrong packet size: expected 188 bytes, got {actual}")]
    WrongSize {
        /// Length of the rejected buffer
        actual: usize,
    },

    /// PID does not fit in 13 bits or is not assignable
    #[error("invalid pid: {0:#06x}")]
    InvalidPid(u16),

    /// Configuration value could not be interpreted
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Reading a config file failed
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TsError>;
