#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// No buffer was provided at all.
    #[error("No input buffer")]
    NullInput,

    #[error("Frame too short: got {actual} bytes, need at least {minimum}")]
    FrameTooShort {
        /// Number of bytes we got
        actual: usize,
        /// Minimum number of bytes for the frame kind
        minimum: usize,
    },

    #[error("Wrong frame length: got {actual} bytes, expected exactly {expected}")]
    FrameWrongLength {
        /// Number of bytes we got
        actual: usize,
        /// The fixed length of the frame kind
        expected: usize,
    },

    #[error("Payload too large: {actual} bytes, maximum is {maximum}")]
    PayloadTooLarge { actual: usize, maximum: usize },

    /// A value given to a build factory does not fit its bit field.
    #[error("Value {value} for {field} out of range, maximum is {maximum}")]
    FieldOutOfRange {
        field: &'static str,
        value: u32,
        maximum: u32,
    },

    /// Trailing CRC does not match the recomputed one. Only produced by a
    /// [Decoder](crate::Decoder) configured to verify CRCs.
    #[error("CRC mismatch: frame has {actual:#06x}, computed {expected:#06x}")]
    CrcMismatch { expected: u16, actual: u16 },

    /// Declared size field disagrees with the bytes actually present. Only produced
    /// by a [Decoder](crate::Decoder) configured to check sizes.
    #[error("Size mismatch: header declares {declared} bytes, frame has {actual}")]
    SizeMismatch { declared: usize, actual: usize },

    #[error("Bad HSI sync byte {actual:#04x}")]
    BadSync { actual: u8 },
}

pub type Result<T> = std::result::Result<T, Error>;

pub(crate) fn too_short(dat: &[u8], minimum: usize) -> Error {
    Error::FrameTooShort {
        actual: dat.len(),
        minimum,
    }
}

/// Ensure `dat` holds at least `minimum` bytes.
pub(crate) fn ensure_min(dat: &[u8], minimum: usize) -> Result<()> {
    if dat.len() < minimum {
        return Err(too_short(dat, minimum));
    }
    Ok(())
}

/// Ensure `dat` holds exactly `expected` bytes.
pub(crate) fn ensure_exact(dat: &[u8], expected: usize) -> Result<()> {
    if dat.len() != expected {
        return Err(Error::FrameWrongLength {
            actual: dat.len(),
            expected,
        });
    }
    Ok(())
}
