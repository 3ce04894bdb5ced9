use crate::{Error, Result};

/// A borrowed view over exactly one wire frame.
///
/// Frames never rebuild their bytes from fields; [Frame::as_bytes] always returns the
/// buffer the frame was decoded from, so `decode(b).as_bytes() == b`.
pub trait Frame<'a> {
    /// All frame bytes, headers and trailers included.
    fn as_bytes(&self) -> &'a [u8];

    fn len(&self) -> usize {
        self.as_bytes().len()
    }

    fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }

    fn to_vec(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }
}

/// Construct a frame view from a single pre-delimited buffer.
pub trait Decode<'a>: Sized {
    /// Decode `dat`.
    ///
    /// # Errors
    /// [Error::FrameTooShort] or [Error::FrameWrongLength] depending on the length
    /// policy of the frame kind.
    fn decode(dat: &'a [u8]) -> Result<Self>;

    /// Decode a buffer that may be absent.
    ///
    /// # Errors
    /// [Error::NullInput] if `dat` is `None`, otherwise the same as [Decode::decode].
    fn decode_opt(dat: Option<&'a [u8]>) -> Result<Self> {
        Self::decode(dat.ok_or(Error::NullInput)?)
    }
}
