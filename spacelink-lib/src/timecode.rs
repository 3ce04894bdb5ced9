//! SpaceWire time-code frames: a single byte, no SPTP or ICD wrapping.
use crate::error::ensure_exact;
use crate::{Decode, Frame, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeCodeFrame<'a> {
    data: &'a [u8],
}

impl<'a> TimeCodeFrame<'a> {
    pub const LEN: usize = 1;

    /// The whole time-code byte.
    #[must_use]
    pub fn value(&self) -> u8 {
        self.data[0]
    }

    /// Low 6 bits, the time counter.
    #[must_use]
    pub fn time(&self) -> u8 {
        self.value() & 0x3f
    }

    /// Top 2 bits, the control flags.
    #[must_use]
    pub fn control(&self) -> u8 {
        self.value() >> 6
    }
}

impl<'a> Decode<'a> for TimeCodeFrame<'a> {
    fn decode(dat: &'a [u8]) -> Result<Self> {
        ensure_exact(dat, Self::LEN)?;
        Ok(TimeCodeFrame { data: dat })
    }
}

impl<'a> Frame<'a> for TimeCodeFrame<'a> {
    fn as_bytes(&self) -> &'a [u8] {
        self.data
    }
}
