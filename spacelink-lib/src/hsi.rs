//! HSI link frames: a 4 byte header followed by the payload.
use crate::bits::{be_uint, extract};
use crate::error::too_short;
use crate::{Decode, Frame, Result};

/// HSI frame flag. Unknown values are kept as [HsiFlag::Raw].
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum HsiFlag {
    Idle,
    Command,
    Telemetry,
    Raw(u8),
}

impl From<u8> for HsiFlag {
    fn from(value: u8) -> Self {
        match value {
            0x00 => HsiFlag::Idle,
            0x01 => HsiFlag::Command,
            0x02 => HsiFlag::Telemetry,
            x => HsiFlag::Raw(x),
        }
    }
}

impl From<HsiFlag> for u8 {
    fn from(value: HsiFlag) -> Self {
        match value {
            HsiFlag::Idle => 0x00,
            HsiFlag::Command => 0x01,
            HsiFlag::Telemetry => 0x02,
            HsiFlag::Raw(x) => x,
        }
    }
}

/// Physical line the frame arrived on.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Line {
    Main,
    Reserve,
}

impl Line {
    #[must_use]
    pub fn from_bit(bit: bool) -> Self {
        if bit {
            Line::Reserve
        } else {
            Line::Main
        }
    }

    #[must_use]
    pub fn bit(self) -> bool {
        self == Line::Reserve
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct HsiHeader {
    /// First header byte. Always [HsiHeader::SYNC] in practice but not checked here.
    pub reserved: u8,
    pub flag: HsiFlag,
    pub line: Line,
    /// Declared payload size. Informational only, it does not bound the payload.
    pub size: u16,
}

impl HsiHeader {
    /// Size of a ``HsiHeader``
    pub const LEN: usize = 4;
    /// Observed value of the reserved byte
    pub const SYNC: u8 = 0xa4;
    pub const SIZE_MAX: u16 = 0x7fff;

    /// Decode from bytes. Returns `None` if there are not enough bytes to construct the
    /// header.
    #[must_use]
    pub fn decode(dat: &[u8]) -> Option<Self> {
        if dat.len() < Self::LEN {
            return None;
        }
        let x = be_uint(&dat[2..4]);
        Some(HsiHeader {
            reserved: dat[0],
            flag: HsiFlag::from(dat[1]),
            line: Line::from_bit(extract(x, 15, 1) == 1),
            size: extract(x, 0, 15) as u16,
        })
    }
}

/// A single HSI frame borrowed from the receive buffer.
///
/// # Example
/// ```
/// use spacelink::{Decode, HsiFrame, Line};
///
/// let frame = HsiFrame::decode(&[0xa4, 0x33, 0xff, 0xf2]).unwrap();
/// assert_eq!(frame.header().line, Line::Reserve);
/// assert_eq!(frame.header().size, 0x7ff2);
/// assert!(frame.payload().is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HsiFrame<'a> {
    header: HsiHeader,
    data: &'a [u8],
}

impl<'a> HsiFrame<'a> {
    pub const MIN_LEN: usize = HsiHeader::LEN;

    #[must_use]
    pub fn header(&self) -> &HsiHeader {
        &self.header
    }

    /// Everything after the header, regardless of the declared size.
    #[must_use]
    pub fn payload(&self) -> &'a [u8] {
        &self.data[HsiHeader::LEN..]
    }

    /// True if the declared size equals the actual payload length.
    #[must_use]
    pub fn size_matches(&self) -> bool {
        usize::from(self.header.size) == self.payload().len()
    }
}

impl<'a> Decode<'a> for HsiFrame<'a> {
    fn decode(dat: &'a [u8]) -> Result<Self> {
        let header = HsiHeader::decode(dat).ok_or_else(|| too_short(dat, Self::MIN_LEN))?;
        Ok(HsiFrame { header, data: dat })
    }
}

impl<'a> Frame<'a> for HsiFrame<'a> {
    fn as_bytes(&self) -> &'a [u8] {
        self.data
    }
}
