//! ICD application frames carried in the payload of a SPTP frame.
//!
//! The 6 byte ICD header is packed across byte boundaries:
//!
//! | bits | field |
//! |---|---|
//! | 3 | version |
//! | 1 | type |
//! | 1 | flag |
//! | 11 | apid |
//! | 2 | segment |
//! | 14 | counter |
//! | 16 | size |
use crate::bits::{be_uint, extract, insert, put_be_uint};
use crate::error::too_short;
use crate::{Decode, Frame, Result, SptpHeader};

pub type Apid = u16;

/// Packet is a part of a segmented group, but not first and not last
pub const SEG_CONTINUATION: u8 = 0;
/// Packet is the first of a segmented group
pub const SEG_FIRST: u8 = 1;
/// Packet is the last of a segmented group
pub const SEG_LAST: u8 = 2;
/// Packet is not segmented, i.e., standalone.
pub const SEG_UNSEGMENTED: u8 = 3;

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum IcdType {
    Telemetry,
    Telecommand,
}

impl IcdType {
    #[must_use]
    pub fn from_bit(bit: bool) -> Self {
        if bit {
            IcdType::Telecommand
        } else {
            IcdType::Telemetry
        }
    }

    #[must_use]
    pub fn bit(self) -> bool {
        self == IcdType::Telecommand
    }
}

/// Header flag, set when the body starts with a kind specific sub-header.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum IcdFlag {
    NoHeader,
    HeaderFill,
}

impl IcdFlag {
    #[must_use]
    pub fn from_bit(bit: bool) -> Self {
        if bit {
            IcdFlag::HeaderFill
        } else {
            IcdFlag::NoHeader
        }
    }

    #[must_use]
    pub fn bit(self) -> bool {
        self == IcdFlag::HeaderFill
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct IcdHeader {
    pub version: u8,
    pub type_flag: IcdType,
    pub flag: IcdFlag,
    pub apid: Apid,
    /// Segmentation of this packet. See the `SEG_*` values.
    pub segment: u8,
    pub counter: u16,
    /// Declared body size in bytes.
    pub size: u16,
}

impl IcdHeader {
    /// Size of a ``IcdHeader``
    pub const LEN: usize = 6;
    pub const VERSION_MAX: u8 = 0x7;
    pub const APID_MAX: Apid = 0x7ff;
    pub const COUNTER_MAX: u16 = 0x3fff;

    /// Decode from bytes. Returns `None` if there are not enough bytes to construct the
    /// header.
    #[must_use]
    pub fn decode(dat: &[u8]) -> Option<Self> {
        if dat.len() < Self::LEN {
            return None;
        }
        let d1 = be_uint(&dat[0..2]);
        let d2 = be_uint(&dat[2..4]);
        let d3 = be_uint(&dat[4..6]);

        Some(IcdHeader {
            version: extract(d1, 13, 3) as u8,
            type_flag: IcdType::from_bit(extract(d1, 12, 1) == 1),
            flag: IcdFlag::from_bit(extract(d1, 11, 1) == 1),
            apid: extract(d1, 0, 11) as Apid,
            segment: extract(d2, 14, 2) as u8,
            counter: extract(d2, 0, 14) as u16,
            size: d3 as u16,
        })
    }

    /// Pack into wire bytes. Fields wider than their bit width are masked.
    #[must_use]
    pub fn encode(&self) -> [u8; Self::LEN] {
        let mut d1 = insert(0, u32::from(self.version), 13, 3);
        d1 = insert(d1, u32::from(self.type_flag.bit()), 12, 1);
        d1 = insert(d1, u32::from(self.flag.bit()), 11, 1);
        d1 = insert(d1, u32::from(self.apid), 0, 11);
        let d2 = insert(insert(0, u32::from(self.segment), 14, 2), u32::from(self.counter), 0, 14);

        let mut buf = [0u8; Self::LEN];
        put_be_uint(d1, &mut buf[0..2]);
        put_be_uint(d2, &mut buf[2..4]);
        put_be_uint(u32::from(self.size), &mut buf[4..6]);
        buf
    }
}

/// An ICD frame: SPTP header, ICD header, then the body.
///
/// The ICD layer works on the same buffer as the SPTP layer below it, offset by the
/// SPTP header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IcdFrame<'a> {
    sptp: SptpHeader,
    header: IcdHeader,
    data: &'a [u8],
}

impl<'a> IcdFrame<'a> {
    /// Offset of the body within the frame
    pub const HEADERS_LEN: usize = SptpHeader::LEN + IcdHeader::LEN;
    pub const MIN_LEN: usize = Self::HEADERS_LEN;

    pub(crate) fn from_parts(sptp: SptpHeader, header: IcdHeader, data: &'a [u8]) -> Self {
        IcdFrame { sptp, header, data }
    }

    #[must_use]
    pub fn sptp(&self) -> &SptpHeader {
        &self.sptp
    }

    #[must_use]
    pub fn header(&self) -> &IcdHeader {
        &self.header
    }

    /// The ICD frame's own bytes, i.e., the SPTP payload.
    #[must_use]
    pub fn icd_bytes(&self) -> &'a [u8] {
        &self.data[SptpHeader::LEN..]
    }

    /// Everything after the ICD header.
    #[must_use]
    pub fn payload(&self) -> &'a [u8] {
        &self.data[Self::HEADERS_LEN..]
    }

    /// True if the declared size equals the actual payload length.
    #[must_use]
    pub fn size_matches(&self) -> bool {
        usize::from(self.header.size) == self.payload().len()
    }
}

impl<'a> Decode<'a> for IcdFrame<'a> {
    fn decode(dat: &'a [u8]) -> Result<Self> {
        let sptp = SptpHeader::decode(dat).ok_or_else(|| too_short(dat, SptpHeader::LEN))?;
        let header = IcdHeader::decode(&dat[SptpHeader::LEN..])
            .ok_or_else(|| too_short(dat, Self::MIN_LEN))?;
        Ok(IcdFrame {
            sptp,
            header,
            data: dat,
        })
    }
}

impl<'a> Frame<'a> for IcdFrame<'a> {
    fn as_bytes(&self) -> &'a [u8] {
        self.data
    }
}
