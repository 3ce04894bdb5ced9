//! Telemetry (TM) frames. Receive only.
use crate::checked::{self, CheckedFrame};
use crate::{Decode, Frame, IcdFrame, IcdHeader, Result, SptpHeader};

/// A CRC protected telemetry frame borrowed from the receive buffer.
///
/// Decoding never fails on a CRC mismatch; compare [TmFrame::crc] and
/// [TmFrame::needed_crc] (or use [TmFrame::crc_ok]) to decide what to do with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TmFrame<'a>(CheckedFrame<'a>);

impl<'a> TmFrame<'a> {
    pub const SUB_HEADER_LEN: usize = checked::SUB_HEADER_LEN;
    pub const CRC_LEN: usize = checked::CRC_LEN;
    pub const MIN_LEN: usize = checked::MIN_LEN;

    #[must_use]
    pub fn sptp(&self) -> &SptpHeader {
        self.0.icd().sptp()
    }

    #[must_use]
    pub fn header(&self) -> &IcdHeader {
        self.0.icd().header()
    }

    /// The ICD layer this frame is built on.
    #[must_use]
    pub fn icd(&self) -> &IcdFrame<'a> {
        self.0.icd()
    }

    /// CRC as read from the frame trailer.
    #[must_use]
    pub fn crc(&self) -> u16 {
        self.0.crc()
    }

    /// CRC computed over the ICD header and body.
    #[must_use]
    pub fn needed_crc(&self) -> u16 {
        self.0.needed_crc()
    }

    #[must_use]
    pub fn crc_ok(&self) -> bool {
        self.crc() == self.needed_crc()
    }

    /// Sub-header and payload, i.e., everything between the ICD header and the CRC.
    #[must_use]
    pub fn body(&self) -> &'a [u8] {
        self.0.body()
    }

    #[must_use]
    pub fn sub_header(&self) -> &'a [u8] {
        self.0.sub_header()
    }

    #[must_use]
    pub fn payload(&self) -> &'a [u8] {
        self.0.payload()
    }

    /// True if the ICD size equals the body length.
    #[must_use]
    pub fn size_matches(&self) -> bool {
        self.0.size_matches()
    }
}

impl<'a> Decode<'a> for TmFrame<'a> {
    fn decode(dat: &'a [u8]) -> Result<Self> {
        Ok(TmFrame(CheckedFrame::decode(dat)?))
    }
}

impl<'a> Frame<'a> for TmFrame<'a> {
    fn as_bytes(&self) -> &'a [u8] {
        self.0.icd().as_bytes()
    }
}
