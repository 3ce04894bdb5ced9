//! Layout shared by the CRC protected TM and TK frames.
//!
//! ```text
//! | SPTP (4) | ICD (6) | sub-header (4) | payload (n) | CRC16 (2) |
//!            |<------------- CRC coverage ------------>|
//! ```
use crate::error::ensure_min;
use crate::{crc16, Decode, IcdFrame, IcdHeader, Result, SptpHeader};

pub(crate) const SUB_HEADER_LEN: usize = 4;
pub(crate) const CRC_LEN: usize = 2;
pub(crate) const MIN_LEN: usize = IcdFrame::HEADERS_LEN + SUB_HEADER_LEN + CRC_LEN;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CheckedFrame<'a> {
    icd: IcdFrame<'a>,
    crc: u16,
    needed_crc: u16,
}

impl<'a> CheckedFrame<'a> {
    pub(crate) fn decode(dat: &'a [u8]) -> Result<Self> {
        ensure_min(dat, MIN_LEN)?;
        let icd = IcdFrame::decode(dat)?;
        let (covered, trailer) =
            dat[SptpHeader::LEN..].split_at(dat.len() - SptpHeader::LEN - CRC_LEN);
        Ok(CheckedFrame {
            icd,
            crc: u16::from_be_bytes([trailer[0], trailer[1]]),
            needed_crc: crc16(covered, covered.len()),
        })
    }

    pub(crate) fn from_parts(icd: IcdFrame<'a>, crc: u16) -> Self {
        CheckedFrame {
            icd,
            crc,
            needed_crc: crc,
        }
    }

    pub(crate) fn icd(&self) -> &IcdFrame<'a> {
        &self.icd
    }

    pub(crate) fn crc(&self) -> u16 {
        self.crc
    }

    pub(crate) fn needed_crc(&self) -> u16 {
        self.needed_crc
    }

    pub(crate) fn body(&self) -> &'a [u8] {
        let dat = self.icd.payload();
        &dat[..dat.len() - CRC_LEN]
    }

    pub(crate) fn sub_header(&self) -> &'a [u8] {
        &self.body()[..SUB_HEADER_LEN]
    }

    pub(crate) fn payload(&self) -> &'a [u8] {
        &self.body()[SUB_HEADER_LEN..]
    }

    pub(crate) fn size_matches(&self) -> bool {
        usize::from(self.icd.header().size) == self.body().len()
    }
}

/// Serialize SPTP header, ICD header, `body` and the CRC16 over everything but the
/// SPTP header. Returns the bytes and the CRC.
pub(crate) fn encode(sptp: &SptpHeader, icd: &IcdHeader, body: &[u8]) -> (Vec<u8>, u16) {
    let mut data = Vec::with_capacity(IcdFrame::HEADERS_LEN + body.len() + CRC_LEN);
    data.extend_from_slice(&sptp.encode());
    data.extend_from_slice(&icd.encode());
    data.extend_from_slice(body);
    let covered = &data[SptpHeader::LEN..];
    let crc = crc16(covered, covered.len());
    data.extend_from_slice(&crc.to_be_bytes());
    (data, crc)
}
