//! Telecommand (TK) frames.
use crate::checked::{self, CheckedFrame};
use crate::icd::{Apid, IcdFlag, IcdType, SEG_UNSEGMENTED};
use crate::{
    Decode, Error, Frame, IcdFrame, IcdHeader, MsgType, ProtocolId, Result, SptpHeader,
};

/// A CRC protected telecommand frame borrowed from a buffer.
///
/// Same layout and length policy as [TmFrame](crate::TmFrame).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TkFrame<'a>(CheckedFrame<'a>);

impl<'a> TkFrame<'a> {
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

    #[must_use]
    pub fn size_matches(&self) -> bool {
        self.0.size_matches()
    }
}

impl<'a> Decode<'a> for TkFrame<'a> {
    fn decode(dat: &'a [u8]) -> Result<Self> {
        Ok(TkFrame(CheckedFrame::decode(dat)?))
    }
}

impl<'a> Frame<'a> for TkFrame<'a> {
    fn as_bytes(&self) -> &'a [u8] {
        self.0.icd().as_bytes()
    }
}

/// An outgoing telecommand that owns its serialized bytes.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TkFrameBuf {
    sptp: SptpHeader,
    header: IcdHeader,
    crc: u16,
    #[cfg_attr(feature = "serde", serde(with = "serde_bytes"))]
    data: Vec<u8>,
}

impl TkFrameBuf {
    /// Build an unsegmented telecommand for `apid` routed from `from` to `to`.
    ///
    /// `body` is everything between the ICD header and the CRC, so it must start with
    /// the 4 byte sub-header. Telecommands are never segmented and always have
    /// counter 0.
    ///
    /// # Errors
    /// [Error::FrameTooShort] if `body` cannot hold the sub-header,
    /// [Error::PayloadTooLarge] if its length does not fit the ICD size field, or
    /// [Error::FieldOutOfRange] if `apid` does not fit in 11 bits.
    pub fn new(body: &[u8], to: u8, from: u8, apid: Apid) -> Result<Self> {
        if body.len() < checked::SUB_HEADER_LEN {
            return Err(Error::FrameTooShort {
                actual: body.len(),
                minimum: checked::SUB_HEADER_LEN,
            });
        }
        let size = u16::try_from(body.len()).map_err(|_| Error::PayloadTooLarge {
            actual: body.len(),
            maximum: usize::from(u16::MAX),
        })?;
        if apid > IcdHeader::APID_MAX {
            return Err(Error::FieldOutOfRange {
                field: "apid",
                value: u32::from(apid),
                maximum: u32::from(IcdHeader::APID_MAX),
            });
        }

        let sptp = SptpHeader {
            to,
            protocol_id: ProtocolId::Icd,
            msg_type: MsgType::Command,
            from,
        };
        let header = IcdHeader {
            version: 0,
            type_flag: IcdType::Telecommand,
            flag: IcdFlag::HeaderFill,
            apid,
            segment: SEG_UNSEGMENTED,
            counter: 0,
            size,
        };
        let (data, crc) = checked::encode(&sptp, &header, body);
        Ok(TkFrameBuf {
            sptp,
            header,
            crc,
            data,
        })
    }

    /// Borrow this frame as if it had been decoded.
    #[must_use]
    pub fn frame(&self) -> TkFrame<'_> {
        let icd = IcdFrame::from_parts(self.sptp, self.header, &self.data);
        TkFrame(CheckedFrame::from_parts(icd, self.crc))
    }

    #[must_use]
    pub fn crc(&self) -> u16 {
        self.crc
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crc16;

    const BODY: [u8; 6] = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06];

    #[test]
    fn build() {
        let built = TkFrameBuf::new(&BODY, 0x77, 0x66, 607).unwrap();
        let dat = built.as_bytes();

        assert_eq!(dat.len(), 18);
        assert_eq!(&dat[..4], &[0x77, 0xf1, 0x00, 0x66]);
        // version 0, type tk, flag fill, apid 607; segment 3, counter 0; size 6
        assert_eq!(&dat[4..10], &[0x1a, 0x5f, 0xc0, 0x00, 0x00, 0x06]);
        assert_eq!(&dat[10..16], &BODY);
        assert_eq!(crc16(&dat[4..16], 12).to_be_bytes(), [dat[16], dat[17]]);
        assert_eq!(built.crc(), crc16(&dat[4..16], 12));
    }

    #[test]
    fn build_then_decode() {
        let built = TkFrameBuf::new(&BODY, 0x77, 0x66, 607).unwrap();
        let frame = TkFrame::decode(built.as_bytes()).unwrap();

        assert_eq!(frame, built.frame());
        assert_eq!(frame.sptp().to, 0x77);
        assert_eq!(frame.sptp().from, 0x66);
        assert_eq!(frame.sptp().protocol_id, ProtocolId::Icd);
        assert_eq!(frame.sptp().msg_type, MsgType::Command);
        assert_eq!(frame.header().version, 0);
        assert_eq!(frame.header().flag, IcdFlag::HeaderFill);
        assert_eq!(frame.header().segment, SEG_UNSEGMENTED);
        assert_eq!(frame.header().counter, 0);
        assert_eq!(frame.header().apid, 607);
        assert_eq!(frame.header().size, 6);
        assert_eq!(frame.body(), &BODY);
        assert_eq!(frame.sub_header(), &BODY[..4]);
        assert_eq!(frame.payload(), &BODY[4..]);
        assert!(frame.crc_ok());
        assert!(frame.size_matches());
    }

    #[test]
    fn build_rejects_short_body() {
        assert_eq!(
            TkFrameBuf::new(&[1, 2, 3], 0, 0, 1).unwrap_err(),
            Error::FrameTooShort {
                actual: 3,
                minimum: 4
            }
        );
    }

    #[test]
    fn build_rejects_large_body() {
        let body = vec![0u8; 65536];
        assert_eq!(
            TkFrameBuf::new(&body, 0, 0, 1).unwrap_err(),
            Error::PayloadTooLarge {
                actual: 65536,
                maximum: 65535
            }
        );
    }

    #[test]
    fn build_rejects_wide_apid() {
        assert!(matches!(
            TkFrameBuf::new(&BODY, 0, 0, 0x800),
            Err(Error::FieldOutOfRange { field: "apid", .. })
        ));
    }
}
