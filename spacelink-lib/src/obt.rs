//! Onboard time (OBT) frames.
//!
//! Always exactly 16 bytes: SPTP header, ICD header, then a 6 byte time record. The
//! 4 byte time value is stored least significant byte first.
use crate::bits::{put_reversed_u32, reversed_u32};
use crate::error::ensure_exact;
use crate::icd::{Apid, IcdFlag, IcdType, SEG_UNSEGMENTED};
use crate::{Decode, Error, Frame, IcdFrame, IcdHeader, MsgType, ProtocolId, Result, SptpHeader};

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ObtRecord {
    pub normal: u8,
    pub extended: u8,
    pub value: u32,
}

impl ObtRecord {
    /// Size of a ``ObtRecord``
    pub const LEN: usize = 6;

    /// Decode from bytes. Returns `None` if there are not enough bytes to construct the
    /// record.
    #[must_use]
    pub fn decode(dat: &[u8]) -> Option<Self> {
        if dat.len() < Self::LEN {
            return None;
        }
        Some(ObtRecord {
            normal: dat[0],
            extended: dat[1],
            value: reversed_u32([dat[2], dat[3], dat[4], dat[5]]),
        })
    }

    #[must_use]
    pub fn encode(&self) -> [u8; Self::LEN] {
        let v = put_reversed_u32(self.value);
        [self.normal, self.extended, v[0], v[1], v[2], v[3]]
    }
}

/// An OBT frame borrowed from a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObtFrame<'a> {
    icd: IcdFrame<'a>,
    record: ObtRecord,
}

impl<'a> ObtFrame<'a> {
    /// The one and only valid frame length.
    pub const LEN: usize = IcdFrame::HEADERS_LEN + ObtRecord::LEN;

    #[must_use]
    pub fn sptp(&self) -> &SptpHeader {
        self.icd.sptp()
    }

    #[must_use]
    pub fn header(&self) -> &IcdHeader {
        self.icd.header()
    }

    #[must_use]
    pub fn icd(&self) -> &IcdFrame<'a> {
        &self.icd
    }

    #[must_use]
    pub fn record(&self) -> &ObtRecord {
        &self.record
    }

    /// True if the ICD size equals the record length.
    #[must_use]
    pub fn size_matches(&self) -> bool {
        self.icd.size_matches()
    }
}

impl<'a> Decode<'a> for ObtFrame<'a> {
    fn decode(dat: &'a [u8]) -> Result<Self> {
        ensure_exact(dat, Self::LEN)?;
        let icd = IcdFrame::decode(dat)?;
        let record = ObtRecord::decode(icd.payload()).ok_or(Error::FrameWrongLength {
            actual: dat.len(),
            expected: Self::LEN,
        })?;
        Ok(ObtFrame { icd, record })
    }
}

impl<'a> Frame<'a> for ObtFrame<'a> {
    fn as_bytes(&self) -> &'a [u8] {
        self.icd.as_bytes()
    }
}

/// An outgoing OBT frame that owns its serialized bytes.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObtFrameBuf {
    sptp: SptpHeader,
    header: IcdHeader,
    record: ObtRecord,
    #[cfg_attr(feature = "serde", serde(with = "serde_bytes"))]
    data: Vec<u8>,
}

impl ObtFrameBuf {
    /// Build a time frame carrying `record` for `apid`, routed from `from` to `to`.
    ///
    /// # Errors
    /// [Error::FieldOutOfRange] if `apid` does not fit in 11 bits.
    pub fn new(record: ObtRecord, to: u8, from: u8, apid: Apid) -> Result<Self> {
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
            msg_type: MsgType::Time,
            from,
        };
        let header = IcdHeader {
            version: 0,
            type_flag: IcdType::Telecommand,
            flag: IcdFlag::NoHeader,
            apid,
            segment: SEG_UNSEGMENTED,
            counter: 0,
            size: ObtRecord::LEN as u16,
        };
        let mut data = Vec::with_capacity(ObtFrame::LEN);
        data.extend_from_slice(&sptp.encode());
        data.extend_from_slice(&header.encode());
        data.extend_from_slice(&record.encode());
        Ok(ObtFrameBuf {
            sptp,
            header,
            record,
            data,
        })
    }

    /// Borrow this frame as if it had been decoded.
    #[must_use]
    pub fn frame(&self) -> ObtFrame<'_> {
        ObtFrame {
            icd: IcdFrame::from_parts(self.sptp, self.header, &self.data),
            record: self.record,
        }
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
    use test_case::test_case;

    const DAT: [u8; 16] = [
        0x01, 0xf1, 0x03, 0x02, // sptp
        0x10, 0x05, 0xc0, 0x00, 0x00, 0x06, // icd
        0x11, 0x22, // normal, extended
        0x78, 0x56, 0x34, 0x12, // value, lsb first
    ];

    #[test]
    fn decode() {
        let frame = ObtFrame::decode(&DAT).unwrap();

        assert_eq!(frame.sptp().msg_type, MsgType::Time);
        assert_eq!(frame.header().apid, 5);
        assert_eq!(
            *frame.record(),
            ObtRecord {
                normal: 0x11,
                extended: 0x22,
                value: 0x1234_5678,
            }
        );
        assert!(frame.size_matches());
        assert_eq!(frame.as_bytes(), &DAT);
    }

    #[test_case(0; "empty")]
    #[test_case(5; "shorter than sptp+icd")]
    #[test_case(15; "one short")]
    #[test_case(17; "one long")]
    #[test_case(65540; "very long")]
    fn wrong_length(len: usize) {
        let dat = vec![0u8; len];
        assert_eq!(
            ObtFrame::decode(&dat).unwrap_err(),
            Error::FrameWrongLength {
                actual: len,
                expected: 16
            }
        );
    }

    #[test]
    fn build_then_decode() {
        let record = ObtRecord {
            normal: 0x11,
            extended: 0x22,
            value: 0x1234_5678,
        };
        let built = ObtFrameBuf::new(record, 0x01, 0x02, 5).unwrap();

        assert_eq!(&built.as_bytes()[12..], &[0x78, 0x56, 0x34, 0x12]);
        let frame = ObtFrame::decode(built.as_bytes()).unwrap();
        assert_eq!(frame, built.frame());
        assert_eq!(*frame.record(), record);
        assert_eq!(frame.sptp().to, 0x01);
        assert_eq!(frame.sptp().from, 0x02);
        assert_eq!(frame.header().apid, 5);
        assert!(frame.size_matches());
    }

    #[test]
    fn absent_buffer() {
        assert_eq!(ObtFrame::decode_opt(None).unwrap_err(), Error::NullInput);
    }
}
