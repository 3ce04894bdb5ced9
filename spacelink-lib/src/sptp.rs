//! SPTP routing frames, the foundation layer of every SpaceWire-side frame.
use crate::error::too_short;
use crate::{Decode, Frame, Result};

/// Protocol discriminant in the SPTP header. Unknown values are kept as
/// [ProtocolId::Raw].
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ProtocolId {
    /// Plain routing frame with an opaque payload.
    Standard,
    /// Payload is an ICD frame.
    Icd,
    Raw(u8),
}

impl ProtocolId {
    pub const STANDARD: u8 = 0xf0;
    pub const ICD: u8 = 0xf1;
}

impl From<u8> for ProtocolId {
    fn from(value: u8) -> Self {
        match value {
            Self::STANDARD => ProtocolId::Standard,
            Self::ICD => ProtocolId::Icd,
            x => ProtocolId::Raw(x),
        }
    }
}

impl From<ProtocolId> for u8 {
    fn from(value: ProtocolId) -> Self {
        match value {
            ProtocolId::Standard => ProtocolId::STANDARD,
            ProtocolId::Icd => ProtocolId::ICD,
            ProtocolId::Raw(x) => x,
        }
    }
}

/// Message type in the SPTP header. Unknown values are kept as [MsgType::Raw].
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MsgType {
    /// Telecommand (TK)
    Command,
    /// Telemetry (TM)
    Telemetry,
    Data,
    /// Onboard time (OBT)
    Time,
    Raw(u8),
}

impl From<u8> for MsgType {
    fn from(value: u8) -> Self {
        match value {
            0x00 => MsgType::Command,
            0x01 => MsgType::Telemetry,
            0x02 => MsgType::Data,
            0x03 => MsgType::Time,
            x => MsgType::Raw(x),
        }
    }
}

impl From<MsgType> for u8 {
    fn from(value: MsgType) -> Self {
        match value {
            MsgType::Command => 0x00,
            MsgType::Telemetry => 0x01,
            MsgType::Data => 0x02,
            MsgType::Time => 0x03,
            MsgType::Raw(x) => x,
        }
    }
}

/// SPTP header: `[to, protocol_id, msg_type, from]`.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SptpHeader {
    pub to: u8,
    pub protocol_id: ProtocolId,
    pub msg_type: MsgType,
    pub from: u8,
}

impl SptpHeader {
    /// Size of a ``SptpHeader``
    pub const LEN: usize = 4;

    /// Decode from bytes. Returns `None` if there are not enough bytes to construct the
    /// header.
    #[must_use]
    pub fn decode(dat: &[u8]) -> Option<Self> {
        if dat.len() < Self::LEN {
            return None;
        }
        Some(SptpHeader {
            to: dat[0],
            protocol_id: ProtocolId::from(dat[1]),
            msg_type: MsgType::from(dat[2]),
            from: dat[3],
        })
    }

    #[must_use]
    pub fn encode(&self) -> [u8; Self::LEN] {
        [
            self.to,
            self.protocol_id.into(),
            self.msg_type.into(),
            self.from,
        ]
    }
}

/// A SPTP frame borrowed from the receive buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SptpFrame<'a> {
    header: SptpHeader,
    data: &'a [u8],
}

impl<'a> SptpFrame<'a> {
    pub const MIN_LEN: usize = SptpHeader::LEN;

    #[must_use]
    pub fn header(&self) -> &SptpHeader {
        &self.header
    }

    /// Bytes following the SPTP header. For ICD-bearing frames this is the ICD frame.
    #[must_use]
    pub fn payload(&self) -> &'a [u8] {
        &self.data[SptpHeader::LEN..]
    }
}

impl<'a> Decode<'a> for SptpFrame<'a> {
    fn decode(dat: &'a [u8]) -> Result<Self> {
        let header = SptpHeader::decode(dat).ok_or_else(|| too_short(dat, Self::MIN_LEN))?;
        Ok(SptpFrame { header, data: dat })
    }
}

impl<'a> Frame<'a> for SptpFrame<'a> {
    fn as_bytes(&self) -> &'a [u8] {
        self.data
    }
}

/// An outgoing SPTP frame that owns its serialized bytes.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SptpFrameBuf {
    header: SptpHeader,
    #[cfg_attr(feature = "serde", serde(with = "serde_bytes"))]
    data: Vec<u8>,
}

impl SptpFrameBuf {
    /// Build a [ProtocolId::Standard]/[MsgType::Data] frame carrying `payload` from
    /// node `from` to node `to`.
    ///
    /// # Example
    /// ```
    /// use spacelink::SptpFrameBuf;
    ///
    /// let frame = SptpFrameBuf::new(&[0x01, 0x02], 0x77, 0x66);
    /// assert_eq!(frame.as_bytes(), &[0x77, 0xf0, 0x02, 0x66, 0x01, 0x02]);
    /// ```
    #[must_use]
    pub fn new(payload: &[u8], to: u8, from: u8) -> Self {
        let header = SptpHeader {
            to,
            protocol_id: ProtocolId::Standard,
            msg_type: MsgType::Data,
            from,
        };
        let mut data = Vec::with_capacity(SptpHeader::LEN + payload.len());
        data.extend_from_slice(&header.encode());
        data.extend_from_slice(payload);
        SptpFrameBuf { header, data }
    }

    /// Borrow this frame as if it had been decoded.
    #[must_use]
    pub fn frame(&self) -> SptpFrame<'_> {
        SptpFrame {
            header: self.header,
            data: &self.data,
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
    use crate::Error;

    #[test]
    fn decode_header() {
        let dat = [0x11, 0xf1, 0x03, 0x22, 0xaa];
        let frame = SptpFrame::decode(&dat).unwrap();

        assert_eq!(
            *frame.header(),
            SptpHeader {
                to: 0x11,
                protocol_id: ProtocolId::Icd,
                msg_type: MsgType::Time,
                from: 0x22,
            }
        );
        assert_eq!(frame.payload(), &[0xaa]);
        assert_eq!(frame.as_bytes(), &dat);
    }

    #[test]
    fn raw_discriminants_are_kept() {
        let frame = SptpFrame::decode(&[0x00, 0x42, 0x99, 0x00]).unwrap();

        assert_eq!(frame.header().protocol_id, ProtocolId::Raw(0x42));
        assert_eq!(frame.header().msg_type, MsgType::Raw(0x99));
        assert_eq!(frame.header().encode(), [0x00, 0x42, 0x99, 0x00]);
    }

    #[test]
    fn build() {
        let payload = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06];
        let built = SptpFrameBuf::new(&payload, 0x77, 0x66);

        assert_eq!(
            built.as_bytes(),
            &[0x77, 0xf0, 0x02, 0x66, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06]
        );

        let frame = SptpFrame::decode(built.as_bytes()).unwrap();
        assert_eq!(frame, built.frame());
        assert_eq!(frame.header().to, 0x77);
        assert_eq!(frame.header().from, 0x66);
        assert_eq!(frame.header().protocol_id, ProtocolId::Standard);
        assert_eq!(frame.header().msg_type, MsgType::Data);
        assert_eq!(frame.payload(), &payload);
    }

    #[test]
    fn empty_payload_is_minimum() {
        let frame = SptpFrame::decode(&[1, 2, 3, 4]).unwrap();
        assert!(frame.payload().is_empty());
    }

    #[test]
    fn too_short() {
        assert_eq!(
            SptpFrame::decode(&[1, 2, 3]).unwrap_err(),
            Error::FrameTooShort {
                actual: 3,
                minimum: 4
            }
        );
        assert_eq!(SptpFrame::decode_opt(None).unwrap_err(), Error::NullInput);
    }
}
