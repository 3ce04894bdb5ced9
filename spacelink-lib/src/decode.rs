//! Kind dispatch over single pre-delimited buffers.
use std::fmt::Display;

use derive_more::From;
use tracing::{debug, trace};
use typed_builder::TypedBuilder;

use crate::{
    Decode, Error, Frame, HsiFrame, HsiHeader, IcdFrame, MsgType, ObtFrame, ProtocolId, Result,
    SptpFrame, SptpHeader, TimeCodeFrame, TkFrame, TmFrame,
};

/// Physical channel a buffer was received on.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Channel {
    Hsi,
    SpaceWire,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Kind {
    Hsi,
    Sptp,
    Icd,
    Tm,
    Tk,
    Obt,
    TimeCode,
}

impl Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Kind::Hsi => "HSI",
            Kind::Sptp => "SPTP",
            Kind::Icd => "ICD",
            Kind::Tm => "TM",
            Kind::Tk => "TK",
            Kind::Obt => "OBT",
            Kind::TimeCode => "TimeCode",
        };
        f.write_str(name)
    }
}

/// Any one decoded frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, From)]
pub enum DecodedFrame<'a> {
    Hsi(HsiFrame<'a>),
    Sptp(SptpFrame<'a>),
    Icd(IcdFrame<'a>),
    Tm(TmFrame<'a>),
    Tk(TkFrame<'a>),
    Obt(ObtFrame<'a>),
    TimeCode(TimeCodeFrame<'a>),
}

impl<'a> DecodedFrame<'a> {
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            DecodedFrame::Hsi(_) => Kind::Hsi,
            DecodedFrame::Sptp(_) => Kind::Sptp,
            DecodedFrame::Icd(_) => Kind::Icd,
            DecodedFrame::Tm(_) => Kind::Tm,
            DecodedFrame::Tk(_) => Kind::Tk,
            DecodedFrame::Obt(_) => Kind::Obt,
            DecodedFrame::TimeCode(_) => Kind::TimeCode,
        }
    }

    #[must_use]
    pub fn as_bytes(&self) -> &'a [u8] {
        match self {
            DecodedFrame::Hsi(f) => f.as_bytes(),
            DecodedFrame::Sptp(f) => f.as_bytes(),
            DecodedFrame::Icd(f) => f.as_bytes(),
            DecodedFrame::Tm(f) => f.as_bytes(),
            DecodedFrame::Tk(f) => f.as_bytes(),
            DecodedFrame::Obt(f) => f.as_bytes(),
            DecodedFrame::TimeCode(f) => f.as_bytes(),
        }
    }
}

/// Determine the frame kind of `dat` from the channel and, for SpaceWire, the SPTP
/// protocol id and message type.
///
/// A single SpaceWire byte is a time-code. Unknown protocol ids are treated as plain
/// SPTP frames and unknown ICD message types as plain ICD frames.
///
/// # Errors
/// [Error::FrameTooShort] if a SpaceWire buffer is too short to hold a SPTP header.
pub fn classify(channel: Channel, dat: &[u8]) -> Result<Kind> {
    if channel == Channel::Hsi {
        return Ok(Kind::Hsi);
    }
    if dat.len() == TimeCodeFrame::LEN {
        return Ok(Kind::TimeCode);
    }
    let header = SptpHeader::decode(dat).ok_or(Error::FrameTooShort {
        actual: dat.len(),
        minimum: SptpHeader::LEN,
    })?;
    let kind = match (header.protocol_id, header.msg_type) {
        (ProtocolId::Icd, MsgType::Command) => Kind::Tk,
        (ProtocolId::Icd, MsgType::Telemetry) => Kind::Tm,
        (ProtocolId::Icd, MsgType::Time) => Kind::Obt,
        (ProtocolId::Icd, _) => Kind::Icd,
        _ => Kind::Sptp,
    };
    Ok(kind)
}

/// Decode `dat` as exactly `kind`, applying no validation beyond the kind's length
/// policy.
///
/// # Errors
/// The length errors of the chosen kind.
pub fn decode_as(kind: Kind, dat: &[u8]) -> Result<DecodedFrame<'_>> {
    let frame = match kind {
        Kind::Hsi => HsiFrame::decode(dat)?.into(),
        Kind::Sptp => SptpFrame::decode(dat)?.into(),
        Kind::Icd => IcdFrame::decode(dat)?.into(),
        Kind::Tm => TmFrame::decode(dat)?.into(),
        Kind::Tk => TkFrame::decode(dat)?.into(),
        Kind::Obt => ObtFrame::decode(dat)?.into(),
        Kind::TimeCode => TimeCodeFrame::decode(dat)?.into(),
    };
    Ok(frame)
}

/// Single entry point for received buffers.
///
/// By default no checks beyond length are made, i.e., CRC and size mismatches are
/// left for the caller to inspect. Enable checks to have such frames rejected instead.
///
/// # Example
/// ```
/// use spacelink::{Channel, Decoder, Kind};
///
/// let decoder = Decoder::builder().verify_crc(true).build();
/// let frame = decoder.decode(Channel::SpaceWire, &[0x2a]).unwrap();
/// assert_eq!(frame.kind(), Kind::TimeCode);
/// ```
#[derive(TypedBuilder, Debug, Clone, Copy)]
pub struct Decoder {
    /// Reject TM/TK frames whose trailing CRC does not match.
    #[builder(default)]
    verify_crc: bool,
    /// Reject frames whose declared size disagrees with the bytes present.
    #[builder(default)]
    check_size: bool,
    /// Reject HSI frames whose first byte is not [HsiHeader::SYNC].
    #[builder(default)]
    check_hsi_sync: bool,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Decoder {
    /// Classify and decode one buffer received on `channel`.
    ///
    /// # Errors
    /// Length errors of the classified kind, or a policy error if a configured check
    /// fails.
    pub fn decode<'a>(&self, channel: Channel, dat: &'a [u8]) -> Result<DecodedFrame<'a>> {
        let kind = classify(channel, dat)?;
        trace!(?channel, %kind, len = dat.len(), "classified frame");
        self.decode_as(kind, dat)
    }

    /// Like [Decoder::decode] for a buffer that may be absent.
    ///
    /// # Errors
    /// [Error::NullInput] if `dat` is `None`, otherwise as [Decoder::decode].
    pub fn decode_opt<'a>(
        &self,
        channel: Channel,
        dat: Option<&'a [u8]>,
    ) -> Result<DecodedFrame<'a>> {
        self.decode(channel, dat.ok_or(Error::NullInput)?)
    }

    /// Decode one buffer as `kind` and apply the configured checks.
    ///
    /// # Errors
    /// Length errors of `kind`, or a policy error if a configured check fails.
    pub fn decode_as<'a>(&self, kind: Kind, dat: &'a [u8]) -> Result<DecodedFrame<'a>> {
        let frame = decode_as(kind, dat)?;
        self.check(&frame)?;
        Ok(frame)
    }

    fn check(&self, frame: &DecodedFrame<'_>) -> Result<()> {
        if self.verify_crc {
            let crcs = match frame {
                DecodedFrame::Tm(f) => Some((f.needed_crc(), f.crc())),
                DecodedFrame::Tk(f) => Some((f.needed_crc(), f.crc())),
                _ => None,
            };
            if let Some((expected, actual)) = crcs {
                if expected != actual {
                    debug!(kind = %frame.kind(), expected, actual, "crc mismatch");
                    return Err(Error::CrcMismatch { expected, actual });
                }
            }
        }

        if self.check_size {
            let sizes = match frame {
                DecodedFrame::Hsi(f) => Some((f.header().size, f.payload().len())),
                DecodedFrame::Icd(f) => Some((f.header().size, f.payload().len())),
                DecodedFrame::Tm(f) => Some((f.header().size, f.body().len())),
                DecodedFrame::Tk(f) => Some((f.header().size, f.body().len())),
                DecodedFrame::Obt(f) => Some((f.header().size, f.icd().payload().len())),
                DecodedFrame::Sptp(_) | DecodedFrame::TimeCode(_) => None,
            };
            if let Some((declared, actual)) = sizes {
                let declared = usize::from(declared);
                if declared != actual {
                    debug!(kind = %frame.kind(), declared, actual, "size mismatch");
                    return Err(Error::SizeMismatch { declared, actual });
                }
            }
        }

        if self.check_hsi_sync {
            if let DecodedFrame::Hsi(f) = frame {
                let actual = f.header().reserved;
                if actual != HsiHeader::SYNC {
                    debug!(actual, "bad hsi sync byte");
                    return Err(Error::BadSync { actual });
                }
            }
        }

        Ok(())
    }
}
