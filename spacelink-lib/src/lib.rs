#![doc = include_str!("../README.md")]

mod checked;
mod decode;
mod error;
mod frame;
mod hsi;
mod icd;
mod obt;
mod sptp;
mod timecode;
mod tk;
mod tm;

pub mod bits;
pub mod checksum;

pub use checksum::crc16;
pub use decode::{classify, decode_as, Channel, DecodedFrame, Decoder, Kind};
pub use error::{Error, Result};
pub use frame::{Decode, Frame};
pub use hsi::{HsiFlag, HsiFrame, HsiHeader, Line};
pub use icd::{
    Apid, IcdFlag, IcdFrame, IcdHeader, IcdType, SEG_CONTINUATION, SEG_FIRST, SEG_LAST,
    SEG_UNSEGMENTED,
};
pub use obt::{ObtFrame, ObtFrameBuf, ObtRecord};
pub use sptp::{MsgType, ProtocolId, SptpFrame, SptpFrameBuf, SptpHeader};
pub use timecode::TimeCodeFrame;
pub use tk::{TkFrame, TkFrameBuf};
pub use tm::TmFrame;
