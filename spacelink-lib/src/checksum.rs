//! CRC16 used as the TM/TK integrity trailer.
use crc::{Crc, CRC_16_IBM_3740};

/// CRC-16/CCITT-FALSE: poly 0x1021, init 0xffff, no reflection, no final xor.
pub const CRC16: Crc<u16> = Crc::<u16>::new(&CRC_16_IBM_3740);

/// Compute the CRC16 over the first `len` bytes of `dat`.
///
/// # Panics
/// If `len` is greater than `dat.len()`.
#[must_use]
pub fn crc16(dat: &[u8], len: usize) -> u16 {
    CRC16.checksum(&dat[..len])
}
