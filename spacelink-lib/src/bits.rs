//! Big-endian and sub-byte field helpers.
//!
//! None of these validate the range of a value; callers do that. Values wider than
//! a field are silently masked when packed.

/// Mask with the low `width` bits set.
#[must_use]
pub const fn mask(width: u32) -> u32 {
    if width >= 32 {
        u32::MAX
    } else {
        (1 << width) - 1
    }
}

/// Compose up to 4 bytes into an unsigned integer, most significant byte first.
///
/// # Panics
/// If `dat` is longer than 4 bytes.
#[must_use]
pub fn be_uint(dat: &[u8]) -> u32 {
    assert!(dat.len() <= 4, "at most 4 bytes fit in a u32");
    dat.iter().fold(0, |acc, b| (acc << 8) | u32::from(*b))
}

/// Write the low `out.len()` bytes of `value` into `out`, most significant byte first.
///
/// # Panics
/// If `out` is longer than 4 bytes.
pub fn put_be_uint(value: u32, out: &mut [u8]) {
    assert!(out.len() <= 4, "at most 4 bytes fit in a u32");
    let n = out.len();
    for (idx, b) in out.iter_mut().enumerate() {
        *b = (value >> (8 * (n - 1 - idx))) as u8;
    }
}

/// Extract the `width` bit field whose least significant bit sits at `shift`.
#[must_use]
pub const fn extract(word: u32, shift: u32, width: u32) -> u32 {
    (word >> shift) & mask(width)
}

/// Replace the `width` bit field at `shift` in `word` with `value`.
#[must_use]
pub const fn insert(word: u32, value: u32, shift: u32, width: u32) -> u32 {
    let m = mask(width) << shift;
    (word & !m) | ((value << shift) & m)
}

/// Compose the 4 stream bytes `[b0, b1, b2, b3]` as the integer `b3 b2 b1 b0`.
#[must_use]
pub const fn reversed_u32(dat: [u8; 4]) -> u32 {
    u32::from_le_bytes(dat)
}

/// Inverse of [reversed_u32].
#[must_use]
pub const fn put_reversed_u32(value: u32) -> [u8; 4] {
    value.to_le_bytes()
}
