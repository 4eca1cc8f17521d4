//! Bit layout and canonical representations of UUIDv7 values.
//!
//! Every function in this module is a pure transformation of a 128-bit value. Field widths and
//! offsets follow RFC 9562:
//!
//! ```text
//! | 127 ........ 80 | 79 .. 76 | 75 .... 64 | 63 .. 62 | 61 ............ 0 |
//! |   unix_ts_ms    |   ver    |   rand_a   |   var    |      rand_b       |
//! ```

use fstr::FStr;

use crate::FormatError;

const TIMESTAMP_MASK: u128 = (1 << 48) - 1;
const VERSION_MASK: u128 = (1 << 4) - 1;
const RAND_A_MASK: u128 = (1 << 12) - 1;
const VARIANT_MASK: u128 = (1 << 2) - 1;
const RAND_B_MASK: u128 = (1 << 62) - 1;

/// Field values of a UUID interpreted with the UUIDv7 layout.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Fields {
    /// 48-bit Unix timestamp in milliseconds.
    pub unix_ts_ms: u64,
    /// 4-bit version number.
    pub ver: u8,
    /// 12 bits following the version.
    pub rand_a: u16,
    /// 2-bit variant.
    pub var: u8,
    /// 62 bits following the variant.
    pub rand_b: u64,
}

/// Packs field values into a 128-bit value.
///
/// Each field is masked to its width, so excess high bits are silently dropped rather than
/// reported.
pub const fn pack(fields: Fields) -> u128 {
    ((fields.unix_ts_ms as u128 & TIMESTAMP_MASK) << 80)
        | ((fields.ver as u128 & VERSION_MASK) << 76)
        | ((fields.rand_a as u128 & RAND_A_MASK) << 64)
        | ((fields.var as u128 & VARIANT_MASK) << 62)
        | (fields.rand_b as u128 & RAND_B_MASK)
}

/// Splits a 128-bit value into its field values.
pub const fn unpack(value: u128) -> Fields {
    Fields {
        unix_ts_ms: (value >> 80) as u64,
        ver: ((value >> 76) & VERSION_MASK) as u8,
        rand_a: ((value >> 64) & RAND_A_MASK) as u16,
        var: ((value >> 62) & VARIANT_MASK) as u8,
        rand_b: (value & RAND_B_MASK) as u64,
    }
}

/// Returns the 16-byte big-endian representation.
pub const fn to_bytes(value: u128) -> [u8; 16] {
    value.to_be_bytes()
}

/// Creates a value from a 16-byte big-endian representation.
pub fn from_bytes(src: &[u8]) -> Result<u128, FormatError> {
    <[u8; 16]>::try_from(src)
        .map(u128::from_be_bytes)
        .map_err(|_| FormatError::InvalidLength { actual: src.len() })
}

/// Returns the 8-4-4-4-12 lowercase hexadecimal representation in a stack-allocated string.
pub fn format(value: u128) -> FStr<36> {
    const DIGITS: &[u8; 16] = b"0123456789abcdef";

    let bytes = to_bytes(value);
    let mut buffer = [0u8; 36];
    let mut buf_iter = buffer.iter_mut();
    for (i, e) in bytes.iter().enumerate() {
        for d in [DIGITS[(e >> 4) as usize], DIGITS[(e & 15) as usize]] {
            if let Some(b) = buf_iter.next() {
                *b = d;
            }
        }
        if i == 3 || i == 5 || i == 7 || i == 9 {
            if let Some(b) = buf_iter.next() {
                *b = b'-';
            }
        }
    }
    debug_assert!(buffer.is_ascii());
    // SAFETY: the buffer holds ASCII hex digits and hyphens only
    unsafe { FStr::from_inner_unchecked(buffer) }
}

/// Parses the 8-4-4-4-12 hexadecimal representation.
///
/// Both lowercase and uppercase digits are accepted; no surrounding braces, prefixes, or
/// whitespace are.
pub fn parse(src: &str) -> Result<u128, FormatError> {
    const ERR: FormatError = FormatError::InvalidText;
    if src.len() != 36 {
        return Err(ERR);
    }

    let mut dst = [0u8; 16];
    let mut iter = src.chars();
    for (i, e) in dst.iter_mut().enumerate() {
        let hi = iter.next().ok_or(ERR)?.to_digit(16).ok_or(ERR)? as u8;
        let lo = iter.next().ok_or(ERR)?.to_digit(16).ok_or(ERR)? as u8;
        *e = (hi << 4) | lo;
        if (i == 3 || i == 5 || i == 7 || i == 9) && iter.next().ok_or(ERR)? != '-' {
            return Err(ERR);
        }
    }
    if iter.next().is_none() {
        Ok(u128::from_be_bytes(dst))
    } else {
        Err(ERR)
    }
}
