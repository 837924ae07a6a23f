//! Variable-length non-negative integer encoding (NNINT)
//!
//! An NNINT is one length byte `L` followed by `L` little-endian payload
//! bytes, with `1 <= L <= 4`. The decoded value is zero-extended to 32
//! bits.

use smallvec::SmallVec;

use crate::constants::NNINT_MAX_PAYLOAD;
use crate::error::{BejError, Result};
use crate::source::{read_exact, Source};

/// Decode an NNINT from the source
pub fn read_nnint<S: Source + ?Sized>(src: &mut S) -> Result<u32> {
    let mut length = [0u8; 1];
    read_exact(src, &mut length)?;
    let length = length[0] as usize;

    if length == 0 || length > NNINT_MAX_PAYLOAD {
        return Err(BejError::MalformedNnint(length as u8));
    }

    let mut bytes = [0u8; NNINT_MAX_PAYLOAD];
    read_exact(src, &mut bytes[..length])?;

    let mut result = 0u32;
    for (i, &byte) in bytes[..length].iter().enumerate() {
        result |= (byte as u32) << (8 * i);
    }
    Ok(result)
}

/// Encode a u32 as a canonical (minimum-length) NNINT
pub fn encode_nnint(value: u32) -> SmallVec<[u8; 5]> {
    let payload_len = match value {
        0..=0xFF => 1,
        0x100..=0xFFFF => 2,
        0x1_0000..=0xFF_FFFF => 3,
        _ => 4,
    };

    let mut result = SmallVec::new();
    result.push(payload_len as u8);
    result.extend_from_slice(&value.to_le_bytes()[..payload_len]);
    result
}
