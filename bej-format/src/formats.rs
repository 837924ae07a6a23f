//! BEJ principal format codes

use crate::error::{BejError, Result};

/// Principal data type carried in the high nibble of an SFLV format byte.
///
/// The low nibble of the wire byte holds sub-format flags that this
/// decoder does not interpret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum BejFormat {
    /// JSON object
    Set = 0x0,
    /// JSON array
    Array = 0x1,
    /// JSON null
    Null = 0x2,
    /// Signed little-endian integer, 1..8 payload bytes
    Integer = 0x3,
    /// Enumeration option; payload is an NNINT option sequence
    Enum = 0x4,
    /// String, payload bytes emitted with JSON escaping
    String = 0x5,
    /// IEEE-754 floating point
    Real = 0x6,
    /// Boolean
    Boolean = 0x7,
    /// Raw byte string (rendered as a placeholder)
    ByteString = 0x8,
    /// Choice of alternative formats (recognized, not decoded)
    Choice = 0x9,
    /// Property annotation (recognized, not decoded)
    PropertyAnnotation = 0xA,
    /// Registry item (recognized, not decoded)
    RegistryItem = 0xB,
}

impl BejFormat {
    /// Convert from a 4-bit format nibble
    pub fn from_nibble(val: u8) -> Result<Self> {
        match val {
            0x0 => Ok(BejFormat::Set),
            0x1 => Ok(BejFormat::Array),
            0x2 => Ok(BejFormat::Null),
            0x3 => Ok(BejFormat::Integer),
            0x4 => Ok(BejFormat::Enum),
            0x5 => Ok(BejFormat::String),
            0x6 => Ok(BejFormat::Real),
            0x7 => Ok(BejFormat::Boolean),
            0x8 => Ok(BejFormat::ByteString),
            0x9 => Ok(BejFormat::Choice),
            0xA => Ok(BejFormat::PropertyAnnotation),
            0xB => Ok(BejFormat::RegistryItem),
            _ => Err(BejError::UnknownFormat(val)),
        }
    }

    /// The wire format byte for this principal type with no sub-format flags
    pub fn to_wire_byte(self) -> u8 {
        (self as u8) << 4
    }
}
