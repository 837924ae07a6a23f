//! SFLV tuple parsing
//!
//! The Sequence/Format/Length/Value tuple is the fundamental BEJ value.
//! On the wire: an NNINT carrying the sequence number with the dictionary
//! selector multiplexed into bit 0, one format byte, an NNINT payload
//! length, and the payload itself.

use crate::constants::SEQUENCE_SELECTOR_BIT;
use crate::error::Result;
use crate::formats::BejFormat;
use crate::nnint::read_nnint;
use crate::source::{read_exact, Source};

/// Dictionary a tuple resolves its names against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DictionarySelector {
    /// Main schema dictionary (selector bit 0)
    Schema,
    /// Annotation dictionary (selector bit 1)
    Annotation,
}

/// One parsed Sequence/Format/Length/Value tuple.
///
/// The tuple owns its payload; dropping the tuple frees the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sflv {
    /// Dictionary sequence number with the selector bit removed
    pub sequence: u32,
    /// Which dictionary the sequence number indexes into
    pub selector: DictionarySelector,
    /// Raw format byte as read; the high nibble is the principal data
    /// type, the low nibble carries sub-format flags this decoder ignores
    pub format: u8,
    /// Owned payload bytes
    pub value: Vec<u8>,
}

impl Sflv {
    /// Read one tuple from the source
    pub fn read<S: Source + ?Sized>(src: &mut S) -> Result<Self> {
        let combined = read_nnint(src)?;
        let selector = if combined & SEQUENCE_SELECTOR_BIT == 0 {
            DictionarySelector::Schema
        } else {
            DictionarySelector::Annotation
        };
        let sequence = combined >> 1;

        let mut format = [0u8; 1];
        read_exact(src, &mut format)?;

        let length = read_nnint(src)? as usize;
        let mut value = vec![0u8; length];
        if length > 0 {
            read_exact(src, &mut value)?;
        }

        Ok(Self {
            sequence,
            selector,
            format: format[0],
            value,
        })
    }

    /// The 4-bit principal format nibble
    pub fn format_nibble(&self) -> u8 {
        (self.format >> 4) & 0x0F
    }

    /// The principal format, if the nibble names one
    pub fn principal_format(&self) -> Result<BejFormat> {
        BejFormat::from_nibble(self.format_nibble())
    }

    /// Payload length in bytes
    pub fn len(&self) -> usize {
        self.value.len()
    }

    /// True when the tuple carries no payload
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}
