//! Constants for the BEJ wire format and the packed dictionary layout

/// Stream header value for BEJ version 1.0.0
pub const BEJ_VERSION_1_0: u32 = 0xF1F0_F000;

/// Stream header value for BEJ version 1.1.0
pub const BEJ_VERSION_1_1: u32 = 0xF1F1_F000;

/// Fixed stream header: version (4) + flags (2) + schema class (1)
pub const STREAM_HEADER_SIZE: usize = 7;

/// Fixed dictionary header preceding the entries table
pub const DICTIONARY_HEADER_SIZE: usize = 12;

/// One packed dictionary entry record
pub const DICTIONARY_ENTRY_SIZE: usize = 10;

/// Maximum NNINT payload length, excluding the length byte
pub const NNINT_MAX_PAYLOAD: usize = 4;

/// Sequence-field bit selecting the annotation dictionary
pub const SEQUENCE_SELECTOR_BIT: u32 = 0x1;
