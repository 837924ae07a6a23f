//! Error types for BEJ decoding

use thiserror::Error;

/// BEJ error types
#[derive(Debug, Error)]
pub enum BejError {
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("invalid NNINT length ({0})")]
    MalformedNnint(u8),
    #[error("unknown format type 0x{0:02X}")]
    UnknownFormat(u8),
    #[error("corrupt dictionary: {0}")]
    CorruptDictionary(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, BejError>;
