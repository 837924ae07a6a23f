//! BEJ Codec - Decoding engine
//!
//! This crate provides the core decoding engine for BEJ:
//!
//! - Packed dictionary loading and hierarchical name lookup
//! - The recursive SFLV-to-JSON transcoder
//! - JSON text emission helpers

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod dictionary;
pub mod json;
pub mod transcode;

// Re-export commonly used types
pub use bej_format::{BejError, BejFormat, Result};

// Re-export our own types
pub use dictionary::{DictEntry, Dictionary};
pub use transcode::Transcoder;
