//! BEJ I/O - File-level decode runtime
//!
//! This crate owns files and paths: it loads the two dictionaries from
//! disk, opens the input and output streams, and drives one transcode
//! per request.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod runtime;

// Re-export commonly used types
pub use bej_codec::{DictEntry, Dictionary, Transcoder};
pub use bej_format::{BejError, Result};
pub use runtime::{execute_decode, load_dictionary, DecodeRequest, DecodeSummary};
