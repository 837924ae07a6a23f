//! BEJ Format - Wire-format primitives for Binary Encoded JSON
//!
//! This crate provides the fundamental decoding utilities for BEJ streams
//! with no file-I/O dependencies. It includes:
//!
//! - Wire and dictionary layout constants
//! - NNINT variable-length integer codec
//! - SFLV tuple parsing
//! - Sequential byte sources over slices and readers
//! - Error types

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod constants;
pub mod error;
pub mod formats;
pub mod nnint;
pub mod sflv;
pub mod source;

// Re-export commonly used types
pub use error::{BejError, Result};
pub use formats::BejFormat;
pub use sflv::{DictionarySelector, Sflv};
pub use source::{SliceSource, Source, StreamSource};
