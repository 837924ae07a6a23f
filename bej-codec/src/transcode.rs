//! Recursive BEJ-to-JSON transcoding
//!
//! The transcoder reads one SFLV at a time and emits JSON as it goes;
//! at most one tuple plus its payload is held per recursion depth.
//! Container formats wrap their payload in a `SliceSource` and recurse,
//! carrying their own dictionary entry as the resolution root for the
//! children.

use std::io::Write;

use bej_format::constants::STREAM_HEADER_SIZE;
use bej_format::nnint::read_nnint;
use bej_format::source::read_exact;
use bej_format::{BejFormat, DictionarySelector, Result, Sflv, SliceSource, Source};

use crate::dictionary::{DictEntry, Dictionary};
use crate::json::{write_indent, write_json_string, write_real};

/// Recursive decoder walking SFLV values and emitting JSON text.
///
/// Holds the decode state for one document: the two dictionaries, the
/// output sink, and the current indent depth. Not re-entrant; one
/// transcoder serves one decode call.
pub struct Transcoder<'a, W: Write> {
    schema: &'a Dictionary,
    annotations: &'a Dictionary,
    out: W,
    indent: usize,
}

impl<'a, W: Write> Transcoder<'a, W> {
    /// Create a transcoder over the two dictionaries and an output sink
    pub fn new(schema: &'a Dictionary, annotations: &'a Dictionary, out: W) -> Self {
        Self {
            schema,
            annotations,
            out,
            indent: 0,
        }
    }

    /// Decode one BEJ stream: the fixed header, then a single top-level
    /// value. Output is terminated by a newline and flushed.
    pub fn transcode<S: Source + ?Sized>(&mut self, input: &mut S) -> Result<()> {
        let mut header = [0u8; STREAM_HEADER_SIZE];
        read_exact(input, &mut header)?;
        let version = u32::from_le_bytes([header[0], header[1], header[2], header[3]]);
        let flags = u16::from_le_bytes([header[4], header[5]]);
        let schema_class = header[6];
        tracing::debug!(
            "stream header: version 0x{version:08X}, flags 0x{flags:04X}, schema class 0x{schema_class:02X}"
        );

        let root = Sflv::read(input)?;
        self.trace_tuple(&root);
        self.decode_value(&root, None)?;

        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(())
    }

    /// Decode a single value. `entry` is the value's own dictionary
    /// entry, used as the resolution root for its children; `None` at
    /// the top level or when the name lookup came up empty.
    fn decode_value(&mut self, sflv: &Sflv, entry: Option<&'a DictEntry>) -> Result<()> {
        match sflv.principal_format() {
            Ok(BejFormat::Set) => self.decode_set(sflv, entry),
            Ok(BejFormat::Array) => self.decode_array(sflv, entry),
            Ok(BejFormat::Null) => Ok(self.out.write_all(b"null")?),
            Ok(BejFormat::Integer) => self.decode_integer(sflv),
            Ok(BejFormat::Enum) => self.decode_enum(sflv, entry),
            Ok(BejFormat::String) => Ok(write_json_string(&mut self.out, &sflv.value)?),
            Ok(BejFormat::Real) => self.decode_real(sflv),
            Ok(BejFormat::Boolean) => self.decode_boolean(sflv),
            Ok(BejFormat::ByteString) => Ok(self.out.write_all(b"\"<byte_string>\"")?),
            Ok(
                format @ (BejFormat::Choice
                | BejFormat::PropertyAnnotation
                | BejFormat::RegistryItem),
            ) => {
                tracing::warn!(?format, "format not fully implemented, emitting null");
                self.out.write_all(b"null")?;
                Ok(())
            }
            Err(err) => {
                // An unknown nibble still leaves a JSON token behind, but
                // the decode is over
                self.out.write_all(b"null")?;
                Err(err)
            }
        }
    }

    /// SET: a JSON object. The payload opens with a declared member
    /// count; the loop itself is driven by end of buffer.
    fn decode_set(&mut self, sflv: &Sflv, entry: Option<&'a DictEntry>) -> Result<()> {
        self.out.write_all(b"{")?;

        if !sflv.is_empty() {
            let mut reader = SliceSource::new(&sflv.value);
            self.out.write_all(b"\n")?;
            self.indent += 1;

            let declared = read_nnint(&mut reader)?;
            let mut decoded = 0u32;

            let mut first = true;
            while !reader.eof() {
                if !first {
                    self.out.write_all(b",\n")?;
                }
                first = false;

                let child = Sflv::read(&mut reader)?;
                self.trace_tuple(&child);
                let child_entry = self
                    .dictionary_for(child.selector)
                    .find(entry, child.sequence, Some(child.format_nibble()));

                write_indent(&mut self.out, self.indent)?;
                match child_entry.and_then(|found| found.name.as_deref()) {
                    Some(name) => write_json_string(&mut self.out, name)?,
                    None => write!(self.out, "\"seq_{}\"", child.sequence)?,
                }
                self.out.write_all(b": ")?;

                self.decode_value(&child, child_entry)?;
                decoded += 1;
            }

            if decoded != declared {
                tracing::debug!(declared, decoded, "set member count mismatch");
            }

            self.indent -= 1;
            self.out.write_all(b"\n")?;
            write_indent(&mut self.out, self.indent)?;
        }

        self.out.write_all(b"}")?;
        Ok(())
    }

    /// ARRAY: a JSON array on one logical line. Elements share the
    /// enclosing entry's schema, so the parent entry is passed straight
    /// through to each element.
    fn decode_array(&mut self, sflv: &Sflv, entry: Option<&'a DictEntry>) -> Result<()> {
        self.out.write_all(b"[")?;

        if !sflv.is_empty() {
            let mut reader = SliceSource::new(&sflv.value);

            // Declared element count; the loop is end-of-buffer driven
            let _declared = read_nnint(&mut reader)?;

            let mut first = true;
            while !reader.eof() {
                if !first {
                    self.out.write_all(b", ")?;
                }
                first = false;

                let element = Sflv::read(&mut reader)?;
                self.trace_tuple(&element);
                self.decode_value(&element, entry)?;
            }
        }

        self.out.write_all(b"]")?;
        Ok(())
    }

    /// INTEGER: little-endian, sign-extended from the payload's top bit.
    /// Lengths outside 1..=8 come out as 0.
    fn decode_integer(&mut self, sflv: &Sflv) -> Result<()> {
        let n = sflv.len();
        let mut value: i64 = 0;
        if (1..=8).contains(&n) {
            for (i, &byte) in sflv.value.iter().enumerate() {
                value |= (byte as i64) << (8 * i);
            }
            if n < 8 && sflv.value[n - 1] & 0x80 != 0 {
                value |= !0i64 << (8 * n);
            }
        }
        write!(self.out, "{}", value)?;
        Ok(())
    }

    /// REAL: length picks the representation. 1- and 2-byte payloads do
    /// not conform to a standard float layout and fall back to their
    /// unsigned value; other odd lengths come out as null.
    fn decode_real(&mut self, sflv: &Sflv) -> Result<()> {
        match sflv.value.as_slice() {
            &[a, b, c, d] => write_real(&mut self.out, f32::from_le_bytes([a, b, c, d]) as f64, 7)?,
            &[a, b, c, d, e, f, g, h] => {
                write_real(&mut self.out, f64::from_le_bytes([a, b, c, d, e, f, g, h]), 15)?
            }
            &[a] => write!(self.out, "{}", a)?,
            &[a, b] => write!(self.out, "{}", u16::from_le_bytes([a, b]))?,
            _ => self.out.write_all(b"null")?,
        }
        Ok(())
    }

    fn decode_boolean(&mut self, sflv: &Sflv) -> Result<()> {
        let value = sflv.value.iter().any(|&byte| byte != 0);
        self.out.write_all(if value { b"true" } else { b"false" })?;
        Ok(())
    }

    /// ENUM: the payload is an NNINT naming an option sequence, resolved
    /// among the children of this tuple's own dictionary entry.
    fn decode_enum(&mut self, sflv: &Sflv, entry: Option<&'a DictEntry>) -> Result<()> {
        let option_sequence = if sflv.is_empty() {
            0
        } else {
            read_nnint(&mut SliceSource::new(&sflv.value))?
        };

        let resolved = self
            .dictionary_for(sflv.selector)
            .find(entry, option_sequence, None)
            .and_then(|option| option.name.as_deref());

        match resolved {
            Some(name) => write_json_string(&mut self.out, name)?,
            None => write!(self.out, "\"{}\"", option_sequence)?,
        }
        Ok(())
    }

    fn dictionary_for(&self, selector: DictionarySelector) -> &'a Dictionary {
        match selector {
            DictionarySelector::Schema => self.schema,
            DictionarySelector::Annotation => self.annotations,
        }
    }

    fn trace_tuple(&self, sflv: &Sflv) {
        tracing::trace!(
            sequence = sflv.sequence,
            length = sflv.len(),
            selector = ?sflv.selector,
            "sflv format 0x{:02X}",
            sflv.format
        );
    }
}
