//! Shared binary fixture builders for BEJ decoder tests
//!
//! These builders produce packed dictionary blobs and BEJ wire bytes for
//! the integration tests. They are test scaffolding, not a general
//! purpose encoder: callers control every field, including invalid ones.

#![deny(unsafe_code)]

use bej_format::constants::{DICTIONARY_ENTRY_SIZE, DICTIONARY_HEADER_SIZE};
use bej_format::nnint::encode_nnint;
use bej_format::DictionarySelector;

enum NameRef {
    None,
    Inline(Vec<u8>),
    Raw { length: u8, offset: u16 },
}

struct EntrySpec {
    format: u8,
    sequence: u16,
    child_pointer_offset: u16,
    child_count: u16,
    name: NameRef,
}

/// Builds packed dictionary blobs entry by entry.
///
/// Inline names are laid out in the name region, in entry order,
/// immediately after the entries table.
pub struct DictionaryBuilder {
    version_tag: u8,
    flags: u8,
    schema_version: u32,
    entries: Vec<EntrySpec>,
}

impl DictionaryBuilder {
    /// Start an empty dictionary
    pub fn new() -> Self {
        Self {
            version_tag: 0x00,
            flags: 0x00,
            schema_version: 0x0100_0000,
            entries: Vec::new(),
        }
    }

    /// Override the schema version header field
    pub fn schema_version(mut self, schema_version: u32) -> Self {
        self.schema_version = schema_version;
        self
    }

    /// Add an entry with a name and no children
    pub fn entry(self, format: u8, sequence: u16, name: &str) -> Self {
        self.push(format, sequence, 0, 0, NameRef::Inline(name.as_bytes().to_vec()))
    }

    /// Add an entry whose children are the `child_count` entries starting
    /// at table index `first_child`
    pub fn entry_with_children(
        self,
        format: u8,
        sequence: u16,
        name: &str,
        first_child: u16,
        child_count: u16,
    ) -> Self {
        let offset = DICTIONARY_HEADER_SIZE as u16 + first_child * DICTIONARY_ENTRY_SIZE as u16;
        self.push(
            format,
            sequence,
            offset,
            child_count,
            NameRef::Inline(name.as_bytes().to_vec()),
        )
    }

    /// Add an entry carrying no name
    pub fn nameless_entry(self, format: u8, sequence: u16) -> Self {
        self.push(format, sequence, 0, 0, NameRef::None)
    }

    /// Add an entry whose name record is written verbatim with no
    /// bounds checking; exercises the out-of-range name path
    pub fn entry_with_raw_name(
        self,
        format: u8,
        sequence: u16,
        name_length: u8,
        name_offset: u16,
    ) -> Self {
        self.push(
            format,
            sequence,
            0,
            0,
            NameRef::Raw {
                length: name_length,
                offset: name_offset,
            },
        )
    }

    fn push(
        mut self,
        format: u8,
        sequence: u16,
        child_pointer_offset: u16,
        child_count: u16,
        name: NameRef,
    ) -> Self {
        self.entries.push(EntrySpec {
            format,
            sequence,
            child_pointer_offset,
            child_count,
            name,
        });
        self
    }

    /// Produce the packed blob
    pub fn build(self) -> Vec<u8> {
        let name_base = DICTIONARY_HEADER_SIZE + self.entries.len() * DICTIONARY_ENTRY_SIZE;

        let mut name_region = Vec::new();
        let mut records = Vec::new();
        for spec in &self.entries {
            let (name_length, name_offset) = match &spec.name {
                NameRef::None => (0u8, 0u16),
                NameRef::Inline(bytes) => {
                    let offset = (name_base + name_region.len()) as u16;
                    name_region.extend_from_slice(bytes);
                    (bytes.len() as u8, offset)
                }
                NameRef::Raw { length, offset } => (*length, *offset),
            };

            records.push(spec.format);
            records.extend_from_slice(&spec.sequence.to_le_bytes());
            records.extend_from_slice(&spec.child_pointer_offset.to_le_bytes());
            records.extend_from_slice(&spec.child_count.to_le_bytes());
            records.push(name_length);
            records.extend_from_slice(&name_offset.to_le_bytes());
        }

        let total = (DICTIONARY_HEADER_SIZE + records.len() + name_region.len()) as u32;
        let mut blob = Vec::with_capacity(total as usize);
        blob.push(self.version_tag);
        blob.push(self.flags);
        blob.extend_from_slice(&(self.entries.len() as u16).to_le_bytes());
        blob.extend_from_slice(&self.schema_version.to_le_bytes());
        blob.extend_from_slice(&total.to_le_bytes());
        blob.extend_from_slice(&records);
        blob.extend_from_slice(&name_region);
        blob
    }
}

impl Default for DictionaryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The fixed BEJ stream header
pub fn stream_header(version: u32, flags: u16, schema_class: u8) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(7);
    bytes.extend_from_slice(&version.to_le_bytes());
    bytes.extend_from_slice(&flags.to_le_bytes());
    bytes.push(schema_class);
    bytes
}

/// Encode one SFLV tuple. `format` is the full wire byte (principal
/// nibble in the high bits).
pub fn sflv(sequence: u32, selector: DictionarySelector, format: u8, payload: &[u8]) -> Vec<u8> {
    let selector_bit = match selector {
        DictionarySelector::Schema => 0,
        DictionarySelector::Annotation => 1,
    };
    let mut bytes: Vec<u8> = encode_nnint((sequence << 1) | selector_bit).to_vec();
    bytes.push(format);
    bytes.extend_from_slice(&encode_nnint(payload.len() as u32));
    bytes.extend_from_slice(payload);
    bytes
}

/// A container payload: declared member count followed by the encoded
/// children. The count is taken as given, so tests can declare it wrong.
pub fn container_payload(declared_count: u32, children: &[Vec<u8>]) -> Vec<u8> {
    let mut bytes: Vec<u8> = encode_nnint(declared_count).to_vec();
    for child in children {
        bytes.extend_from_slice(child);
    }
    bytes
}

/// A full document: stream header plus one top-level tuple
pub fn document(root: &[u8]) -> Vec<u8> {
    let mut bytes = stream_header(bej_format::constants::BEJ_VERSION_1_0, 0x0000, 0x00);
    bytes.extend_from_slice(root);
    bytes
}
