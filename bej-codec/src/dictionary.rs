//! Packed dictionary loading and hierarchical name lookup
//!
//! A dictionary is a 12-byte header, a contiguous table of 10-byte entry
//! records, and a trailing name region addressed by absolute byte
//! offsets. The hierarchy on disk is expressed as byte offsets into the
//! entries table; loading converts those to plain indices, so no
//! intra-blob pointers survive past `parse`.

use std::ops::Range;

use bej_format::constants::{DICTIONARY_ENTRY_SIZE, DICTIONARY_HEADER_SIZE};
use bej_format::{BejError, Result};

/// One dictionary entry with its child run converted to table indices
#[derive(Debug, Clone)]
pub struct DictEntry {
    /// Raw format byte; the high nibble is the expected principal format
    /// of values carrying this sequence
    pub format: u8,
    /// Sequence number within the parent's child list
    pub sequence: u16,
    child_start: usize,
    child_count: usize,
    /// Property name bytes, absent when the record had none or its name
    /// region reference was out of range
    pub name: Option<Vec<u8>>,
}

impl DictEntry {
    /// Expected principal format nibble for values carrying this sequence
    pub fn format_nibble(&self) -> u8 {
        (self.format >> 4) & 0x0F
    }

    /// Children of this entry as a half-open range of table indices
    pub fn children(&self) -> Range<usize> {
        self.child_start..self.child_start + self.child_count
    }
}

/// An immutable dictionary table, loaded once and shared by reference
/// for the duration of a decode.
#[derive(Debug)]
pub struct Dictionary {
    /// Dictionary format version tag
    pub version_tag: u8,
    /// Dictionary flags byte
    pub flags: u8,
    /// Version of the schema the dictionary was generated from
    pub schema_version: u32,
    entries: Vec<DictEntry>,
}

impl Dictionary {
    /// Parse a dictionary from its packed binary blob.
    ///
    /// Entry names are resolved eagerly so the blob can be dropped as
    /// soon as this returns. A name reference pointing outside the blob
    /// is not fatal; the entry simply keeps no name.
    pub fn parse(blob: &[u8]) -> Result<Self> {
        if blob.len() < DICTIONARY_HEADER_SIZE {
            return Err(BejError::CorruptDictionary(format!(
                "{}-byte blob is shorter than the {}-byte header",
                blob.len(),
                DICTIONARY_HEADER_SIZE
            )));
        }

        let version_tag = blob[0];
        let flags = blob[1];
        let entry_count = u16::from_le_bytes([blob[2], blob[3]]) as usize;
        let schema_version = u32::from_le_bytes([blob[4], blob[5], blob[6], blob[7]]);
        let dictionary_size = u32::from_le_bytes([blob[8], blob[9], blob[10], blob[11]]) as usize;

        if dictionary_size > blob.len() {
            return Err(BejError::CorruptDictionary(format!(
                "declared size {} exceeds blob length {}",
                dictionary_size,
                blob.len()
            )));
        }
        let blob = &blob[..dictionary_size];

        let entries_end = DICTIONARY_HEADER_SIZE + entry_count * DICTIONARY_ENTRY_SIZE;
        if entries_end > blob.len() {
            return Err(BejError::CorruptDictionary(format!(
                "{} entries overrun the {}-byte blob",
                entry_count,
                blob.len()
            )));
        }

        tracing::debug!(
            entry_count,
            dictionary_size,
            "dictionary header: version 0x{version_tag:02X}, flags 0x{flags:02X}, schema version 0x{schema_version:08X}"
        );

        let mut entries = Vec::with_capacity(entry_count);
        for i in 0..entry_count {
            let record =
                &blob[DICTIONARY_HEADER_SIZE + i * DICTIONARY_ENTRY_SIZE..][..DICTIONARY_ENTRY_SIZE];
            let format = record[0];
            let sequence = u16::from_le_bytes([record[1], record[2]]);
            let child_pointer_offset = u16::from_le_bytes([record[3], record[4]]) as usize;
            let child_count = u16::from_le_bytes([record[5], record[6]]) as usize;
            let name_length = record[7] as usize;
            let name_offset = u16::from_le_bytes([record[8], record[9]]) as usize;

            // The on-disk child pointer is an absolute byte offset to the
            // first child record; zero means no children.
            let child_start = if child_pointer_offset >= DICTIONARY_HEADER_SIZE {
                (child_pointer_offset - DICTIONARY_HEADER_SIZE) / DICTIONARY_ENTRY_SIZE
            } else {
                0
            };

            let name = if name_length > 0
                && name_length < 255
                && name_offset + name_length <= blob.len()
            {
                Some(blob[name_offset..name_offset + name_length].to_vec())
            } else {
                None
            };

            entries.push(DictEntry {
                format,
                sequence,
                child_start,
                child_count,
                name,
            });
        }

        Ok(Self {
            version_tag,
            flags,
            schema_version,
            entries,
        })
    }

    /// Resolve `(parent, sequence, expected_format)` to an entry.
    ///
    /// With no parent the whole table is searched; the dictionary root is
    /// a virtual parent owning every top-level entry. `expected_format`
    /// of `None` accepts any format, otherwise the entry's high nibble
    /// must match. Sibling runs are small, so a linear scan is fine.
    ///
    /// Returns `None` when nothing matches; a missing entry is not an
    /// error, it just costs the caller its property name.
    pub fn find(
        &self,
        parent: Option<&DictEntry>,
        sequence: u32,
        expected_format: Option<u8>,
    ) -> Option<&DictEntry> {
        let range = match parent {
            Some(parent) => {
                let start = parent.child_start.min(self.entries.len());
                let end = (parent.child_start + parent.child_count).min(self.entries.len());
                start..end
            }
            None => 0..self.entries.len(),
        };

        self.entries[range].iter().find(|entry| {
            entry.sequence as u32 == sequence
                && expected_format.map_or(true, |format| entry.format_nibble() == format)
        })
    }

    /// Entry at a table index
    pub fn entry(&self, index: usize) -> Option<&DictEntry> {
        self.entries.get(index)
    }

    /// Number of entries in the table
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the dictionary has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
