//! Sequential byte sources over in-memory slices and `Read` streams

use std::io::{ErrorKind, Read};

use crate::error::{BejError, Result};

/// Sequential reader the decoder pulls wire bytes from.
///
/// Short reads are not an error at this layer; callers interpret them.
pub trait Source {
    /// Read up to `dest.len()` bytes into `dest`, returning the number
    /// actually read. Zero means end of input.
    fn read(&mut self, dest: &mut [u8]) -> Result<usize>;

    /// True when no further bytes are available
    fn eof(&self) -> bool;
}

/// Read exactly `dest.len()` bytes or fail with `UnexpectedEof`
pub fn read_exact<S: Source + ?Sized>(src: &mut S, dest: &mut [u8]) -> Result<()> {
    if src.read(dest)? != dest.len() {
        return Err(BejError::UnexpectedEof);
    }
    Ok(())
}

/// Byte source over a borrowed in-memory slice with an internal cursor.
///
/// Nested container decoding always runs over one of these, wrapped
/// around a slice of the parent tuple's payload.
#[derive(Debug)]
pub struct SliceSource<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> SliceSource<'a> {
    /// Wrap a slice with the cursor at the start
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Current cursor position in bytes
    pub fn position(&self) -> usize {
        self.position
    }
}

impl Source for SliceSource<'_> {
    fn read(&mut self, dest: &mut [u8]) -> Result<usize> {
        let available = self.data.len() - self.position;
        let to_read = dest.len().min(available);
        dest[..to_read].copy_from_slice(&self.data[self.position..self.position + to_read]);
        self.position += to_read;
        Ok(to_read)
    }

    fn eof(&self) -> bool {
        self.position >= self.data.len()
    }
}

/// Byte source over any `Read` implementation.
///
/// End of input is reported the way stdio does it: `eof` turns true once
/// a read comes up short, not before.
#[derive(Debug)]
pub struct StreamSource<R> {
    inner: R,
    hit_eof: bool,
}

impl<R: Read> StreamSource<R> {
    /// Wrap a reader
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            hit_eof: false,
        }
    }

    /// Consume the source and return the underlying reader
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Source for StreamSource<R> {
    fn read(&mut self, dest: &mut [u8]) -> Result<usize> {
        let mut filled = 0;
        while filled < dest.len() {
            match self.inner.read(&mut dest[filled..]) {
                Ok(0) => {
                    self.hit_eof = true;
                    break;
                }
                Ok(n) => filled += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(err.into()),
            }
        }
        Ok(filled)
    }

    fn eof(&self) -> bool {
        self.hit_eof
    }
}
