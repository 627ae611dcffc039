//! Pull-based character sources.
//!
//! A [`CharSource`] supplies UTF-16 code units on demand into a caller
//! provided slice and signals the end of input by returning `0`. Read failures
//! surface as [`DecompoundError::Io`](crate::error::DecompoundError::Io) and
//! are never retried by the consumers in this crate.
//!
//! # Examples
//!
//! ```
//! use decompound::analysis::char_source::{CharSource, Utf16Source};
//!
//! let mut source = Utf16Source::from("abc");
//! let mut buf = [0u16; 8];
//! assert_eq!(source.read(&mut buf).unwrap(), 3);
//! assert_eq!(source.read(&mut buf).unwrap(), 0);
//! ```

use std::collections::VecDeque;
use std::io::{self, BufRead};

use crate::error::Result;

/// A supplier of UTF-16 code units.
pub trait CharSource {
    /// Read up to `buf.len()` units into `buf`.
    ///
    /// Returns the number of units written; `0` means the source is
    /// exhausted (or `buf` is empty). A short read does not imply exhaustion.
    fn read(&mut self, buf: &mut [u16]) -> Result<usize>;
}

impl<S: CharSource + ?Sized> CharSource for &mut S {
    fn read(&mut self, buf: &mut [u16]) -> Result<usize> {
        (**self).read(buf)
    }
}

impl<S: CharSource + ?Sized> CharSource for Box<S> {
    fn read(&mut self, buf: &mut [u16]) -> Result<usize> {
        (**self).read(buf)
    }
}

/// Read from `source` until `dest` is full or the source is exhausted.
///
/// Returns the number of units read.
pub fn read_fully<S: CharSource + ?Sized>(source: &mut S, dest: &mut [u16]) -> Result<usize> {
    let mut read = 0;
    while read < dest.len() {
        let n = source.read(&mut dest[read..])?;
        if n == 0 {
            break;
        }
        read += n;
    }
    Ok(read)
}

/// Drain `source` into a string.
///
/// Fails with an `InvalidData` I/O error when the units are not valid UTF-16.
pub fn read_to_string<S: CharSource + ?Sized>(source: &mut S) -> Result<String> {
    let mut units = Vec::new();
    let mut chunk = [0u16; 4096];
    loop {
        let n = source.read(&mut chunk)?;
        if n == 0 {
            break;
        }
        units.extend_from_slice(&chunk[..n]);
    }
    String::from_utf16(&units)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
}

/// An in-memory source over a sequence of UTF-16 units.
///
/// Built from a `&str`, or from raw units when lone surrogates need to be
/// represented.
#[derive(Clone, Debug, Default)]
pub struct Utf16Source {
    units: Vec<u16>,
    position: usize,
    max_read: Option<usize>,
}

impl Utf16Source {
    /// Create a source over raw UTF-16 units.
    pub fn from_units(units: Vec<u16>) -> Self {
        Utf16Source {
            units,
            position: 0,
            max_read: None,
        }
    }

    /// Limit every read to at most `max_read` units.
    ///
    /// Emulates sources that trickle data, such as sockets or pipes.
    pub fn with_max_read(mut self, max_read: usize) -> Self {
        self.max_read = Some(max_read.max(1));
        self
    }

    /// Number of units not yet read.
    pub fn remaining(&self) -> usize {
        self.units.len() - self.position
    }
}

impl From<&str> for Utf16Source {
    fn from(text: &str) -> Self {
        Utf16Source::from_units(text.encode_utf16().collect())
    }
}

impl From<String> for Utf16Source {
    fn from(text: String) -> Self {
        Utf16Source::from(text.as_str())
    }
}

impl CharSource for Utf16Source {
    fn read(&mut self, buf: &mut [u16]) -> Result<usize> {
        let mut n = buf.len().min(self.remaining());
        if let Some(max_read) = self.max_read {
            n = n.min(max_read);
        }
        buf[..n].copy_from_slice(&self.units[self.position..self.position + n]);
        self.position += n;
        Ok(n)
    }
}

/// A source decoding UTF-8 bytes from a [`BufRead`] incrementally.
///
/// Only one chunk of the underlying reader is decoded at a time, so memory
/// use is bounded by the reader's buffer. Malformed UTF-8 is reported as an
/// [`io::ErrorKind::InvalidData`] error.
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: R,
    pending: VecDeque<u16>,
    partial: Vec<u8>,
    eof: bool,
}

impl<R: BufRead> ReaderSource<R> {
    /// Wrap a buffered reader.
    pub fn new(reader: R) -> Self {
        ReaderSource {
            reader,
            pending: VecDeque::new(),
            partial: Vec::with_capacity(4),
            eof: false,
        }
    }

    /// Consume the source and return the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Decode the next chunk of the reader into `pending`.
    fn decode_chunk(&mut self) -> io::Result<()> {
        let chunk = self.reader.fill_buf()?;
        if chunk.is_empty() {
            self.eof = true;
            if !self.partial.is_empty() {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    "stream ended inside a UTF-8 sequence",
                ));
            }
            return Ok(());
        }

        let consumed = chunk.len();
        let mut bytes = std::mem::take(&mut self.partial);
        bytes.extend_from_slice(chunk);
        self.reader.consume(consumed);

        let valid_up_to = match std::str::from_utf8(&bytes) {
            Ok(_) => bytes.len(),
            Err(e) if e.error_len().is_none() => e.valid_up_to(),
            Err(e) => {
                return Err(io::Error::new(io::ErrorKind::InvalidData, e));
            }
        };

        // valid_up_to marks a char boundary, so this cannot fail
        let text = std::str::from_utf8(&bytes[..valid_up_to])
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.pending.extend(text.encode_utf16());
        self.partial.extend_from_slice(&bytes[valid_up_to..]);
        Ok(())
    }
}

impl<R: BufRead> CharSource for ReaderSource<R> {
    fn read(&mut self, buf: &mut [u16]) -> Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        while self.pending.is_empty() && !self.eof {
            self.decode_chunk()?;
        }

        let n = buf.len().min(self.pending.len());
        for (slot, unit) in buf.iter_mut().zip(self.pending.drain(..n)) {
            *slot = unit;
        }
        Ok(n)
    }
}
