//! Binary reader for bounds-checked parsing of byte slices.
//!
//! This module provides [`BinaryReader`], a cursor-like type that reads
//! little-endian binary data from a byte slice without copying.

use std::borrow::Cow;

use byteorder::{ByteOrder, LittleEndian};
use zerocopy::FromBytes;

use crate::{Error, Result};

/// A binary reader over a byte slice.
///
/// Every read checks `position + length <= len` before touching the buffer.
/// A failed read returns [`Error::OutOfBounds`] and leaves the position
/// where it was.
///
/// # Example
///
/// ```
/// use sspm_common::BinaryReader;
///
/// let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06];
/// let mut reader = BinaryReader::new(&data);
///
/// assert_eq!(reader.read_u32().unwrap(), 0x04030201);
/// assert_eq!(reader.read_u16().unwrap(), 0x0605);
/// assert!(reader.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct BinaryReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> BinaryReader<'a> {
    /// Create a new reader from a byte slice.
    #[inline]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Create a new reader starting at a specific position.
    #[inline]
    pub const fn new_at(data: &'a [u8], position: usize) -> Self {
        Self { data, position }
    }

    /// Get the current position in the buffer.
    #[inline]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Get the total length of the underlying buffer.
    #[inline]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Get the number of bytes remaining to read.
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Check if there are no more bytes to read.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.position >= self.data.len()
    }

    /// Seek to an absolute position.
    ///
    /// Seeking past the end is allowed; the next read will fail.
    #[inline]
    pub fn seek(&mut self, position: usize) {
        self.position = position;
    }

    /// Verify that `count` bytes can be read from the current position.
    #[inline]
    pub fn check_bounds(&self, count: usize) -> Result<()> {
        match self.position.checked_add(count) {
            Some(end) if end <= self.data.len() => Ok(()),
            _ => Err(Error::OutOfBounds {
                offset: self.position,
                length: count,
                buffer_len: self.data.len(),
            }),
        }
    }

    /// Peek at bytes without advancing the position.
    #[inline]
    pub fn peek_bytes(&self, count: usize) -> Result<&'a [u8]> {
        self.check_bounds(count)?;
        Ok(&self.data[self.position..self.position + count])
    }

    /// Read bytes and advance the position.
    #[inline]
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        let bytes = self.peek_bytes(count)?;
        self.position += count;
        Ok(bytes)
    }

    /// Read a single byte.
    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        self.read_bytes(1).map(|b| b[0])
    }

    /// Read a signed byte.
    #[inline]
    pub fn read_i8(&mut self) -> Result<i8> {
        self.read_u8().map(|b| b as i8)
    }

    /// Read a little-endian u16.
    #[inline]
    pub fn read_u16(&mut self) -> Result<u16> {
        self.read_bytes(2).map(LittleEndian::read_u16)
    }

    /// Read a little-endian u32.
    #[inline]
    pub fn read_u32(&mut self) -> Result<u32> {
        self.read_bytes(4).map(LittleEndian::read_u32)
    }

    /// Read a little-endian u64 as two u32 halves, `low + high * 2^32`.
    #[inline]
    pub fn read_u64(&mut self) -> Result<u64> {
        let bytes = self.read_bytes(8)?;
        let low = u64::from(LittleEndian::read_u32(&bytes[..4]));
        let high = u64::from(LittleEndian::read_u32(&bytes[4..]));
        Ok(low + high * (1 << 32))
    }

    /// Read a little-endian f32.
    #[inline]
    pub fn read_f32(&mut self) -> Result<f32> {
        self.read_bytes(4).map(LittleEndian::read_f32)
    }

    /// Read a little-endian f64.
    #[inline]
    pub fn read_f64(&mut self) -> Result<f64> {
        self.read_bytes(8).map(LittleEndian::read_f64)
    }

    /// Read a string with a u16 length prefix.
    ///
    /// Invalid UTF-8 sequences are replaced with `U+FFFD`.
    pub fn read_string(&mut self) -> Result<Cow<'a, str>> {
        let start = self.position;
        let length = self.read_u16()? as usize;
        self.read_text(start, length)
    }

    /// Read a string with a u32 length prefix.
    pub fn read_long_string(&mut self) -> Result<Cow<'a, str>> {
        let start = self.position;
        let length = self.read_u32()? as usize;
        self.read_text(start, length)
    }

    fn read_text(&mut self, start: usize, length: usize) -> Result<Cow<'a, str>> {
        match self.read_bytes(length) {
            Ok(bytes) => Ok(String::from_utf8_lossy(bytes)),
            Err(e) => {
                // Undo the length prefix so the failed read leaves no trace.
                self.position = start;
                Err(e)
            }
        }
    }

    /// Read a fixed-layout struct using zerocopy.
    #[inline]
    pub fn read_struct<T: FromBytes>(&mut self) -> Result<T> {
        let size = std::mem::size_of::<T>();
        let offset = self.position;
        let bytes = self.peek_bytes(size)?;
        let value = T::read_from_bytes(bytes).map_err(|_| Error::OutOfBounds {
            offset,
            length: size,
            buffer_len: self.data.len(),
        })?;
        self.position += size;
        Ok(value)
    }
}
