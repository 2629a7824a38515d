// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Byte cursor for reading canvas opcode streams.
//!
//! Canvas streams carry no alignment padding: every record is a tag byte
//! followed by operand bytes whose length is fully determined by the tag
//! (plus, for variable-length opcodes, a leading count and number-type tag).
//! All multi-byte scalars are big-endian.

use byteorder::{BigEndian, ByteOrder};

use crate::core::{Result, VizError};

/// Bounds-checked read cursor over an immutable opcode stream.
///
/// # Example
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use vizcodec::stream::StreamCursor;
///
/// let data = [0x00, 0x2A];
/// let mut cursor = StreamCursor::new(&data);
/// assert_eq!(cursor.read_u16()?, 42);
/// # Ok(())
/// # }
/// ```
pub struct StreamCursor<'a> {
    /// The stream buffer
    data: &'a [u8],
    /// Current read position
    offset: usize,
}

impl<'a> StreamCursor<'a> {
    /// Create a cursor positioned at the start of the buffer.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Get the current position relative to the buffer start.
    #[inline]
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Seek to an absolute position.
    ///
    /// Used to start replaying a render context at its recorded byte offset.
    pub fn seek(&mut self, position: usize) -> Result<()> {
        if position > self.data.len() {
            return Err(VizError::buffer_too_short(
                position - self.data.len(),
                0,
                self.data.len() as u64,
            ));
        }
        self.offset = position;
        Ok(())
    }

    /// Get the remaining bytes available to read.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    /// Check if at end of buffer.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.offset >= self.data.len()
    }

    fn ensure(&self, count: usize) -> Result<()> {
        if count > self.remaining() {
            return Err(VizError::buffer_too_short(
                count,
                self.remaining(),
                self.offset as u64,
            ));
        }
        Ok(())
    }

    /// Read a single byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        self.ensure(1)?;
        let value = self.data[self.offset];
        self.offset += 1;
        Ok(value)
    }

    /// Read a signed byte.
    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    /// Read a big-endian u16.
    pub fn read_u16(&mut self) -> Result<u16> {
        self.ensure(2)?;
        let value = BigEndian::read_u16(&self.data[self.offset..]);
        self.offset += 2;
        Ok(value)
    }

    /// Read a big-endian i16.
    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(self.read_u16()? as i16)
    }

    /// Read a big-endian u32.
    pub fn read_u32(&mut self) -> Result<u32> {
        self.ensure(4)?;
        let value = BigEndian::read_u32(&self.data[self.offset..]);
        self.offset += 4;
        Ok(value)
    }

    /// Read a big-endian i32.
    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(self.read_u32()? as i32)
    }

    /// Read a big-endian u64.
    pub fn read_u64(&mut self) -> Result<u64> {
        self.ensure(8)?;
        let value = BigEndian::read_u64(&self.data[self.offset..]);
        self.offset += 8;
        Ok(value)
    }

    /// Read a big-endian i64.
    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(self.read_u64()? as i64)
    }

    /// Read a big-endian f32.
    pub fn read_f32(&mut self) -> Result<f32> {
        self.ensure(4)?;
        let value = BigEndian::read_f32(&self.data[self.offset..]);
        self.offset += 4;
        Ok(value)
    }

    /// Read a big-endian f64.
    pub fn read_f64(&mut self) -> Result<f64> {
        self.ensure(8)?;
        let value = BigEndian::read_f64(&self.data[self.offset..]);
        self.offset += 8;
        Ok(value)
    }

    /// Read a byte slice.
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        self.ensure(count)?;
        let start = self.offset;
        self.offset += count;
        Ok(&self.data[start..self.offset])
    }

    /// Skip bytes without decoding.
    pub fn skip(&mut self, count: usize) -> Result<()> {
        self.ensure(count)?;
        self.offset += count;
        Ok(())
    }

    /// Peek at the next byte without advancing the position.
    pub fn peek(&self) -> Option<u8> {
        self.data.get(self.offset).copied()
    }
}
