// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Number-type tags for compact value vectors.
//!
//! Geometry operands are encoded as a single number-type tag followed by the
//! values in that type. Integer-valued geometry is transmitted in the
//! narrowest integer type that holds it; the reader widens everything to f64.
//! Unsigned tags zero-extend before widening, signed tags sign-extend.
//! [`NumberType::Zeroes`] carries no bytes at all and decodes to 0.0.

use crate::core::{Result, VizError};
use crate::stream::cursor::StreamCursor;

/// Tag identifying the wire type of a value vector.
///
/// The discriminants are a fixed wire contract; do not reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum NumberType {
    /// IEEE-754 binary32
    Float = 0,
    /// IEEE-754 binary64
    Double = 1,
    /// No payload; every value decodes to 0.0
    Zeroes = 2,
    /// Signed 8-bit
    I8 = 3,
    /// Unsigned 8-bit
    U8 = 4,
    /// Signed 16-bit
    I16 = 5,
    /// Unsigned 16-bit
    U16 = 6,
    /// Signed 32-bit
    I32 = 7,
    /// Unsigned 32-bit
    U32 = 8,
    /// Signed 64-bit
    I64 = 9,
    /// Unsigned 64-bit
    U64 = 10,
}

impl NumberType {
    /// Decode a wire tag.
    pub fn from_u8(tag: u8, cursor_pos: u64) -> Result<Self> {
        match tag {
            0 => Ok(NumberType::Float),
            1 => Ok(NumberType::Double),
            2 => Ok(NumberType::Zeroes),
            3 => Ok(NumberType::I8),
            4 => Ok(NumberType::U8),
            5 => Ok(NumberType::I16),
            6 => Ok(NumberType::U16),
            7 => Ok(NumberType::I32),
            8 => Ok(NumberType::U32),
            9 => Ok(NumberType::I64),
            10 => Ok(NumberType::U64),
            _ => Err(VizError::unknown_number_type(tag, cursor_pos)),
        }
    }

    /// Bytes occupied by one value of this type on the wire.
    pub fn byte_len(self) -> usize {
        match self {
            NumberType::Zeroes => 0,
            NumberType::I8 | NumberType::U8 => 1,
            NumberType::I16 | NumberType::U16 => 2,
            NumberType::Float | NumberType::I32 | NumberType::U32 => 4,
            NumberType::Double | NumberType::I64 | NumberType::U64 => 8,
        }
    }

    /// Read one value of this type, widened to f64.
    pub fn read_value(self, cursor: &mut StreamCursor<'_>) -> Result<f64> {
        Ok(match self {
            NumberType::Float => cursor.read_f32()? as f64,
            NumberType::Double => cursor.read_f64()?,
            NumberType::Zeroes => 0.0,
            NumberType::I8 => cursor.read_i8()? as f64,
            NumberType::U8 => cursor.read_u8()? as f64,
            NumberType::I16 => cursor.read_i16()? as f64,
            NumberType::U16 => cursor.read_u16()? as f64,
            NumberType::I32 => cursor.read_i32()? as f64,
            NumberType::U32 => cursor.read_u32()? as f64,
            NumberType::I64 => cursor.read_i64()? as f64,
            NumberType::U64 => cursor.read_u64()? as f64,
        })
    }
}

/// Read a number-type tag and `count` values of that type, appending the
/// widened f64 values to `out`.
pub fn read_values(cursor: &mut StreamCursor<'_>, count: usize, out: &mut Vec<f64>) -> Result<()> {
    let tag_pos = cursor.position() as u64;
    let ty = NumberType::from_u8(cursor.read_u8()?, tag_pos)?;
    out.reserve(count);
    for _ in 0..count {
        out.push(ty.read_value(cursor)?);
    }
    Ok(())
}

/// Read a number-type tag and advance past `count` values without decoding.
///
/// Used when an opcode's geometry is irrelevant to the current pass, e.g.
/// during Z-level extraction where only offsets and counts matter.
pub fn skip_values(cursor: &mut StreamCursor<'_>, count: usize) -> Result<()> {
    let tag_pos = cursor.position() as u64;
    let ty = NumberType::from_u8(cursor.read_u8()?, tag_pos)?;
    cursor.skip(count * ty.byte_len())
}
