// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Canvas opcode tags.
//!
//! A canvas stream is a sequence of `(opcode tag, operand bytes)` records.
//! Operand layout per opcode is documented on each variant. Tag values are a
//! fixed, versioned wire contract; do not reorder.

use crate::core::{Result, VizError};
use crate::stream::cursor::StreamCursor;
use crate::stream::number::skip_values;

/// Canvas opcode tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    /// Replace the current transform: numtype + 6 values (a b c d e f)
    SetTransform = 0,
    /// Concatenate a transform: numtype + 6 values
    Transform = 1,
    /// Concatenate a translation: numtype + 2 values
    Translate = 2,
    /// Concatenate a rotation: numtype + 1 value (radians)
    Rotate = 3,
    /// Concatenate a scaling: numtype + 2 values
    Scale = 4,
    /// Reset the transform to identity: no operands
    ResetTransform = 5,
    /// Set edge and fill color: 3 raw bytes r g b
    SetColor = 6,
    /// Set edge color only: 3 raw bytes
    SetEdgeColor = 7,
    /// Set fill color only: 3 raw bytes
    SetFillColor = 8,
    /// Enable or disable filling: 1 byte bool
    SetFill = 9,
    /// Set the Z level: numtype + 1 value
    SetZ = 10,
    /// Draw a point: numtype + 2 values
    DrawPoint = 11,
    /// Draw an infinite line through two points: numtype + 4 values
    DrawLine = 12,
    /// Draw a line segment: numtype + 4 values
    DrawLineSegment = 13,
    /// Draw a polyline: count u16 + numtype + 2*count values
    DrawLineStrip = 14,
    /// Draw an arrow: flags u8 (bit0 undirected) + numtype + 4 values
    DrawArrow = 15,
    /// Draw a rectangle: numtype + 4 values (x y w h)
    DrawBox = 16,
    /// Draw an ellipse: numtype + 4 values (x y w h of bounding box)
    DrawEllipsoid = 17,
    /// Draw a polygon: count u16 + numtype + 2*count values
    DrawPolygon = 18,
    /// Draw a spline through points: count u16 + tension f32 + numtype + 2*count values
    DrawSpline = 19,
    /// Draw a cubic bezier curve: numtype + 8 values
    DrawCubicBezierCurve = 20,
    /// Draw a text string: numtype + 2 values + len u16 + UTF-8 bytes
    DrawString = 21,
    /// Begin a custom path: flags u8 (bit0 closed) + numtype + 2 values
    PathStart = 22,
    /// Path line-to: numtype + 2 values
    PathLine = 23,
    /// Path quadratic-bezier-to: numtype + 4 values
    PathQuadBezier = 24,
    /// Path cubic-bezier-to: numtype + 6 values
    PathCubicBezier = 25,
    /// Default viewport hint: numtype + 4 values (x y w h)
    DefaultViewport = 26,
}

impl Opcode {
    /// Decode a wire tag.
    pub fn from_u8(tag: u8, cursor_pos: u64) -> Result<Self> {
        Ok(match tag {
            0 => Opcode::SetTransform,
            1 => Opcode::Transform,
            2 => Opcode::Translate,
            3 => Opcode::Rotate,
            4 => Opcode::Scale,
            5 => Opcode::ResetTransform,
            6 => Opcode::SetColor,
            7 => Opcode::SetEdgeColor,
            8 => Opcode::SetFillColor,
            9 => Opcode::SetFill,
            10 => Opcode::SetZ,
            11 => Opcode::DrawPoint,
            12 => Opcode::DrawLine,
            13 => Opcode::DrawLineSegment,
            14 => Opcode::DrawLineStrip,
            15 => Opcode::DrawArrow,
            16 => Opcode::DrawBox,
            17 => Opcode::DrawEllipsoid,
            18 => Opcode::DrawPolygon,
            19 => Opcode::DrawSpline,
            20 => Opcode::DrawCubicBezierCurve,
            21 => Opcode::DrawString,
            22 => Opcode::PathStart,
            23 => Opcode::PathLine,
            24 => Opcode::PathQuadBezier,
            25 => Opcode::PathCubicBezier,
            26 => Opcode::DefaultViewport,
            _ => return Err(VizError::unknown_opcode(tag, cursor_pos)),
        })
    }

    /// Name used in error and log messages.
    pub fn name(self) -> &'static str {
        match self {
            Opcode::SetTransform => "SetTransform",
            Opcode::Transform => "Transform",
            Opcode::Translate => "Translate",
            Opcode::Rotate => "Rotate",
            Opcode::Scale => "Scale",
            Opcode::ResetTransform => "ResetTransform",
            Opcode::SetColor => "SetColor",
            Opcode::SetEdgeColor => "SetEdgeColor",
            Opcode::SetFillColor => "SetFillColor",
            Opcode::SetFill => "SetFill",
            Opcode::SetZ => "SetZ",
            Opcode::DrawPoint => "DrawPoint",
            Opcode::DrawLine => "DrawLine",
            Opcode::DrawLineSegment => "DrawLineSegment",
            Opcode::DrawLineStrip => "DrawLineStrip",
            Opcode::DrawArrow => "DrawArrow",
            Opcode::DrawBox => "DrawBox",
            Opcode::DrawEllipsoid => "DrawEllipsoid",
            Opcode::DrawPolygon => "DrawPolygon",
            Opcode::DrawSpline => "DrawSpline",
            Opcode::DrawCubicBezierCurve => "DrawCubicBezierCurve",
            Opcode::DrawString => "DrawString",
            Opcode::PathStart => "PathStart",
            Opcode::PathLine => "PathLine",
            Opcode::PathQuadBezier => "PathQuadBezier",
            Opcode::PathCubicBezier => "PathCubicBezier",
            Opcode::DefaultViewport => "DefaultViewport",
        }
    }

    /// Whether this opcode continues a custom path started by [`Opcode::PathStart`].
    ///
    /// Path continuations belong to their enclosing path op and do not count
    /// as top-level commands.
    pub fn is_path_continuation(self) -> bool {
        matches!(
            self,
            Opcode::PathLine | Opcode::PathQuadBezier | Opcode::PathCubicBezier
        )
    }

    /// Whether this opcode produces output (as opposed to updating drawing state).
    pub fn is_drawing(self) -> bool {
        matches!(
            self,
            Opcode::DrawPoint
                | Opcode::DrawLine
                | Opcode::DrawLineSegment
                | Opcode::DrawLineStrip
                | Opcode::DrawArrow
                | Opcode::DrawBox
                | Opcode::DrawEllipsoid
                | Opcode::DrawPolygon
                | Opcode::DrawSpline
                | Opcode::DrawCubicBezierCurve
                | Opcode::DrawString
                | Opcode::PathStart
        )
    }

    /// For fixed-arity opcodes whose operands are exactly `numtype + N values`,
    /// the value count N.
    fn fixed_value_count(self) -> Option<usize> {
        match self {
            Opcode::SetTransform | Opcode::Transform => Some(6),
            Opcode::Translate | Opcode::Scale => Some(2),
            Opcode::Rotate | Opcode::SetZ => Some(1),
            Opcode::DrawPoint | Opcode::PathLine => Some(2),
            Opcode::DrawLine
            | Opcode::DrawLineSegment
            | Opcode::DrawBox
            | Opcode::DrawEllipsoid
            | Opcode::DefaultViewport
            | Opcode::PathQuadBezier => Some(4),
            Opcode::PathCubicBezier => Some(6),
            Opcode::DrawCubicBezierCurve => Some(8),
            _ => None,
        }
    }
}

/// Skip the operands of `op` without decoding the geometry.
///
/// Advances the cursor to the next opcode tag. Shared by the Z-level
/// extraction pass and by consumers that only index a stream.
pub fn skip_operands(cursor: &mut StreamCursor<'_>, op: Opcode) -> Result<()> {
    if let Some(count) = op.fixed_value_count() {
        return skip_values(cursor, count);
    }
    match op {
        Opcode::ResetTransform => Ok(()),
        Opcode::SetColor | Opcode::SetEdgeColor | Opcode::SetFillColor => cursor.skip(3),
        Opcode::SetFill => cursor.skip(1),
        Opcode::DrawLineStrip | Opcode::DrawPolygon => {
            let count = cursor.read_u16()? as usize;
            skip_values(cursor, count * 2)
        }
        Opcode::DrawSpline => {
            let count = cursor.read_u16()? as usize;
            cursor.skip(4)?; // tension f32
            skip_values(cursor, count * 2)
        }
        Opcode::DrawArrow | Opcode::PathStart => {
            cursor.skip(1)?; // flags
            skip_values(cursor, if op == Opcode::DrawArrow { 4 } else { 2 })
        }
        Opcode::DrawString => {
            skip_values(cursor, 2)?;
            let len = cursor.read_u16()? as usize;
            cursor.skip(len)
        }
        // fixed-arity opcodes are handled above
        _ => unreachable!("opcode {} has a fixed value count", op.name()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::number::NumberType;

    #[test]
    fn test_tag_round_trip() {
        for tag in 0u8..=26 {
            let op = Opcode::from_u8(tag, 0).unwrap();
            assert_eq!(op as u8, tag, "tag {tag} must map back to itself");
        }
        assert!(Opcode::from_u8(27, 0).is_err());
        assert!(Opcode::from_u8(0xFF, 0).is_err());
    }

    #[test]
    fn test_path_continuation_classification() {
        assert!(Opcode::PathLine.is_path_continuation());
        assert!(Opcode::PathQuadBezier.is_path_continuation());
        assert!(Opcode::PathCubicBezier.is_path_continuation());
        assert!(!Opcode::PathStart.is_path_continuation());
        assert!(!Opcode::DrawLineSegment.is_path_continuation());
    }

    #[test]
    fn test_drawing_classification() {
        assert!(Opcode::DrawBox.is_drawing());
        assert!(Opcode::PathStart.is_drawing());
        assert!(!Opcode::SetZ.is_drawing());
        assert!(!Opcode::DefaultViewport.is_drawing());
        assert!(!Opcode::PathLine.is_drawing());
    }

    #[test]
    fn test_skip_fixed_arity() {
        // DrawBox: numtype(U8) + 4 one-byte values
        let data = [NumberType::U8 as u8, 1, 2, 3, 4, 0xAA];
        let mut cursor = StreamCursor::new(&data);
        skip_operands(&mut cursor, Opcode::DrawBox).unwrap();
        assert_eq!(cursor.position(), 5);
    }

    #[test]
    fn test_skip_polygon() {
        // count=2, numtype I16, 4 values of 2 bytes
        let data = [0, 2, NumberType::I16 as u8, 0, 1, 0, 2, 0, 3, 0, 4];
        let mut cursor = StreamCursor::new(&data);
        skip_operands(&mut cursor, Opcode::DrawPolygon).unwrap();
        assert!(cursor.is_at_end());
    }

    #[test]
    fn test_skip_string() {
        let mut data = vec![NumberType::Zeroes as u8]; // position (0,0), no payload
        data.extend_from_slice(&3u16.to_be_bytes());
        data.extend_from_slice(b"abc");
        let mut cursor = StreamCursor::new(&data);
        skip_operands(&mut cursor, Opcode::DrawString).unwrap();
        assert!(cursor.is_at_end());
    }

    #[test]
    fn test_skip_arrow_and_path_start() {
        let data = [1, NumberType::U8 as u8, 0, 0, 5, 5];
        let mut cursor = StreamCursor::new(&data);
        skip_operands(&mut cursor, Opcode::DrawArrow).unwrap();
        assert!(cursor.is_at_end());

        let data = [0, NumberType::U8 as u8, 7, 7];
        let mut cursor = StreamCursor::new(&data);
        skip_operands(&mut cursor, Opcode::PathStart).unwrap();
        assert!(cursor.is_at_end());
    }

    #[test]
    fn test_skip_no_operands() {
        let data = [0xFF];
        let mut cursor = StreamCursor::new(&data);
        skip_operands(&mut cursor, Opcode::ResetTransform).unwrap();
        assert_eq!(cursor.position(), 0);
    }
}
