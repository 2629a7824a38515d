// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Canvas stream writer.
//!
//! Builds opcode streams consumable by the extraction and interpretation
//! passes. Geometry values are written in the writer's current number type
//! (default [`NumberType::Double`]); switching to a narrower integer type
//! produces the compact encodings the wire format is designed for.

use byteorder::{BigEndian, WriteBytesExt};

use crate::core::{Color, Point2, Rect, Transform2};
use crate::stream::number::NumberType;
use crate::stream::opcode::Opcode;

/// Default initial capacity for the writer buffer.
const DEFAULT_CAPACITY: usize = 64;

/// Writer producing a canvas opcode stream.
///
/// # Example
///
/// ```
/// use vizcodec::core::{Color, Point2};
/// use vizcodec::stream::CanvasWriter;
///
/// let mut w = CanvasWriter::new();
/// w.set_color(Color::new(255, 0, 0));
/// w.draw_line_segment(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0));
/// let stream = w.finish();
/// assert!(!stream.is_empty());
/// ```
pub struct CanvasWriter {
    /// Output buffer
    buffer: Vec<u8>,
    /// Wire type for geometry values
    number_type: NumberType,
}

impl Default for CanvasWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasWriter {
    /// Create a writer with the default value type (Double).
    pub fn new() -> Self {
        Self {
            buffer: Vec::with_capacity(DEFAULT_CAPACITY),
            number_type: NumberType::Double,
        }
    }

    /// Set the wire type used for subsequent geometry values.
    pub fn set_number_type(&mut self, ty: NumberType) {
        self.number_type = ty;
    }

    /// Consume the writer and return the encoded stream.
    pub fn finish(self) -> Vec<u8> {
        self.buffer
    }

    /// Bytes written so far.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Whether nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    fn op(&mut self, op: Opcode) {
        self.buffer.push(op as u8);
    }

    fn values(&mut self, vals: &[f64]) {
        let ty = self.number_type;
        self.buffer.push(ty as u8);
        for &v in vals {
            // Writes into a Vec cannot fail.
            match ty {
                NumberType::Float => self.buffer.write_f32::<BigEndian>(v as f32).unwrap(),
                NumberType::Double => self.buffer.write_f64::<BigEndian>(v).unwrap(),
                NumberType::Zeroes => {}
                NumberType::I8 => self.buffer.write_i8(v as i8).unwrap(),
                NumberType::U8 => self.buffer.write_u8(v as u8).unwrap(),
                NumberType::I16 => self.buffer.write_i16::<BigEndian>(v as i16).unwrap(),
                NumberType::U16 => self.buffer.write_u16::<BigEndian>(v as u16).unwrap(),
                NumberType::I32 => self.buffer.write_i32::<BigEndian>(v as i32).unwrap(),
                NumberType::U32 => self.buffer.write_u32::<BigEndian>(v as u32).unwrap(),
                NumberType::I64 => self.buffer.write_i64::<BigEndian>(v as i64).unwrap(),
                NumberType::U64 => self.buffer.write_u64::<BigEndian>(v as u64).unwrap(),
            }
        }
    }

    fn count(&mut self, n: usize) {
        debug_assert!(n <= u16::MAX as usize);
        self.buffer.write_u16::<BigEndian>(n as u16).unwrap();
    }

    fn points(&mut self, pts: &[Point2]) {
        let mut flat = Vec::with_capacity(pts.len() * 2);
        for p in pts {
            flat.push(p.x);
            flat.push(p.y);
        }
        self.values(&flat);
    }

    /// Replace the current transform.
    pub fn set_transform(&mut self, t: &Transform2) {
        self.op(Opcode::SetTransform);
        self.values(&[t.a, t.b, t.c, t.d, t.e, t.f]);
    }

    /// Concatenate a transform onto the current one.
    pub fn transform(&mut self, t: &Transform2) {
        self.op(Opcode::Transform);
        self.values(&[t.a, t.b, t.c, t.d, t.e, t.f]);
    }

    /// Concatenate a translation.
    pub fn translate(&mut self, tx: f64, ty: f64) {
        self.op(Opcode::Translate);
        self.values(&[tx, ty]);
    }

    /// Concatenate a rotation (radians).
    pub fn rotate(&mut self, radians: f64) {
        self.op(Opcode::Rotate);
        self.values(&[radians]);
    }

    /// Concatenate a scaling.
    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.op(Opcode::Scale);
        self.values(&[sx, sy]);
    }

    /// Reset the transform to identity.
    pub fn reset_transform(&mut self) {
        self.op(Opcode::ResetTransform);
    }

    /// Set both edge and fill color.
    pub fn set_color(&mut self, c: Color) {
        self.op(Opcode::SetColor);
        self.buffer.extend_from_slice(&[c.r, c.g, c.b]);
    }

    /// Set the edge color.
    pub fn set_edge_color(&mut self, c: Color) {
        self.op(Opcode::SetEdgeColor);
        self.buffer.extend_from_slice(&[c.r, c.g, c.b]);
    }

    /// Set the fill color.
    pub fn set_fill_color(&mut self, c: Color) {
        self.op(Opcode::SetFillColor);
        self.buffer.extend_from_slice(&[c.r, c.g, c.b]);
    }

    /// Enable or disable filling.
    pub fn set_fill(&mut self, fill: bool) {
        self.op(Opcode::SetFill);
        self.buffer.push(fill as u8);
    }

    /// Set the Z level for subsequent commands.
    pub fn set_z(&mut self, z: f64) {
        self.op(Opcode::SetZ);
        self.values(&[z]);
    }

    /// Draw a point.
    pub fn draw_point(&mut self, p: Point2) {
        self.op(Opcode::DrawPoint);
        self.points(&[p]);
    }

    /// Draw an infinite line through two points.
    pub fn draw_line(&mut self, p1: Point2, p2: Point2) {
        self.op(Opcode::DrawLine);
        self.points(&[p1, p2]);
    }

    /// Draw a line segment.
    pub fn draw_line_segment(&mut self, p1: Point2, p2: Point2) {
        self.op(Opcode::DrawLineSegment);
        self.points(&[p1, p2]);
    }

    /// Draw a polyline through the given points.
    pub fn draw_line_strip(&mut self, pts: &[Point2]) {
        self.op(Opcode::DrawLineStrip);
        self.count(pts.len());
        self.points(pts);
    }

    /// Draw an arrow from `from` to `to`; undirected arrows get a head at both ends.
    pub fn draw_arrow(&mut self, from: Point2, to: Point2, undirected: bool) {
        self.op(Opcode::DrawArrow);
        self.buffer.push(undirected as u8);
        self.points(&[from, to]);
    }

    /// Draw a rectangle.
    pub fn draw_box(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.op(Opcode::DrawBox);
        self.values(&[x, y, width, height]);
    }

    /// Draw an ellipse inscribed in the given bounding box.
    pub fn draw_ellipsoid(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.op(Opcode::DrawEllipsoid);
        self.values(&[x, y, width, height]);
    }

    /// Draw a closed polygon.
    pub fn draw_polygon(&mut self, pts: &[Point2]) {
        self.op(Opcode::DrawPolygon);
        self.count(pts.len());
        self.points(pts);
    }

    /// Draw a spline through the given points with the given tension.
    pub fn draw_spline(&mut self, pts: &[Point2], tension: f32) {
        self.op(Opcode::DrawSpline);
        self.count(pts.len());
        self.buffer.write_f32::<BigEndian>(tension).unwrap();
        self.points(pts);
    }

    /// Draw a cubic bezier curve with 4 control points.
    pub fn draw_cubic_bezier(&mut self, p0: Point2, p1: Point2, p2: Point2, p3: Point2) {
        self.op(Opcode::DrawCubicBezierCurve);
        self.points(&[p0, p1, p2, p3]);
    }

    /// Draw a text string anchored at `p`.
    pub fn draw_string(&mut self, p: Point2, text: &str) {
        self.op(Opcode::DrawString);
        self.points(&[p]);
        let bytes = text.as_bytes();
        debug_assert!(bytes.len() <= u16::MAX as usize);
        self.count(bytes.len());
        self.buffer.extend_from_slice(bytes);
    }

    /// Begin a custom path at `start`.
    pub fn path_start(&mut self, start: Point2, closed: bool) {
        self.op(Opcode::PathStart);
        self.buffer.push(closed as u8);
        self.points(&[start]);
    }

    /// Append a line to the current path.
    pub fn path_line(&mut self, to: Point2) {
        self.op(Opcode::PathLine);
        self.points(&[to]);
    }

    /// Append a quadratic bezier to the current path.
    pub fn path_quad_bezier(&mut self, ctrl: Point2, to: Point2) {
        self.op(Opcode::PathQuadBezier);
        self.points(&[ctrl, to]);
    }

    /// Append a cubic bezier to the current path.
    pub fn path_cubic_bezier(&mut self, ctrl1: Point2, ctrl2: Point2, to: Point2) {
        self.op(Opcode::PathCubicBezier);
        self.points(&[ctrl1, ctrl2, to]);
    }

    /// Embed a default-viewport hint.
    pub fn default_viewport(&mut self, viewport: Rect) {
        self.op(Opcode::DefaultViewport);
        self.values(&[viewport.x, viewport.y, viewport.width, viewport.height]);
    }
}
