// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Drawing surface abstraction.
//!
//! The interpreter flattens every opcode into a small capability set:
//! a transform update, a shape (open or closed outline with optional fill),
//! a text string, and an optional raw-pixel fast path. Geometry is handed
//! over in canvas (user) coordinates together with the current transform, so
//! surfaces decide how to rasterize or accumulate.

use crate::core::{Color, Point2, Rect, Transform2};
use crate::image::ArgbBuffer;

/// Target of one interpreter pass.
pub trait Surface {
    /// Update the current canvas-to-device transform.
    fn set_transform(&mut self, transform: &Transform2);

    /// Draw a shape given as a flattened outline in canvas coordinates.
    ///
    /// `stroke_width` is in canvas units (the interpreter pre-divides by the
    /// transform scale so strokes come out at constant device width).
    /// `fill` is `Some` for filled shapes; `closed` controls whether the
    /// outline wraps around.
    fn draw_shape(
        &mut self,
        outline: &[Point2],
        closed: bool,
        stroke: Color,
        fill: Option<Color>,
        stroke_width: f64,
    );

    /// Draw a text string anchored at a canvas point.
    fn draw_text(&mut self, position: Point2, text: &str, color: Color);

    /// Raw ARGB pixel access, if this surface renders into a pixel buffer.
    ///
    /// Surfaces returning `Some` enable the interpreter's direct-write fast
    /// paths (points, axis-aligned box fills).
    fn pixel_access(&mut self) -> Option<&mut ArgbBuffer> {
        None
    }

    /// The full canvas-to-device mapping, including any view transform the
    /// surface composes on top of [`set_transform`](Surface::set_transform).
    /// Only meaningful alongside [`pixel_access`](Surface::pixel_access).
    fn device_transform(&self) -> Transform2 {
        Transform2::IDENTITY
    }
}

/// A surface that accumulates device-space bounds instead of drawing.
///
/// Used for bounds queries: replaying a stream against this surface yields a
/// box containing everything a real surface would rasterize for the same
/// input.
#[derive(Debug)]
pub struct BoundsSurface {
    transform: Transform2,
    bounds: Rect,
    /// Half-pixel outset applied around every accounted point, so pixel
    /// rounding on a real raster surface stays inside the result.
    outset: f64,
}

impl BoundsSurface {
    pub fn new() -> Self {
        Self {
            transform: Transform2::IDENTITY,
            bounds: Rect::empty(),
            outset: 0.5,
        }
    }

    /// The accumulated device-space bounds.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    fn account(&mut self, p: Point2, pad: f64) {
        let d = self.transform.apply(p);
        let pad = pad + self.outset;
        self.bounds.extend(Point2::new(d.x - pad, d.y - pad));
        self.bounds.extend(Point2::new(d.x + pad, d.y + pad));
    }
}

impl Default for BoundsSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for BoundsSurface {
    fn set_transform(&mut self, transform: &Transform2) {
        self.transform = *transform;
    }

    fn draw_shape(
        &mut self,
        outline: &[Point2],
        _closed: bool,
        _stroke: Color,
        _fill: Option<Color>,
        stroke_width: f64,
    ) {
        let (sx, sy) = self.transform.scale_factors();
        let pad = stroke_width * 0.5 * sx.max(sy);
        for &p in outline {
            self.account(p, pad);
        }
    }

    fn draw_text(&mut self, position: Point2, _text: &str, _color: Color) {
        self.account(position, 0.0);
    }
}
