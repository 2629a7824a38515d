// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Software raster surface.
//!
//! Renders interpreter output into an [`ArgbBuffer`]: even-odd scanline
//! polygon fills and Bresenham strokes. Exposes raw pixel access so the
//! interpreter can take its direct-write fast paths. Text is not rasterized
//! here (glyph rendering belongs to the embedding toolkit); strings are
//! logged and skipped.

use tracing::debug;

use crate::canvas::surface::Surface;
use crate::core::{Color, Point2, Transform2};
use crate::image::ArgbBuffer;

/// Surface rendering into a raw ARGB buffer.
pub struct RasterSurface<'a> {
    buffer: &'a mut ArgbBuffer,
    /// Fixed device-space mapping composed on top of every stream transform,
    /// letting callers fit canvas coordinates to the buffer.
    view: Transform2,
    transform: Transform2,
}

impl<'a> RasterSurface<'a> {
    pub fn new(buffer: &'a mut ArgbBuffer) -> Self {
        Self::with_view(buffer, Transform2::IDENTITY)
    }

    pub fn with_view(buffer: &'a mut ArgbBuffer, view: Transform2) -> Self {
        Self {
            buffer,
            view,
            transform: view,
        }
    }

    fn device_points(&self, outline: &[Point2]) -> Vec<Point2> {
        outline.iter().map(|&p| self.transform.apply(p)).collect()
    }

    /// Stroke width in device pixels for a canvas-space width.
    fn device_width(&self, stroke_width: f64) -> f64 {
        let (sx, sy) = self.transform.scale_factors();
        let scale = ((sx * sx + sy * sy) * 0.5).sqrt();
        (stroke_width * scale).max(1.0)
    }

    fn stroke_segment(&mut self, from: Point2, to: Point2, argb: u32, width: f64) {
        let half = (((width - 1.0) * 0.5).round() as i64).max(0);
        // Clip to the buffer first so the walk below is bounded by the
        // buffer size, not by the device-coordinate magnitude.
        let pad = half as f64 + 1.0;
        let (from, to) = match clip_segment(
            from,
            to,
            -pad,
            -pad,
            self.buffer.width() as f64 - 1.0 + pad,
            self.buffer.height() as f64 - 1.0 + pad,
        ) {
            Some(seg) => seg,
            None => return,
        };
        let (x0, y0) = (from.x.round() as i64, from.y.round() as i64);
        let (x1, y1) = (to.x.round() as i64, to.y.round() as i64);

        // Bresenham; widths above one pixel stamp a square at each step
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let (mut x, mut y) = (x0, y0);
        let mut err = dx + dy;
        loop {
            if half == 0 {
                self.buffer.set(x, y, argb);
            } else {
                self.buffer
                    .fill_rect(x - half, y - half, 2 * half + 1, 2 * half + 1, argb);
            }
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Even-odd scanline fill of a device-space polygon.
    fn fill_device_polygon(&mut self, pts: &[Point2], argb: u32) {
        if pts.len() < 3 {
            return;
        }
        let y_min = pts.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        let y_max = pts.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
        let y0 = y_min.floor().max(0.0) as i64;
        let y1 = (y_max.ceil() as i64).min(self.buffer.height() as i64 - 1);

        let mut xs: Vec<f64> = Vec::new();
        for y in y0..=y1 {
            let scan = y as f64 + 0.5;
            xs.clear();
            for i in 0..pts.len() {
                let a = pts[i];
                let b = pts[(i + 1) % pts.len()];
                if (a.y <= scan && b.y > scan) || (b.y <= scan && a.y > scan) {
                    let t = (scan - a.y) / (b.y - a.y);
                    xs.push(a.x + t * (b.x - a.x));
                }
            }
            xs.sort_by(|a, b| a.total_cmp(b));
            for pair in xs.chunks_exact(2) {
                let x0 = pair[0].round() as i64;
                let x1 = pair[1].round() as i64;
                let span = x1.saturating_sub(x0).saturating_add(1);
                self.buffer.fill_rect(x0, y, span, 1, argb);
            }
        }
    }
}

impl Surface for RasterSurface<'_> {
    fn set_transform(&mut self, transform: &Transform2) {
        self.transform = self.view.concat(transform);
    }

    fn draw_shape(
        &mut self,
        outline: &[Point2],
        closed: bool,
        stroke: Color,
        fill: Option<Color>,
        stroke_width: f64,
    ) {
        if outline.is_empty() {
            return;
        }
        let pts = self.device_points(outline);
        if let Some(fill_color) = fill {
            self.fill_device_polygon(&pts, fill_color.to_argb());
        }
        let width = self.device_width(stroke_width);
        let argb = stroke.to_argb();
        if pts.len() == 1 {
            self.stroke_segment(pts[0], pts[0], argb, width);
            return;
        }
        for w in pts.windows(2) {
            self.stroke_segment(w[0], w[1], argb, width);
        }
        if closed && pts.len() > 2 {
            self.stroke_segment(pts[pts.len() - 1], pts[0], argb, width);
        }
    }

    fn draw_text(&mut self, position: Point2, text: &str, _color: Color) {
        // glyph rasterization is left to the embedding toolkit
        debug!(x = position.x, y = position.y, text, "skipping text on raster surface");
    }

    fn pixel_access(&mut self) -> Option<&mut ArgbBuffer> {
        Some(&mut *self.buffer)
    }

    fn device_transform(&self) -> Transform2 {
        self.transform
    }
}

/// Liang-Barsky clip of the segment `a`-`b` to the given rectangle.
///
/// Returns `None` when the segment misses the rectangle entirely or when an
/// endpoint is not finite.
fn clip_segment(
    a: Point2,
    b: Point2,
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
) -> Option<(Point2, Point2)> {
    if !(a.x.is_finite() && a.y.is_finite() && b.x.is_finite() && b.y.is_finite()) {
        return None;
    }
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let mut t0 = 0.0f64;
    let mut t1 = 1.0f64;
    for (p, q) in [
        (-dx, a.x - min_x),
        (dx, max_x - a.x),
        (-dy, a.y - min_y),
        (dy, max_y - a.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else {
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return None;
                }
                if r > t0 {
                    t0 = r;
                }
            } else {
                if r < t0 {
                    return None;
                }
                if r < t1 {
                    t1 = r;
                }
            }
        }
    }
    Some((
        Point2::new(a.x + t0 * dx, a.y + t0 * dy),
        Point2::new(a.x + t1 * dx, a.y + t1 * dy),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit_pixels(buf: &ArgbBuffer) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        for y in 0..buf.height() {
            for x in 0..buf.width() {
                if buf.get(x as i64, y as i64) != 0 {
                    out.push((x, y));
                }
            }
        }
        out
    }

    #[test]
    fn test_horizontal_stroke() {
        let mut buf = ArgbBuffer::new(8, 3);
        let mut s = RasterSurface::new(&mut buf);
        s.draw_shape(
            &[Point2::new(1.0, 1.0), Point2::new(6.0, 1.0)],
            false,
            Color::new(255, 0, 0),
            None,
            1.0,
        );
        for x in 1..=6 {
            assert_eq!(buf.get(x, 1), 0x00FF0000);
        }
        assert_eq!(buf.get(0, 1), 0);
        assert_eq!(buf.get(7, 1), 0);
    }

    #[test]
    fn test_diagonal_stroke_is_connected() {
        let mut buf = ArgbBuffer::new(10, 10);
        let mut s = RasterSurface::new(&mut buf);
        s.draw_shape(
            &[Point2::new(0.0, 0.0), Point2::new(9.0, 9.0)],
            false,
            Color::new(0, 255, 0),
            None,
            1.0,
        );
        for i in 0..10 {
            assert_eq!(buf.get(i, i), 0x0000FF00);
        }
    }

    #[test]
    fn test_filled_rectangle() {
        let mut buf = ArgbBuffer::new(10, 10);
        let mut s = RasterSurface::new(&mut buf);
        let rect = [
            Point2::new(2.0, 2.0),
            Point2::new(7.0, 2.0),
            Point2::new(7.0, 7.0),
            Point2::new(2.0, 7.0),
        ];
        s.draw_shape(&rect, true, Color::new(0, 0, 255), Some(Color::new(0, 0, 255)), 1.0);
        assert_eq!(buf.get(4, 4), 0x000000FF);
        assert_eq!(buf.get(2, 2), 0x000000FF);
        assert_eq!(buf.get(9, 9), 0);
    }

    #[test]
    fn test_transform_applies_to_geometry() {
        let mut buf = ArgbBuffer::new(10, 10);
        let mut s = RasterSurface::new(&mut buf);
        s.set_transform(&Transform2::translation(5.0, 5.0));
        s.draw_shape(
            &[Point2::new(0.0, 0.0)],
            false,
            Color::new(9, 9, 9),
            None,
            1.0,
        );
        assert_eq!(buf.get(5, 5), 0x00090909);
        assert_eq!(buf.get(0, 0), 0);
    }

    #[test]
    fn test_thick_stroke_covers_neighbors() {
        let mut buf = ArgbBuffer::new(9, 9);
        let mut s = RasterSurface::new(&mut buf);
        s.draw_shape(
            &[Point2::new(4.0, 4.0), Point2::new(4.0, 4.0)],
            false,
            Color::new(255, 255, 255),
            None,
            3.0,
        );
        assert_eq!(buf.get(4, 4), 0x00FFFFFF);
        assert_eq!(buf.get(3, 4), 0x00FFFFFF);
        assert_eq!(buf.get(4, 3), 0x00FFFFFF);
    }

    #[test]
    fn test_out_of_bounds_geometry_is_clipped() {
        let mut buf = ArgbBuffer::new(4, 4);
        let mut s = RasterSurface::new(&mut buf);
        s.draw_shape(
            &[Point2::new(-10.0, 2.0), Point2::new(10.0, 2.0)],
            false,
            Color::new(1, 1, 1),
            None,
            1.0,
        );
        let lit = lit_pixels(&buf);
        assert!(lit.iter().all(|&(_, y)| y == 2));
        assert_eq!(lit.len(), 4);
    }

    #[test]
    fn test_far_reaching_segment_paints_visible_run() {
        let mut buf = ArgbBuffer::new(8, 8);
        let mut s = RasterSurface::new(&mut buf);
        s.draw_shape(
            &[Point2::new(2.0, 3.0), Point2::new(1.0e9, 3.0)],
            false,
            Color::new(255, 0, 0),
            None,
            1.0,
        );
        for x in 2..8 {
            assert_eq!(buf.get(x, 3), 0x00FF0000);
        }
        assert_eq!(buf.get(1, 3), 0);
    }

    #[test]
    fn test_fully_offscreen_segment_is_noop() {
        let mut buf = ArgbBuffer::new(8, 8);
        let mut s = RasterSurface::new(&mut buf);
        s.draw_shape(
            &[Point2::new(100.0, -50.0), Point2::new(1.0e18, -50.0)],
            false,
            Color::new(255, 0, 0),
            None,
            1.0,
        );
        assert!(lit_pixels(&buf).is_empty());
    }

    #[test]
    fn test_non_finite_segment_is_noop() {
        let mut buf = ArgbBuffer::new(8, 8);
        let mut s = RasterSurface::new(&mut buf);
        s.draw_shape(
            &[Point2::new(f64::NAN, 0.0), Point2::new(4.0, f64::INFINITY)],
            false,
            Color::new(255, 0, 0),
            None,
            1.0,
        );
        assert!(lit_pixels(&buf).is_empty());
    }

    #[test]
    fn test_clip_segment_preserves_interior_portion() {
        let clipped = clip_segment(
            Point2::new(-4.0, 2.0),
            Point2::new(12.0, 2.0),
            0.0,
            0.0,
            7.0,
            7.0,
        );
        let (a, b) = clipped.unwrap();
        assert_eq!((a.x, a.y), (0.0, 2.0));
        assert_eq!((b.x, b.y), (7.0, 2.0));
    }

    #[test]
    fn test_triangle_fill_stays_inside() {
        let mut buf = ArgbBuffer::new(20, 20);
        let mut s = RasterSurface::new(&mut buf);
        let tri = [
            Point2::new(10.0, 2.0),
            Point2::new(18.0, 18.0),
            Point2::new(2.0, 18.0),
        ];
        s.draw_shape(&tri, true, Color::new(7, 7, 7), Some(Color::new(7, 7, 7)), 1.0);
        // interior lit, far corners dark
        assert_eq!(buf.get(10, 12), 0x00070707);
        assert_eq!(buf.get(0, 0), 0);
        assert_eq!(buf.get(19, 0), 0);
    }
}
