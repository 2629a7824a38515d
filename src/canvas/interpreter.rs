// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Geometry interpretation.
//!
//! Replays a render context's opcodes against a [`Surface`]. The interpreter
//! owns the full drawing semantics: stroke widths that stay constant in
//! device pixels across zoom levels, arrow head construction, adaptive
//! bezier and spline flattening, custom path assembly, and the direct
//! pixel-buffer fast paths.
//!
//! Failure semantics: any decode error inside a pass abandons the remainder
//! of that pass with a warning. Contexts already painted, and the portion of
//! the failing pass drawn so far, stay on the surface.

use tracing::warn;

use crate::canvas::bezier;
use crate::canvas::context::{extract_contexts, DrawState, RenderContext, StreamIndex};
use crate::canvas::surface::Surface;
use crate::core::{Point2, Result, VizError};
use crate::stream::{read_values, Opcode, StreamCursor};

/// Stroke width in device pixels before zoom compensation.
const BASE_STROKE_WIDTH: f64 = 1.0;

/// Arrow head length in device pixels.
const ARROW_HEAD_SIZE: f64 = 8.0;

/// How far past its defining points an infinite line is extended, in canvas
/// units. Streams are expected to stay well inside this range.
const INFINITE_LINE_EXTENT: f64 = 1.0e4;

/// Replays canvas opcode streams against drawing surfaces.
pub struct CanvasInterpreter;

impl CanvasInterpreter {
    /// Extract render contexts and paint all of them in Z order.
    ///
    /// Returns the stream index so callers can reuse the contexts and the
    /// default-viewport hint.
    pub fn paint(stream: &[u8], surface: &mut dyn Surface) -> StreamIndex {
        let index = extract_contexts(stream);
        for ctx in &index.contexts {
            Self::paint_context(stream, ctx, surface);
        }
        index
    }

    /// Replay one render context against a surface.
    ///
    /// Paints at most `ctx.command_count` top-level commands; a decode error
    /// stops the pass early after logging a warning.
    pub fn paint_context(stream: &[u8], ctx: &RenderContext, surface: &mut dyn Surface) {
        let mut cursor = StreamCursor::new(stream);
        if let Err(e) = cursor.seek(ctx.offset) {
            warn!(error = %e, offset = ctx.offset, "render context offset out of range");
            return;
        }
        let mut state = DrawState::from_context(ctx);
        surface.set_transform(&state.transform);

        let mut values = Vec::new();
        let mut executed = 0usize;
        while executed < ctx.command_count && !cursor.is_at_end() {
            match step(&mut cursor, &mut state, surface, &mut values) {
                Ok(true) => executed += 1,
                Ok(false) => {}
                Err(e) => {
                    warn!(
                        error = %e,
                        z = ctx.z,
                        executed,
                        expected = ctx.command_count,
                        "abandoning render pass"
                    );
                    return;
                }
            }
        }
    }
}

/// Execute one opcode. Returns whether a top-level drawing command ran.
fn step(
    cursor: &mut StreamCursor<'_>,
    state: &mut DrawState,
    surface: &mut dyn Surface,
    values: &mut Vec<f64>,
) -> Result<bool> {
    let tag_pos = cursor.position() as u64;
    let op = Opcode::from_u8(cursor.read_u8()?, tag_pos)?;

    if state.apply(op, cursor)? {
        surface.set_transform(&state.transform);
        return Ok(false);
    }

    values.clear();
    match op {
        // Z changes and viewport hints were consumed by extraction; inside a
        // pass they only need their operands skipped.
        Opcode::SetZ => {
            read_values(cursor, 1, values)?;
            return Ok(false);
        }
        Opcode::DefaultViewport => {
            read_values(cursor, 4, values)?;
            return Ok(false);
        }
        Opcode::DrawPoint => {
            read_values(cursor, 2, values)?;
            let p = Point2::new(values[0], values[1]);
            draw_point(state, surface, p);
        }
        Opcode::DrawLine => {
            read_values(cursor, 4, values)?;
            draw_infinite_line(
                state,
                surface,
                Point2::new(values[0], values[1]),
                Point2::new(values[2], values[3]),
            );
        }
        Opcode::DrawLineSegment => {
            read_values(cursor, 4, values)?;
            let pts = [
                Point2::new(values[0], values[1]),
                Point2::new(values[2], values[3]),
            ];
            stroke(state, surface, &pts, false);
        }
        Opcode::DrawLineStrip => {
            let count = cursor.read_u16()? as usize;
            read_values(cursor, count * 2, values)?;
            let pts = to_points(values);
            stroke(state, surface, &pts, false);
        }
        Opcode::DrawArrow => {
            let undirected = cursor.read_u8()? != 0;
            read_values(cursor, 4, values)?;
            draw_arrow(
                state,
                surface,
                Point2::new(values[0], values[1]),
                Point2::new(values[2], values[3]),
                undirected,
            );
        }
        Opcode::DrawBox => {
            read_values(cursor, 4, values)?;
            draw_box(state, surface, values[0], values[1], values[2], values[3]);
        }
        Opcode::DrawEllipsoid => {
            read_values(cursor, 4, values)?;
            draw_ellipsoid(state, surface, values[0], values[1], values[2], values[3]);
        }
        Opcode::DrawPolygon => {
            let count = cursor.read_u16()? as usize;
            read_values(cursor, count * 2, values)?;
            let pts = to_points(values);
            shape(state, surface, &pts, true);
        }
        Opcode::DrawSpline => {
            let count = cursor.read_u16()? as usize;
            let tension = cursor.read_f32()? as f64;
            read_values(cursor, count * 2, values)?;
            let pts = to_points(values);
            draw_spline(state, surface, &pts, tension);
        }
        Opcode::DrawCubicBezierCurve => {
            read_values(cursor, 8, values)?;
            let ctrl = to_points(values);
            let mut flat = vec![ctrl[0]];
            bezier::flatten(&ctrl, flatten_threshold(state), &mut flat);
            stroke(state, surface, &flat, false);
        }
        Opcode::DrawString => {
            read_values(cursor, 2, values)?;
            let p = Point2::new(values[0], values[1]);
            let len = cursor.read_u16()? as usize;
            let text_pos = cursor.position() as u64;
            let bytes = cursor.read_bytes(len)?;
            let text = std::str::from_utf8(bytes)
                .map_err(|e| VizError::invalid_text(text_pos, e.to_string()))?;
            surface.draw_text(p, text, state.edge_color);
        }
        Opcode::PathStart => {
            draw_path(cursor, state, surface, values)?;
        }
        op if op.is_path_continuation() => {
            return Err(VizError::stray_path_opcode(op.name(), tag_pos));
        }
        op => {
            // state opcodes were consumed by `DrawState::apply`
            return Err(VizError::operand(op.name(), tag_pos, "unhandled opcode"));
        }
    }
    Ok(true)
}

fn to_points(values: &[f64]) -> Vec<Point2> {
    values
        .chunks_exact(2)
        .map(|c| Point2::new(c[0], c[1]))
        .collect()
}

/// Bezier subdivision threshold: stop once remaining deviation is below one
/// device pixel at the current zoom.
fn flatten_threshold(state: &DrawState) -> f64 {
    let (sx, sy) = state.transform.scale_factors();
    1.0 / (sx * sx + sy * sy).sqrt().max(1e-9)
}

/// Stroke width in canvas units that renders at constant device width.
fn stroke_width(state: &DrawState) -> f64 {
    let (sx, sy) = state.transform.scale_factors();
    BASE_STROKE_WIDTH / (sx * sx + sy * sy).sqrt().max(1e-9)
}

fn stroke(state: &DrawState, surface: &mut dyn Surface, pts: &[Point2], closed: bool) {
    surface.draw_shape(pts, closed, state.edge_color, None, stroke_width(state));
}

/// Outline with fill when the fill flag is on.
fn shape(state: &DrawState, surface: &mut dyn Surface, pts: &[Point2], closed: bool) {
    let fill = state.fill.then_some(state.fill_color);
    surface.draw_shape(pts, closed, state.edge_color, fill, stroke_width(state));
}

fn draw_point(state: &DrawState, surface: &mut dyn Surface, p: Point2) {
    // direct pixel write when a raw buffer is available
    let argb = state.edge_color.to_argb();
    let device = surface.device_transform().apply(p);
    if let Some(buffer) = surface.pixel_access() {
        buffer.set(device.x.round() as i64, device.y.round() as i64, argb);
        return;
    }
    stroke(state, surface, &[p], false);
}

fn draw_infinite_line(state: &DrawState, surface: &mut dyn Surface, p: Point2, q: Point2) {
    let dx = q.x - p.x;
    let dy = q.y - p.y;
    let len = (dx * dx + dy * dy).sqrt();
    if len == 0.0 {
        draw_point(state, surface, p);
        return;
    }
    let (ux, uy) = (dx / len, dy / len);
    let a = Point2::new(p.x - ux * INFINITE_LINE_EXTENT, p.y - uy * INFINITE_LINE_EXTENT);
    let b = Point2::new(q.x + ux * INFINITE_LINE_EXTENT, q.y + uy * INFINITE_LINE_EXTENT);
    stroke(state, surface, &[a, b], false);
}

fn draw_arrow(
    state: &DrawState,
    surface: &mut dyn Surface,
    from: Point2,
    to: Point2,
    undirected: bool,
) {
    stroke(state, surface, &[from, to], false);
    let angle = (to.y - from.y).atan2(to.x - from.x);
    draw_arrow_head(state, surface, to, angle);
    if undirected {
        draw_arrow_head(state, surface, from, angle + std::f64::consts::PI);
    }
}

/// Triangular head at `tip`, pointing along `angle`, scaled per axis so it
/// keeps its device-pixel size at any zoom.
fn draw_arrow_head(state: &DrawState, surface: &mut dyn Surface, tip: Point2, angle: f64) {
    let (sx, sy) = state.transform.scale_factors();
    let hx = ARROW_HEAD_SIZE / sx.max(1e-9);
    let hy = ARROW_HEAD_SIZE / sy.max(1e-9);
    let (sin, cos) = angle.sin_cos();
    let corner = |lx: f64, ly: f64| {
        Point2::new(
            tip.x + (lx * cos - ly * sin) * hx,
            tip.y + (lx * sin + ly * cos) * hy,
        )
    };
    let tri = [tip, corner(-1.0, 0.5), corner(-1.0, -0.5)];
    surface.draw_shape(
        &tri,
        true,
        state.edge_color,
        Some(state.edge_color),
        stroke_width(state),
    );
}

fn draw_box(
    state: &DrawState,
    surface: &mut dyn Surface,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
) {
    // Direct row fills when the box stays axis-aligned in device space and
    // edge and fill would paint the same color anyway. Rotated transforms
    // take the general path; the occasional double-drawn edge line between
    // the fill and the outline is accepted rather than generalized away.
    let device = surface.device_transform();
    if state.fill && state.edge_color == state.fill_color && device.is_axis_aligned() {
        if let Some(buffer) = surface.pixel_access() {
            let d0 = device.apply(Point2::new(x, y));
            let d1 = device.apply(Point2::new(x + width, y + height));
            let (x0, x1) = (d0.x.min(d1.x).round() as i64, d0.x.max(d1.x).round() as i64);
            let (y0, y1) = (d0.y.min(d1.y).round() as i64, d0.y.max(d1.y).round() as i64);
            let w = x1.saturating_sub(x0).saturating_add(1);
            let h = y1.saturating_sub(y0).saturating_add(1);
            buffer.fill_rect(x0, y0, w, h, state.fill_color.to_argb());
            return;
        }
    }
    let pts = [
        Point2::new(x, y),
        Point2::new(x + width, y),
        Point2::new(x + width, y + height),
        Point2::new(x, y + height),
    ];
    shape(state, surface, &pts, true);
}

fn draw_ellipsoid(
    state: &DrawState,
    surface: &mut dyn Surface,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
) {
    let rx = width * 0.5;
    let ry = height * 0.5;
    let cx = x + rx;
    let cy = y + ry;
    let (sx, sy) = state.transform.scale_factors();
    let device_radius = (rx * sx).max(ry * sy).abs();
    let segments = ((device_radius.sqrt() * 8.0).ceil() as usize).clamp(16, 256);
    let mut pts = Vec::with_capacity(segments);
    for i in 0..segments {
        let a = (i as f64 / segments as f64) * std::f64::consts::TAU;
        pts.push(Point2::new(cx + rx * a.cos(), cy + ry * a.sin()));
    }
    shape(state, surface, &pts, true);
}

/// Spline through the given points: Catmull-Rom segments converted to cubic
/// beziers with the wire-carried tension, flattened adaptively.
fn draw_spline(state: &DrawState, surface: &mut dyn Surface, pts: &[Point2], tension: f64) {
    if pts.len() < 2 {
        if let Some(&p) = pts.first() {
            draw_point(state, surface, p);
        }
        return;
    }
    let threshold = flatten_threshold(state);
    let mut flat = vec![pts[0]];
    for i in 0..pts.len() - 1 {
        let p0 = if i == 0 { pts[0] } else { pts[i - 1] };
        let p1 = pts[i];
        let p2 = pts[i + 1];
        let p3 = if i + 2 < pts.len() { pts[i + 2] } else { pts[i + 1] };
        let s = tension / 3.0;
        let ctrl = [
            p1,
            Point2::new(p1.x + (p2.x - p0.x) * s, p1.y + (p2.y - p0.y) * s),
            Point2::new(p2.x - (p3.x - p1.x) * s, p2.y - (p3.y - p1.y) * s),
            p2,
        ];
        bezier::flatten(&ctrl, threshold, &mut flat);
    }
    stroke(state, surface, &flat, false);
}

/// Assemble a custom path: consume continuation opcodes until a non-path
/// opcode (left unconsumed for the outer loop) or end of stream.
fn draw_path(
    cursor: &mut StreamCursor<'_>,
    state: &DrawState,
    surface: &mut dyn Surface,
    values: &mut Vec<f64>,
) -> Result<()> {
    let closed = cursor.read_u8()? != 0;
    values.clear();
    read_values(cursor, 2, values)?;
    let start = Point2::new(values[0], values[1]);
    let threshold = flatten_threshold(state);
    let mut pts = vec![start];
    let mut last = start;

    while let Some(tag) = cursor.peek() {
        let tag_pos = cursor.position() as u64;
        let op = match Opcode::from_u8(tag, tag_pos) {
            Ok(op) if op.is_path_continuation() => op,
            // not ours: re-dispatched by the outer loop
            _ => break,
        };
        cursor.skip(1)?;
        values.clear();
        match op {
            Opcode::PathLine => {
                read_values(cursor, 2, values)?;
                pts.push(Point2::new(values[0], values[1]));
            }
            Opcode::PathQuadBezier => {
                read_values(cursor, 4, values)?;
                let ctrl = [
                    last,
                    Point2::new(values[0], values[1]),
                    Point2::new(values[2], values[3]),
                ];
                bezier::flatten(&ctrl, threshold, &mut pts);
            }
            _ => {
                read_values(cursor, 6, values)?;
                let ctrl = [
                    last,
                    Point2::new(values[0], values[1]),
                    Point2::new(values[2], values[3]),
                    Point2::new(values[4], values[5]),
                ];
                bezier::flatten(&ctrl, threshold, &mut pts);
            }
        }
        if let Some(&p) = pts.last() {
            last = p;
        }
    }

    shape(state, surface, &pts, closed);
    Ok(())
}
