// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Z-level extraction.
//!
//! A single forward pass over an opcode stream that partitions it into
//! render contexts, one per distinct Z value. The pass tracks the running
//! transform/color/fill state so each context can snapshot it, counts the
//! drawing commands belonging to each context, and skips all drawing
//! geometry without decoding it. Contexts are sorted by Z ascending before
//! use: higher Z paints later, on top.

use serde::Serialize;
use tracing::warn;

use crate::core::{Color, Rect, Result, Transform2};
use crate::stream::{read_values, skip_operands, Opcode, StreamCursor};

/// One Z-ordered render pass over a sub-range of an opcode stream.
///
/// Contexts are immutable after extraction and re-created from scratch
/// whenever the owning buffer changes.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderContext {
    /// Z value of this pass; ascending paint order
    pub z: f64,
    /// Byte offset where this pass's commands begin
    pub offset: usize,
    /// Number of top-level opcodes in this pass (path continuations count
    /// as part of their enclosing path op)
    pub command_count: usize,
    /// Transform snapshot at the context's creation point
    pub transform: Transform2,
    /// Edge color snapshot
    pub edge_color: Color,
    /// Fill color snapshot
    pub fill_color: Color,
    /// Fill-enabled snapshot
    pub fill: bool,
}

/// Result of one extraction pass.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamIndex {
    /// Render contexts, sorted by Z ascending (ties keep encounter order)
    pub contexts: Vec<RenderContext>,
    /// Embedded default-viewport hint, if the stream carries one
    pub default_viewport: Option<Rect>,
}

/// Summary of one context for tool output.
#[derive(Debug, Clone, Serialize)]
pub struct ContextSummary {
    pub z: f64,
    pub offset: usize,
    pub command_count: usize,
}

impl StreamIndex {
    /// Per-context summaries in paint order.
    pub fn summaries(&self) -> Vec<ContextSummary> {
        self.contexts
            .iter()
            .map(|c| ContextSummary {
                z: c.z,
                offset: c.offset,
                command_count: c.command_count,
            })
            .collect()
    }
}

/// Transform/color/fill state, tracked by the extraction pass and replayed
/// by the interpreter.
#[derive(Debug, Clone)]
pub(crate) struct DrawState {
    pub transform: Transform2,
    pub edge_color: Color,
    pub fill_color: Color,
    pub fill: bool,
}

impl DrawState {
    pub fn initial() -> Self {
        Self {
            transform: Transform2::IDENTITY,
            edge_color: Color::BLACK,
            fill_color: Color::BLACK,
            fill: false,
        }
    }

    pub fn from_context(ctx: &RenderContext) -> Self {
        Self {
            transform: ctx.transform,
            edge_color: ctx.edge_color,
            fill_color: ctx.fill_color,
            fill: ctx.fill,
        }
    }

    fn snapshot(&self, z: f64, offset: usize) -> RenderContext {
        RenderContext {
            z,
            offset,
            command_count: 0,
            transform: self.transform,
            edge_color: self.edge_color,
            fill_color: self.fill_color,
            fill: self.fill,
        }
    }

    /// Apply a transform/color/fill opcode, consuming its operands.
    ///
    /// Returns `false` without consuming anything if `op` is not one of the
    /// plain state opcodes (`SetZ` and `DefaultViewport` are handled by the
    /// caller, since their meaning differs between passes).
    pub fn apply(&mut self, op: Opcode, cursor: &mut StreamCursor<'_>) -> Result<bool> {
        match op {
            Opcode::SetTransform => {
                let v = read_n(cursor, 6)?;
                self.transform = Transform2::new(v[0], v[1], v[2], v[3], v[4], v[5]);
            }
            Opcode::Transform => {
                let v = read_n(cursor, 6)?;
                let t = Transform2::new(v[0], v[1], v[2], v[3], v[4], v[5]);
                self.transform = self.transform.concat(&t);
            }
            Opcode::Translate => {
                let v = read_n(cursor, 2)?;
                self.transform.translate(v[0], v[1]);
            }
            Opcode::Rotate => {
                let v = read_n(cursor, 1)?;
                self.transform.rotate(v[0]);
            }
            Opcode::Scale => {
                let v = read_n(cursor, 2)?;
                self.transform.scale(v[0], v[1]);
            }
            Opcode::ResetTransform => {
                self.transform = Transform2::IDENTITY;
            }
            Opcode::SetColor => {
                let c = read_color(cursor)?;
                self.edge_color = c;
                self.fill_color = c;
            }
            Opcode::SetEdgeColor => {
                self.edge_color = read_color(cursor)?;
            }
            Opcode::SetFillColor => {
                self.fill_color = read_color(cursor)?;
            }
            Opcode::SetFill => {
                self.fill = cursor.read_u8()? != 0;
            }
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// Partition a stream into Z-ordered render contexts.
///
/// Never fails: a decode error abandons the rest of the stream with a
/// warning, keeping the contexts built so far. An empty stream yields
/// exactly one context (Z=0, no commands) so callers can assume the list is
/// never empty.
pub fn extract_contexts(stream: &[u8]) -> StreamIndex {
    let mut cursor = StreamCursor::new(stream);
    let mut state = DrawState::initial();
    let mut contexts = vec![state.snapshot(0.0, 0)];
    let mut current = 0usize;
    let mut default_viewport = None;

    while !cursor.is_at_end() {
        if let Err(e) = extract_step(
            &mut cursor,
            &mut state,
            &mut contexts,
            &mut current,
            &mut default_viewport,
        ) {
            let truncated = stream.len() - cursor.position();
            warn!(
                error = %e,
                position = cursor.position(),
                truncated_bytes = truncated,
                "abandoning z-level extraction"
            );
            break;
        }
    }

    // ascending paint order; stable, so equal Z keeps encounter order
    contexts.sort_by(|a, b| a.z.total_cmp(&b.z));
    StreamIndex {
        contexts,
        default_viewport,
    }
}

fn extract_step(
    cursor: &mut StreamCursor<'_>,
    state: &mut DrawState,
    contexts: &mut Vec<RenderContext>,
    current: &mut usize,
    default_viewport: &mut Option<Rect>,
) -> Result<()> {
    let tag_pos = cursor.position() as u64;
    let op = Opcode::from_u8(cursor.read_u8()?, tag_pos)?;
    if state.apply(op, cursor)? {
        return Ok(());
    }
    match op {
        Opcode::SetZ => {
            let v = read_n(cursor, 1)?;
            let z = v[0];
            if z != contexts[*current].z {
                contexts.push(state.snapshot(z, cursor.position()));
                *current = contexts.len() - 1;
            }
        }
        Opcode::DefaultViewport => {
            let v = read_n(cursor, 4)?;
            *default_viewport = Some(Rect::new(v[0], v[1], v[2], v[3]));
        }
        op if op.is_path_continuation() => {
            // belongs to its enclosing path op, no count increment
            skip_operands(cursor, op)?;
        }
        op => {
            debug_assert!(op.is_drawing());
            skip_operands(cursor, op)?;
            contexts[*current].command_count += 1;
        }
    }
    Ok(())
}

fn read_n(cursor: &mut StreamCursor<'_>, count: usize) -> Result<Vec<f64>> {
    let mut out = Vec::with_capacity(count);
    read_values(cursor, count, &mut out)?;
    Ok(out)
}

fn read_color(cursor: &mut StreamCursor<'_>) -> Result<Color> {
    let bytes = cursor.read_bytes(3)?;
    Ok(Color::new(bytes[0], bytes[1], bytes[2]))
}
