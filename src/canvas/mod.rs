// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Canvas stream rendering.
//!
//! A canvas stream is replayed in two stages: [`extract_contexts`] makes a
//! single pass to partition the stream into per-Z [`RenderContext`]s, then
//! [`CanvasInterpreter`] replays each context in ascending Z order against a
//! [`Surface`]. [`BoundsSurface`] computes the drawn extent without
//! rasterizing; [`RasterSurface`] paints into an ARGB pixel buffer.

pub mod bezier;
pub mod context;
pub mod interpreter;
pub mod raster;
pub mod surface;

pub use context::{extract_contexts, ContextSummary, RenderContext, StreamIndex};
pub use interpreter::CanvasInterpreter;
pub use raster::RasterSurface;
pub use surface::{BoundsSurface, Surface};
