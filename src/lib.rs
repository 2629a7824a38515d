// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Vizcodec
//!
//! Visualization core for robotics middleware canvas streams.
//!
//! This library decodes and renders the binary canvas opcode format used to
//! ship 2D visualization data between robotics components, organized by
//! concern:
//! - **Stream codec** in [`stream`](crate::stream): opcode and number-type
//!   tags, a bounds-checked cursor, and a writer for producing streams
//! - **Canvas rendering** in [`canvas`](crate::canvas): Z-level extraction,
//!   the geometry interpreter, and bounds/raster surface implementations
//! - **Pixel decoding** in [`image`](crate::image): per-format blitters
//!   converting raw camera buffers to ARGB scanlines
//! - **Scan conversion** in [`scan`](crate::scan): distance/polar/cartesian
//!   sample sets with lazily derived point clouds and display bounds
//!
//! ## Example: Painting a stream
//!
//! ```rust,no_run
//! use vizcodec::canvas::{CanvasInterpreter, RasterSurface};
//! use vizcodec::image::ArgbBuffer;
//!
//! let stream: Vec<u8> = std::fs::read("scene.viz").unwrap();
//! let mut buffer = ArgbBuffer::new(640, 480);
//! let mut surface = RasterSurface::new(&mut buffer);
//! CanvasInterpreter::paint(&stream, &mut surface);
//! ```
//!
//! ## Example: Measuring drawn extent
//!
//! ```rust,no_run
//! use vizcodec::canvas::{BoundsSurface, CanvasInterpreter};
//!
//! let stream: Vec<u8> = std::fs::read("scene.viz").unwrap();
//! let mut surface = BoundsSurface::new();
//! CanvasInterpreter::paint(&stream, &mut surface);
//! println!("extent: {:?}", surface.bounds());
//! ```

// Core types
pub mod core;

// Re-export core types for convenience
pub use core::{Color, Point2, Rect, Result, Transform2, VizError};

// Opcode stream codec
pub mod stream;

// Canvas extraction and rendering
pub mod canvas;

// Pixel-format decoding
pub mod image;

// Distance-scan conversion
pub mod scan;
