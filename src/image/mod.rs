// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Raw image decoding.
//!
//! This module converts raw camera buffers into uniform ARGB pixels:
//! - [`format`] - the closed pixel-format enumeration
//! - [`blit`] - per-format line decoders
//! - [`buffer`] - the ARGB output buffer
//!
//! # Example
//!
//! ```
//! use vizcodec::image::{ArgbBuffer, Blitter, PixelFormat};
//!
//! let raw = [10u8, 20, 30]; // one rgb24 pixel
//! let blitter = Blitter::new(PixelFormat::Rgb24, 1, 1);
//! let mut out = ArgbBuffer::new(1, 1);
//! blitter.decode_line(out.pixels_mut(), 0, &raw, 0, 0, 1);
//! assert_eq!(out.get(0, 0), 0x000A141E);
//! ```

pub mod blit;
pub mod buffer;
pub mod format;

pub use blit::Blitter;
pub use buffer::ArgbBuffer;
pub use format::PixelFormat;
