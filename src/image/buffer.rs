// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! ARGB pixel buffer.
//!
//! The uniform output target of the pixel decoders and the raster surface:
//! a row-major `u32` buffer in `0xAARRGGBB` layout.

use crate::core::Color;

/// A width x height buffer of packed ARGB pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgbBuffer {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl ArgbBuffer {
    /// Create a buffer cleared to 0 (transparent black).
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The raw pixel data, row-major.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Mutable access to one row.
    pub fn row_mut(&mut self, y: usize) -> &mut [u32] {
        let start = y * self.width;
        &mut self.pixels[start..start + self.width]
    }

    /// Mutable access to the raw pixel data.
    pub fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.pixels
    }

    /// Read one pixel; out-of-bounds reads return 0.
    #[inline]
    pub fn get(&self, x: i64, y: i64) -> u32 {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return 0;
        }
        self.pixels[y as usize * self.width + x as usize]
    }

    /// Write one pixel; out-of-bounds writes are dropped.
    #[inline]
    pub fn set(&mut self, x: i64, y: i64, argb: u32) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        self.pixels[y as usize * self.width + x as usize] = argb;
    }

    /// Fill the whole buffer with one value.
    pub fn clear(&mut self, argb: u32) {
        self.pixels.fill(argb);
    }

    /// Fill a device-space rectangle with row fills, clipped to the buffer.
    pub fn fill_rect(&mut self, x: i64, y: i64, width: i64, height: i64, argb: u32) {
        if width <= 0 || height <= 0 {
            return;
        }
        let x0 = x.clamp(0, self.width as i64) as usize;
        let y0 = y.clamp(0, self.height as i64) as usize;
        let x1 = (x.saturating_add(width)).clamp(0, self.width as i64) as usize;
        let y1 = (y.saturating_add(height)).clamp(0, self.height as i64) as usize;
        if x0 >= x1 {
            return;
        }
        for row in y0..y1 {
            let start = row * self.width;
            self.pixels[start + x0..start + x1].fill(argb);
        }
    }

    /// Convert one pixel to a [`Color`], dropping alpha.
    pub fn color_at(&self, x: i64, y: i64) -> Color {
        Color::from_argb(self.get(x, y))
    }
}
