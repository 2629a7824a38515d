// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Small geometry value types shared across the crate.
//!
//! - [`Point2`] - 2D point in canvas units
//! - [`Rect`] - axis-aligned rectangle / accumulating bounds
//! - [`Color`] - RGB color with ARGB packing helpers
//! - [`Transform2`] - 2D affine transform (2x3 matrix)

use serde::Serialize;

/// A 2D point in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub fn new(x: f64, y: f64) -> Self {
        Point2 { x, y }
    }
}

/// An axis-aligned rectangle, also used as an accumulating bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    /// An empty bounds accumulator: extending it with any point yields that point.
    pub fn empty() -> Self {
        Rect {
            x: f64::INFINITY,
            y: f64::INFINITY,
            width: f64::NEG_INFINITY,
            height: f64::NEG_INFINITY,
        }
    }

    /// Whether no point has been accumulated yet.
    pub fn is_empty(&self) -> bool {
        self.width < 0.0 || self.height < 0.0
    }

    /// Extend the bounds to include a point.
    pub fn extend(&mut self, p: Point2) {
        if self.is_empty() {
            self.x = p.x;
            self.y = p.y;
            self.width = 0.0;
            self.height = 0.0;
            return;
        }
        if p.x < self.x {
            self.width += self.x - p.x;
            self.x = p.x;
        } else if p.x > self.x + self.width {
            self.width = p.x - self.x;
        }
        if p.y < self.y {
            self.height += self.y - p.y;
            self.y = p.y;
        } else if p.y > self.y + self.height {
            self.height = p.y - self.y;
        }
    }

    /// Check whether a point lies inside (inclusive of edges).
    pub fn contains(&self, p: Point2) -> bool {
        !self.is_empty()
            && p.x >= self.x
            && p.y >= self.y
            && p.x <= self.x + self.width
            && p.y <= self.y + self.height
    }
}

/// An RGB color. Alpha is implicit (0) in packed ARGB output, matching the
/// convention of decoded sensor data throughout the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// Pack into 0x00RRGGBB.
    pub fn to_argb(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    /// Unpack from 0x??RRGGBB (alpha ignored).
    pub fn from_argb(argb: u32) -> Self {
        Color {
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }
}

/// A 2D affine transform stored as the 2x3 matrix
///
/// ```text
/// | a  c  e |
/// | b  d  f |
/// ```
///
/// so that `x' = a*x + c*y + e` and `y' = b*x + d*y + f`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2 {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Transform2 {
    fn default() -> Self {
        Transform2::IDENTITY
    }
}

impl Transform2 {
    pub const IDENTITY: Transform2 = Transform2 {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Transform2 { a, b, c, d, e, f }
    }

    pub fn translation(tx: f64, ty: f64) -> Self {
        Transform2::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    pub fn rotation(radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        Transform2::new(cos, sin, -sin, cos, 0.0, 0.0)
    }

    pub fn scaling(sx: f64, sy: f64) -> Self {
        Transform2::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Apply the transform to a point.
    pub fn apply(&self, p: Point2) -> Point2 {
        Point2 {
            x: self.a * p.x + self.c * p.y + self.e,
            y: self.b * p.x + self.d * p.y + self.f,
        }
    }

    /// Concatenate another transform: the result applies `other` first,
    /// then `self` (matrix product `self * other`).
    pub fn concat(&self, other: &Transform2) -> Transform2 {
        Transform2 {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    pub fn translate(&mut self, tx: f64, ty: f64) {
        *self = self.concat(&Transform2::translation(tx, ty));
    }

    pub fn rotate(&mut self, radians: f64) {
        *self = self.concat(&Transform2::rotation(radians));
    }

    pub fn scale(&mut self, sx: f64, sy: f64) {
        *self = self.concat(&Transform2::scaling(sx, sy));
    }

    /// Per-axis scale factors from the matrix columns.
    ///
    /// Assumes the linear part contains no shear; with shear present the
    /// decomposition is only approximate.
    pub fn scale_factors(&self) -> (f64, f64) {
        let sx = (self.a * self.a + self.b * self.b).sqrt();
        let sy = (self.c * self.c + self.d * self.d).sqrt();
        (sx, sy)
    }

    /// Whether the transform maps axis-aligned rectangles to axis-aligned
    /// rectangles (no rotation or shear).
    pub fn is_axis_aligned(&self) -> bool {
        self.b == 0.0 && self.c == 0.0
    }
}
