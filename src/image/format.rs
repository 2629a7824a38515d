// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Raw camera pixel formats.
//!
//! A closed enumeration of the sensor formats the blitters understand. Each
//! format implies a fixed bytes-per-pixel (or, for planar formats, a
//! subsampling layout derived from the image dimensions). Tag values are a
//! fixed wire contract; do not reorder.

use crate::core::{Result, VizError};

/// Pixel format of a raw image buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PixelFormat {
    /// 8-bit grayscale
    Mono8 = 0,
    /// 16-bit grayscale, little-endian; display uses the high byte
    Mono16 = 1,
    /// 32-bit float grayscale, little-endian; normalized per line for display
    Mono32Float = 2,
    /// 16-bit 5/6/5 RGB, little-endian
    Rgb565 = 3,
    /// 24-bit RGB, byte order r g b
    Rgb24 = 4,
    /// 24-bit BGR, byte order b g r
    Bgr24 = 5,
    /// 32-bit RGB, byte order r g b pad
    Rgb32 = 6,
    /// 32-bit BGR, byte order b g r pad
    Bgr32 = 7,
    /// Packed YUV, 3 bytes per pixel y u v
    Yuv444 = 8,
    /// Packed YUV 4:2:2, YUYV macropixels
    Yuv422 = 9,
    /// Planar YUV 4:2:0: full Y plane, then quarter-size U and V planes
    Yuv420P = 10,
    /// Planar luma with interleaved V/U chroma pairs (Android camera layout)
    Nv21 = 11,
    /// Bayer RGGB mosaic; recognized but not demosaiced (renders black)
    BayerRggb8 = 12,
}

impl PixelFormat {
    /// Decode a wire tag.
    pub fn from_u8(tag: u8) -> Result<Self> {
        Ok(match tag {
            0 => PixelFormat::Mono8,
            1 => PixelFormat::Mono16,
            2 => PixelFormat::Mono32Float,
            3 => PixelFormat::Rgb565,
            4 => PixelFormat::Rgb24,
            5 => PixelFormat::Bgr24,
            6 => PixelFormat::Rgb32,
            7 => PixelFormat::Bgr32,
            8 => PixelFormat::Yuv444,
            9 => PixelFormat::Yuv422,
            10 => PixelFormat::Yuv420P,
            11 => PixelFormat::Nv21,
            12 => PixelFormat::BayerRggb8,
            _ => {
                return Err(VizError::unsupported(format!(
                    "unknown pixel format tag: {tag}"
                )))
            }
        })
    }

    /// Name used in logs and CLI output.
    pub fn as_str(self) -> &'static str {
        match self {
            PixelFormat::Mono8 => "mono8",
            PixelFormat::Mono16 => "mono16",
            PixelFormat::Mono32Float => "mono32f",
            PixelFormat::Rgb565 => "rgb565",
            PixelFormat::Rgb24 => "rgb24",
            PixelFormat::Bgr24 => "bgr24",
            PixelFormat::Rgb32 => "rgb32",
            PixelFormat::Bgr32 => "bgr32",
            PixelFormat::Yuv444 => "yuv444",
            PixelFormat::Yuv422 => "yuv422",
            PixelFormat::Yuv420P => "yuv420p",
            PixelFormat::Nv21 => "nv21",
            PixelFormat::BayerRggb8 => "bayer-rggb8",
        }
    }

    /// Bytes per pixel for packed formats; `None` for planar layouts.
    pub fn bytes_per_pixel(self) -> Option<usize> {
        match self {
            PixelFormat::Mono8 | PixelFormat::BayerRggb8 => Some(1),
            PixelFormat::Mono16 | PixelFormat::Rgb565 | PixelFormat::Yuv422 => Some(2),
            PixelFormat::Rgb24 | PixelFormat::Bgr24 | PixelFormat::Yuv444 => Some(3),
            PixelFormat::Rgb32 | PixelFormat::Bgr32 | PixelFormat::Mono32Float => Some(4),
            PixelFormat::Yuv420P | PixelFormat::Nv21 => None,
        }
    }

    /// Total buffer size in bytes for an image of the given dimensions.
    pub fn buffer_size(self, width: usize, height: usize) -> usize {
        match self.bytes_per_pixel() {
            Some(bpp) => width * height * bpp,
            // full luma plane + two half-resolution chroma planes
            None => width * height + 2 * (width / 2) * (height / 2),
        }
    }
}

/// Error returned when parsing a `PixelFormat` from string fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsePixelFormatError {
    _private: (),
}

impl std::fmt::Display for ParsePixelFormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid pixel format name")
    }
}

impl std::error::Error for ParsePixelFormatError {}

impl std::str::FromStr for PixelFormat {
    type Err = ParsePixelFormatError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mono8" => Ok(PixelFormat::Mono8),
            "mono16" => Ok(PixelFormat::Mono16),
            "mono32f" => Ok(PixelFormat::Mono32Float),
            "rgb565" => Ok(PixelFormat::Rgb565),
            "rgb24" => Ok(PixelFormat::Rgb24),
            "bgr24" => Ok(PixelFormat::Bgr24),
            "rgb32" => Ok(PixelFormat::Rgb32),
            "bgr32" => Ok(PixelFormat::Bgr32),
            "yuv444" => Ok(PixelFormat::Yuv444),
            "yuv422" => Ok(PixelFormat::Yuv422),
            "yuv420p" => Ok(PixelFormat::Yuv420P),
            "nv21" => Ok(PixelFormat::Nv21),
            "bayer-rggb8" => Ok(PixelFormat::BayerRggb8),
            _ => Err(ParsePixelFormatError { _private: () }),
        }
    }
}
