// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Per-format line blitters.
//!
//! A [`Blitter`] decodes a horizontal run of raw sensor bytes into packed
//! ARGB values (alpha 0). Decoding never fails: unrecognized or
//! recognized-but-unimplemented formats produce black output with a warning,
//! and reads past the end of a short source buffer yield zero bytes.
//!
//! YUV conversion uses the BT.601 integer approximation:
//! `r = y + (v*1436)>>10`, `g = y - (u*352 + v*731)>>10`, `b = y + (u*1814)>>10`
//! with chroma centered at 128 and all channels clamped to [0, 255].

use tracing::warn;

use crate::image::format::PixelFormat;

/// Read a source byte, treating out-of-bounds as 0.
#[inline]
fn byte(src: &[u8], index: usize) -> u8 {
    src.get(index).copied().unwrap_or(0)
}

/// Read a little-endian u16 from the source.
#[inline]
fn u16_le(src: &[u8], index: usize) -> u16 {
    byte(src, index) as u16 | ((byte(src, index + 1) as u16) << 8)
}

/// Pack r/g/b into 0x00RRGGBB.
#[inline]
fn pack(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

/// Integer BT.601 YUV to packed ARGB.
#[inline]
fn yuv_to_argb(y: u8, u: u8, v: u8) -> u32 {
    let y = y as i32;
    let u = u as i32 - 128;
    let v = v as i32 - 128;
    let r = y + ((v * 1436) >> 10);
    let g = y - ((u * 352 + v * 731) >> 10);
    let b = y + ((u * 1814) >> 10);
    pack(
        r.clamp(0, 255) as u8,
        g.clamp(0, 255) as u8,
        b.clamp(0, 255) as u8,
    )
}

/// Line decoder for one image buffer.
///
/// The blitter is bound to a format and the image dimensions; planar chroma
/// plane offsets are derived from the dimensions at construction. Changing
/// the format of an image invalidates its blitter, which must be recreated.
#[derive(Debug, Clone)]
pub struct Blitter {
    format: PixelFormat,
    /// Image width in pixels (also the luma plane row stride)
    width: usize,
    /// Byte offset of the first chroma plane for planar formats
    chroma_offset: usize,
    /// Chroma plane row stride in samples for planar formats
    chroma_stride: usize,
    /// Length of one quarter-size chroma plane in bytes
    chroma_plane_len: usize,
}

impl Blitter {
    /// Create a blitter for the given format and image dimensions.
    pub fn new(format: PixelFormat, width: usize, height: usize) -> Self {
        if format == PixelFormat::BayerRggb8 {
            warn!(format = format.as_str(), "pixel format recognized but not implemented, output will be black");
        }
        let chroma_offset = width * height;
        let chroma_stride = width / 2;
        let chroma_plane_len = (width / 2) * (height / 2);
        Self {
            format,
            width,
            chroma_offset,
            chroma_stride,
            chroma_plane_len,
        }
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Decode `width` pixels of one line into `dest` starting at `dest_offset`.
    ///
    /// - `src_x`: starting pixel column within the line
    /// - `line_offset`: byte offset of the line start within `src` (for
    ///   planar formats: the offset of the line's luma row)
    pub fn decode_line(
        &self,
        dest: &mut [u32],
        dest_offset: usize,
        src: &[u8],
        src_x: usize,
        line_offset: usize,
        width: usize,
    ) {
        let out = match dest.get_mut(dest_offset..dest_offset + width) {
            Some(out) => out,
            None => {
                warn!(
                    dest_offset,
                    width,
                    dest_len = dest.len(),
                    "destination run exceeds buffer, dropping line"
                );
                return;
            }
        };
        match self.format {
            PixelFormat::Mono8 => decode_mono8(out, src, line_offset + src_x),
            PixelFormat::Mono16 => decode_mono16(out, src, line_offset + src_x * 2),
            PixelFormat::Mono32Float => {
                decode_mono32f(out, src, src_x, line_offset, self.width);
            }
            PixelFormat::Rgb565 => decode_rgb565(out, src, line_offset + src_x * 2),
            PixelFormat::Rgb24 => decode_rgb24(out, src, line_offset + src_x * 3, false),
            PixelFormat::Bgr24 => decode_rgb24(out, src, line_offset + src_x * 3, true),
            PixelFormat::Rgb32 => decode_rgb32(out, src, line_offset + src_x * 4, false),
            PixelFormat::Bgr32 => decode_rgb32(out, src, line_offset + src_x * 4, true),
            PixelFormat::Yuv444 => decode_yuv444(out, src, line_offset + src_x * 3),
            PixelFormat::Yuv422 => decode_yuv422(out, src, src_x, line_offset),
            PixelFormat::Yuv420P | PixelFormat::Nv21 => {
                let interleaved = self.format == PixelFormat::Nv21;
                self.decode_planar(out, src, src_x, line_offset, interleaved);
            }
            PixelFormat::BayerRggb8 => out.fill(0),
        }
    }

    /// Planar 4:2:0 decode. `Yuv420P` stores separate quarter-size U and V
    /// planes after the luma plane; `Nv21` stores a single half-height plane
    /// of interleaved V/U byte pairs. Chroma selection is otherwise identical.
    fn decode_planar(
        &self,
        out: &mut [u32],
        src: &[u8],
        src_x: usize,
        line_offset: usize,
        interleaved: bool,
    ) {
        let row = if self.width > 0 {
            line_offset / self.width
        } else {
            0
        };
        let chroma_row = row / 2;
        for (i, px) in out.iter_mut().enumerate() {
            let x = src_x + i;
            let y = byte(src, line_offset + x);
            let (u, v) = if interleaved {
                // row stride of the VU plane equals the luma width
                let base = self.chroma_offset + chroma_row * self.width + (x / 2) * 2;
                (byte(src, base + 1), byte(src, base))
            } else {
                let idx = chroma_row * self.chroma_stride + x / 2;
                let u_plane = self.chroma_offset;
                let v_plane = self.chroma_offset + self.chroma_plane_len;
                (byte(src, u_plane + idx), byte(src, v_plane + idx))
            };
            *px = yuv_to_argb(y, u, v);
        }
    }
}

fn decode_mono8(out: &mut [u32], src: &[u8], start: usize) {
    for (i, px) in out.iter_mut().enumerate() {
        let v = byte(src, start + i);
        *px = pack(v, v, v);
    }
}

fn decode_mono16(out: &mut [u32], src: &[u8], start: usize) {
    for (i, px) in out.iter_mut().enumerate() {
        // little-endian sample, display the high byte
        let v = (u16_le(src, start + i * 2) >> 8) as u8;
        *px = pack(v, v, v);
    }
}

/// Mono 32-bit float: normalize against the maximum of this line.
///
/// Normalization is per line, not global. Lines with differing ranges will
/// flicker relative to each other; this matches the long-standing behavior
/// of the original display code and must not be changed silently.
fn decode_mono32f(out: &mut [u32], src: &[u8], src_x: usize, line_offset: usize, line_width: usize) {
    let sample = |x: usize| -> f32 {
        let i = line_offset + x * 4;
        f32::from_le_bytes([
            byte(src, i),
            byte(src, i + 1),
            byte(src, i + 2),
            byte(src, i + 3),
        ])
    };
    let mut max = 0.0f32;
    for x in 0..line_width {
        let v = sample(x);
        if v.is_finite() && v > max {
            max = v;
        }
    }
    if max <= 0.0 {
        out.fill(0);
        return;
    }
    let divisor = max / 255.0;
    for (i, px) in out.iter_mut().enumerate() {
        let v = sample(src_x + i);
        let scaled = if v.is_finite() { v / divisor } else { 0.0 };
        let g = scaled.clamp(0.0, 255.0) as u8;
        *px = pack(g, g, g);
    }
}

fn decode_rgb565(out: &mut [u32], src: &[u8], start: usize) {
    for (i, px) in out.iter_mut().enumerate() {
        let v = u16_le(src, start + i * 2);
        // zero-pad 5/6/5 channels up to 8 bits
        let r = (((v >> 11) & 0x1F) as u8) << 3;
        let g = (((v >> 5) & 0x3F) as u8) << 2;
        let b = ((v & 0x1F) as u8) << 3;
        *px = pack(r, g, b);
    }
}

fn decode_rgb24(out: &mut [u32], src: &[u8], start: usize, bgr: bool) {
    for (i, px) in out.iter_mut().enumerate() {
        let base = start + i * 3;
        let (c0, c1, c2) = (byte(src, base), byte(src, base + 1), byte(src, base + 2));
        *px = if bgr {
            pack(c2, c1, c0)
        } else {
            pack(c0, c1, c2)
        };
    }
}

fn decode_rgb32(out: &mut [u32], src: &[u8], start: usize, bgr: bool) {
    for (i, px) in out.iter_mut().enumerate() {
        // one padding byte per pixel after the channels
        let base = start + i * 4;
        let (c0, c1, c2) = (byte(src, base), byte(src, base + 1), byte(src, base + 2));
        *px = if bgr {
            pack(c2, c1, c0)
        } else {
            pack(c0, c1, c2)
        };
    }
}

fn decode_yuv444(out: &mut [u32], src: &[u8], start: usize) {
    for (i, px) in out.iter_mut().enumerate() {
        let base = start + i * 3;
        *px = yuv_to_argb(byte(src, base), byte(src, base + 1), byte(src, base + 2));
    }
}

/// Packed 4:2:2 in YUYV order: two luma samples share one U/V pair.
/// Runs starting or ending on an odd column address the second luma byte of
/// their macropixel.
fn decode_yuv422(out: &mut [u32], src: &[u8], src_x: usize, line_offset: usize) {
    for (i, px) in out.iter_mut().enumerate() {
        let x = src_x + i;
        let base = line_offset + (x / 2) * 4;
        let y = byte(src, base + if x % 2 == 1 { 2 } else { 0 });
        let u = byte(src, base + 1);
        let v = byte(src, base + 3);
        *px = yuv_to_argb(y, u, v);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_one(format: PixelFormat, width: usize, height: usize, src: &[u8]) -> u32 {
        let blitter = Blitter::new(format, width, height);
        let mut dest = [0u32; 1];
        blitter.decode_line(&mut dest, 0, src, 0, 0, 1);
        dest[0]
    }

    #[test]
    fn test_rgb24_single_pixel() {
        assert_eq!(decode_one(PixelFormat::Rgb24, 1, 1, &[10, 20, 30]), 0x000A141E);
    }

    #[test]
    fn test_bgr24_single_pixel() {
        assert_eq!(decode_one(PixelFormat::Bgr24, 1, 1, &[30, 20, 10]), 0x000A141E);
    }

    #[test]
    fn test_rgb32_skips_padding() {
        let src = [10, 20, 30, 0xEE, 40, 50, 60, 0xEE];
        let blitter = Blitter::new(PixelFormat::Rgb32, 2, 1);
        let mut dest = [0u32; 2];
        blitter.decode_line(&mut dest, 0, &src, 0, 0, 2);
        assert_eq!(dest, [0x000A141E, 0x0028323C]);
    }

    #[test]
    fn test_mono8() {
        assert_eq!(decode_one(PixelFormat::Mono8, 1, 1, &[0x7F]), 0x007F7F7F);
    }

    #[test]
    fn test_mono16_takes_high_byte() {
        // little-endian 0xAB12 -> high byte 0xAB
        assert_eq!(decode_one(PixelFormat::Mono16, 1, 1, &[0x12, 0xAB]), 0x00ABABAB);
    }

    #[test]
    fn test_rgb565_pure_red() {
        // R=31 G=0 B=0 -> 0xF800, little-endian bytes [0x00, 0xF8]
        assert_eq!(decode_one(PixelFormat::Rgb565, 1, 1, &[0x00, 0xF8]), 0x00F80000);
    }

    #[test]
    fn test_rgb565_pure_green() {
        // G=63 -> 0x07E0, little-endian bytes [0xE0, 0x07]
        assert_eq!(decode_one(PixelFormat::Rgb565, 1, 1, &[0xE0, 0x07]), 0x0000FC00);
    }

    #[test]
    fn test_yuv444_white() {
        // BT.601 white: y=235 u=v=128 decodes to near (255,255,255)
        let argb = decode_one(PixelFormat::Yuv444, 1, 1, &[235, 128, 128]);
        let r = (argb >> 16) & 0xFF;
        let g = (argb >> 8) & 0xFF;
        let b = argb & 0xFF;
        for c in [r, g, b] {
            assert!(c >= 230, "channel {c} should be near white");
        }
        assert_eq!(r, g);
        assert_eq!(g, b);
    }

    #[test]
    fn test_yuv422_shares_chroma() {
        // YUYV macropixel: two luma values, one chroma pair
        let src = [100, 128, 200, 128];
        let blitter = Blitter::new(PixelFormat::Yuv422, 2, 1);
        let mut dest = [0u32; 2];
        blitter.decode_line(&mut dest, 0, &src, 0, 0, 2);
        // neutral chroma means grayscale output of each luma
        assert_eq!(dest[0], 0x00646464);
        assert_eq!(dest[1], 0x00C8C8C8);
    }

    #[test]
    fn test_yuv422_odd_start_column() {
        let src = [100, 128, 200, 128];
        let blitter = Blitter::new(PixelFormat::Yuv422, 2, 1);
        let mut dest = [0u32; 1];
        blitter.decode_line(&mut dest, 0, &src, 1, 0, 1);
        assert_eq!(dest[0], 0x00C8C8C8);
    }

    #[test]
    fn test_yuv420p_neutral_chroma() {
        // 2x2 image: luma plane [10, 20, 30, 40], U plane [128], V plane [128]
        let src = [10, 20, 30, 40, 128, 128];
        let blitter = Blitter::new(PixelFormat::Yuv420P, 2, 2);
        let mut dest = [0u32; 2];
        blitter.decode_line(&mut dest, 0, &src, 0, 0, 2);
        assert_eq!(dest, [0x000A0A0A, 0x00141414]);
        // second row shares the same chroma sample
        blitter.decode_line(&mut dest, 0, &src, 0, 2, 2);
        assert_eq!(dest, [0x001E1E1E, 0x00282828]);
    }

    #[test]
    fn test_nv21_neutral_chroma() {
        // 2x2 image: luma plane then one interleaved V/U pair
        let src = [10, 20, 30, 40, 128, 128];
        let blitter = Blitter::new(PixelFormat::Nv21, 2, 2);
        let mut dest = [0u32; 2];
        blitter.decode_line(&mut dest, 0, &src, 0, 0, 2);
        assert_eq!(dest, [0x000A0A0A, 0x00141414]);
    }

    #[test]
    fn test_mono32f_per_line_normalization() {
        // line of [1.0, 2.0]: max 2.0 -> divisor 2/255, values scale to 127, 255
        let mut src = Vec::new();
        src.extend_from_slice(&1.0f32.to_le_bytes());
        src.extend_from_slice(&2.0f32.to_le_bytes());
        let blitter = Blitter::new(PixelFormat::Mono32Float, 2, 1);
        let mut dest = [0u32; 2];
        blitter.decode_line(&mut dest, 0, &src, 0, 0, 2);
        assert_eq!(dest[1], 0x00FFFFFF);
        let g = (dest[0] >> 8) & 0xFF;
        assert!((126..=128).contains(&g));
    }

    #[test]
    fn test_mono32f_all_zero_line() {
        let src = [0u8; 8];
        let blitter = Blitter::new(PixelFormat::Mono32Float, 2, 1);
        let mut dest = [0xFFFFFFFFu32; 2];
        blitter.decode_line(&mut dest, 0, &src, 0, 0, 2);
        assert_eq!(dest, [0, 0]);
    }

    #[test]
    fn test_unimplemented_format_is_black() {
        assert_eq!(decode_one(PixelFormat::BayerRggb8, 1, 1, &[0xFF]), 0);
    }

    #[test]
    fn test_short_source_yields_black() {
        let blitter = Blitter::new(PixelFormat::Rgb24, 4, 1);
        let mut dest = [0xFFu32; 4];
        blitter.decode_line(&mut dest, 0, &[10, 20, 30], 0, 0, 4);
        assert_eq!(dest[0], 0x000A141E);
        assert_eq!(dest[1], 0);
    }

    #[test]
    fn test_dest_overflow_is_dropped() {
        let blitter = Blitter::new(PixelFormat::Mono8, 4, 1);
        let mut dest = [0u32; 2];
        blitter.decode_line(&mut dest, 1, &[9, 9, 9, 9], 0, 0, 4);
        assert_eq!(dest, [0, 0]);
    }
}
