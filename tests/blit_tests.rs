// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Pixel-format decoder integration tests.
//!
//! Known-answer vectors per format, plus the defensive behaviors: sources
//! shorter than a scanline decode as black, and unsupported formats produce
//! a null (all-black) blitter instead of failing.

use vizcodec::image::{ArgbBuffer, Blitter, PixelFormat};

fn decode_row(format: PixelFormat, width: usize, height: usize, src: &[u8]) -> Vec<u32> {
    let blitter = Blitter::new(format, width, height);
    let mut dest = vec![0u32; width];
    blitter.decode_line(&mut dest, 0, src, 0, 0, width);
    dest
}

#[test]
fn test_rgb24_known_vector() {
    let dest = decode_row(PixelFormat::Rgb24, 1, 1, &[10, 20, 30]);
    assert_eq!(dest[0], 0x000A141E);
}

#[test]
fn test_bgr24_swaps_channels() {
    let dest = decode_row(PixelFormat::Bgr24, 1, 1, &[30, 20, 10]);
    assert_eq!(dest[0], 0x000A141E);
}

#[test]
fn test_rgb565_pure_red() {
    // little-endian 0xF800
    let dest = decode_row(PixelFormat::Rgb565, 1, 1, &[0x00, 0xF8]);
    assert_eq!(dest[0], 0x00F80000);
}

#[test]
fn test_rgb565_pure_green() {
    // little-endian 0x07E0
    let dest = decode_row(PixelFormat::Rgb565, 1, 1, &[0xE0, 0x07]);
    assert_eq!(dest[0], 0x0000FC00);
}

#[test]
fn test_mono8_replicates_luma() {
    let dest = decode_row(PixelFormat::Mono8, 3, 1, &[0, 128, 255]);
    assert_eq!(dest, vec![0x00000000, 0x00808080, 0x00FFFFFF]);
}

#[test]
fn test_mono16_uses_high_byte() {
    // little-endian u16: 0xAB00 -> luma 0xAB
    let dest = decode_row(PixelFormat::Mono16, 1, 1, &[0x00, 0xAB]);
    assert_eq!(dest[0], 0x00ABABAB);
}

#[test]
fn test_yuv444_white() {
    // Y=235 U=V=128 is nominal white in BT.601
    let dest = decode_row(PixelFormat::Yuv444, 1, 1, &[235, 128, 128]);
    let (r, g, b) = (
        (dest[0] >> 16) & 0xFF,
        (dest[0] >> 8) & 0xFF,
        dest[0] & 0xFF,
    );
    assert_eq!(r, g);
    assert_eq!(g, b);
    assert!(r >= 230, "white must stay near full scale, got {r}");
}

#[test]
fn test_yuv422_pairs_share_chroma() {
    // YUYV: two luma samples share one U/V pair
    let dest = decode_row(PixelFormat::Yuv422, 2, 1, &[100, 128, 200, 128]);
    let luma = |argb: u32| (argb >> 16) & 0xFF;
    assert!(luma(dest[1]) > luma(dest[0]));
}

#[test]
fn test_short_source_decodes_black() {
    let dest = decode_row(PixelFormat::Rgb24, 4, 1, &[255, 255, 255]);
    // first pixel decodes, the rest read past the source and clamp to zero
    assert_eq!(dest[0], 0x00FFFFFF);
    assert_eq!(dest[2], 0x00000000);
    assert_eq!(dest[3], 0x00000000);
}

#[test]
fn test_bayer_null_blitter() {
    let dest = decode_row(PixelFormat::BayerRggb8, 4, 1, &[9; 4]);
    assert_eq!(dest, vec![0; 4]);
}

#[test]
fn test_mono32f_normalizes_per_line() {
    let mut src = Vec::new();
    for v in [1.0f32, 2.0f32] {
        src.extend_from_slice(&v.to_le_bytes());
    }
    let dest = decode_row(PixelFormat::Mono32Float, 2, 1, &src);
    assert_eq!(dest[1], 0x00FFFFFF);
    let half = (dest[0] >> 16) & 0xFF;
    assert!((126..=129).contains(&half), "got {half}");
}

#[test]
fn test_format_parsing_and_sizes() {
    assert_eq!("rgb24".parse::<PixelFormat>().unwrap(), PixelFormat::Rgb24);
    assert_eq!(
        "yuv420p".parse::<PixelFormat>().unwrap(),
        PixelFormat::Yuv420P
    );
    assert!("argb1555".parse::<PixelFormat>().is_err());

    assert_eq!(PixelFormat::Rgb24.bytes_per_pixel(), Some(3));
    assert_eq!(PixelFormat::Yuv420P.bytes_per_pixel(), None);
    // planar 4:2:0 carries half a byte of chroma per pixel
    assert_eq!(PixelFormat::Yuv420P.buffer_size(4, 4), 24);
}

#[test]
fn test_yuv420p_full_frame_into_buffer() {
    // 2x2 frame: luma plane then quarter-size U and V planes
    let src = [100u8, 100, 100, 100, 128, 128];
    let blitter = Blitter::new(PixelFormat::Yuv420P, 2, 2);
    let mut image = ArgbBuffer::new(2, 2);
    for row in 0..2 {
        let offset = row * 2;
        let dest = image.pixels_mut();
        blitter.decode_line(dest, offset, &src, 0, offset, 2);
    }
    // uniform gray frame
    let first = image.get(0, 0);
    assert_eq!(image.get(1, 0), first);
    assert_eq!(image.get(0, 1), first);
    assert_eq!(image.get(1, 1), first);
}
