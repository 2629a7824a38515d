// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Render command - rasterize a canvas stream to a PNG image.

use std::path::PathBuf;

use clap::Args;

use crate::common::{load_stream, Result};
use vizcodec::canvas::{BoundsSurface, CanvasInterpreter, RasterSurface};
use vizcodec::core::{Rect, Transform2};
use vizcodec::image::ArgbBuffer;

/// Rasterize a canvas stream into a PNG file.
#[derive(Args, Clone, Debug)]
pub struct RenderCmd {
    /// Input stream file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Output PNG file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Output width in pixels
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Output height in pixels
    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Margin around the drawn extent, in pixels
    #[arg(long, default_value_t = 8.0)]
    margin: f64,

    /// Background color as RRGGBB hex
    #[arg(long, default_value = "ffffff")]
    background: String,
}

impl RenderCmd {
    pub fn run(self) -> Result<()> {
        let data = load_stream(&self.input)?;

        // Fit the drawn extent (or the stream's viewport hint) to the output.
        let mut bounds = BoundsSurface::new();
        let index = CanvasInterpreter::paint(&data, &mut bounds);
        let extent = match index.default_viewport {
            Some(v) if !v.is_empty() => v,
            _ => bounds.bounds(),
        };
        let view = fit_transform(extent, self.width, self.height, self.margin);

        let background = parse_background(&self.background)?;
        let mut buffer = ArgbBuffer::new(self.width as usize, self.height as usize);
        buffer.clear(background);

        let mut surface = RasterSurface::with_view(&mut buffer, view);
        CanvasInterpreter::paint(&data, &mut surface);

        save_png(&buffer, &self.output)?;
        println!(
            "Rendered {} ({} z levels) -> {}",
            self.input.display(),
            index.contexts.len(),
            self.output.display()
        );
        Ok(())
    }
}

/// Uniform-scale transform mapping `extent` into a `width` x `height` buffer
/// with `margin` pixels on each side.
fn fit_transform(extent: Rect, width: u32, height: u32, margin: f64) -> Transform2 {
    let inner_w = (width as f64 - 2.0 * margin).max(1.0);
    let inner_h = (height as f64 - 2.0 * margin).max(1.0);
    if extent.is_empty() || extent.width <= 0.0 || extent.height <= 0.0 {
        return Transform2::translation(width as f64 * 0.5, height as f64 * 0.5);
    }
    let scale = (inner_w / extent.width).min(inner_h / extent.height);
    let tx = margin + (inner_w - extent.width * scale) * 0.5 - extent.x * scale;
    let ty = margin + (inner_h - extent.height * scale) * 0.5 - extent.y * scale;
    let mut view = Transform2::translation(tx, ty);
    view.scale(scale, scale);
    view
}

fn parse_background(hex_color: &str) -> Result<u32> {
    let bytes = hex::decode(hex_color)
        .map_err(|e| anyhow::anyhow!("invalid background color {hex_color:?}: {e}"))?;
    if bytes.len() != 3 {
        anyhow::bail!("background color must be 6 hex digits, got {hex_color:?}");
    }
    Ok(u32::from(bytes[0]) << 16 | u32::from(bytes[1]) << 8 | u32::from(bytes[2]))
}

fn save_png(buffer: &ArgbBuffer, path: &PathBuf) -> Result<()> {
    let mut img = image::RgbImage::new(buffer.width() as u32, buffer.height() as u32);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let argb = buffer.get(x as i64, y as i64);
        *pixel = image::Rgb([
            (argb >> 16) as u8,
            (argb >> 8) as u8,
            argb as u8,
        ]);
    }
    img.save(path)
        .map_err(|e| anyhow::anyhow!("cannot write {}: {e}", path.display()))?;
    Ok(())
}
