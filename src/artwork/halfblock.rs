//! `HalfBlock` rasterizer - Universal fallback using the ▀ character
//!
//! Each terminal cell represents 2 vertical "pixels":
//! - Top pixel = foreground color
//! - Bottom pixel = background color

use image::{imageops::FilterType, DynamicImage};

use super::color::Color;
use super::frame::{self, VERTICAL};
use super::rasterizer::Rasterizer;
use super::ArtworkSize;
use crate::errors::ArtworkError;
use crate::text::ansi::sgr;

/// Upper half block: foreground paints the top half
pub const UPPER_HALF_BLOCK: char = '▀';

/// Half-block rasterizer
///
/// Renders 2 vertical pixels per cell inside a double-line box.
/// Works on any terminal with Unicode and truecolor support.
#[derive(Debug, Default)]
pub struct HalfBlockRasterizer;

impl HalfBlockRasterizer {
    pub fn new() -> Self {
        Self
    }

    /// One colored cell: top pixel as foreground, bottom as background
    fn push_cell(line: &mut String, top: Color, bottom: Color) {
        line.push_str(&top.fg_code());
        line.push_str(&bottom.bg_code());
        line.push(UPPER_HALF_BLOCK);
        line.push_str(sgr::RESET);
    }
}

impl Rasterizer for HalfBlockRasterizer {
    fn rasterize(&self, image: &DynamicImage, size: ArtworkSize) -> Result<String, ArtworkError> {
        let (cols, rows) = (size.width, size.height);
        if cols == 0 || rows == 0 {
            return Err(ArtworkError::Encode(format!(
                "empty target box {}x{}",
                cols, rows
            )));
        }

        let pixel_rows = rows * 2;
        let pixels = image
            .resize_exact(cols, pixel_rows, FilterType::Lanczos3)
            .to_rgb8();

        let mut lines = Vec::with_capacity(rows as usize + 2);
        lines.push(frame::top_border(cols));

        for row in 0..rows {
            let top_y = row * 2;
            let bottom_y = (top_y + 1).min(pixel_rows - 1);

            // two truecolor SGRs, the glyph and a reset
            let mut line = String::with_capacity(cols as usize * 48 + 8);
            line.push(VERTICAL);
            for x in 0..cols {
                let top = Color::from(*pixels.get_pixel(x, top_y));
                let bottom = Color::from(*pixels.get_pixel(x, bottom_y));
                Self::push_cell(&mut line, top, bottom);
            }
            line.push(VERTICAL);
            lines.push(line);
        }

        lines.push(frame::bottom_border(cols));
        Ok(lines.join("\n"))
    }

    fn name(&self) -> &'static str {
        "HalfBlock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::visible_width;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_solid_image_shape() {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(100, 100, Rgb([255, 0, 0])));
        let out = HalfBlockRasterizer::new()
            .rasterize(&image, ArtworkSize::new(10, 5))
            .unwrap();
        let lines: Vec<&str> = out.split('\n').collect();

        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "╔══════════╗");
        assert_eq!(lines[6], "╚══════════╝");
        for line in &lines {
            assert_eq!(visible_width(line), 12);
        }

        let cell = "\x1b[38;2;255;0;0m\x1b[48;2;255;0;0m▀\x1b[0m";
        for line in &lines[1..6] {
            assert_eq!(*line, format!("║{}║", cell.repeat(10)));
        }
    }

    #[test]
    fn test_top_and_bottom_samples() {
        // 1x2 image: white over black maps to one cell
        let mut img = RgbImage::new(1, 2);
        img.put_pixel(0, 0, Rgb([255, 255, 255]));
        img.put_pixel(0, 1, Rgb([0, 0, 0]));

        let out = HalfBlockRasterizer::new()
            .rasterize(&DynamicImage::ImageRgb8(img), ArtworkSize::new(1, 1))
            .unwrap();
        let row = out.split('\n').nth(1).unwrap();

        assert_eq!(
            row,
            "║\x1b[38;2;255;255;255m\x1b[48;2;0;0;0m▀\x1b[0m║"
        );
    }

    #[test]
    fn test_rgba_input_is_converted() {
        let img = image::RgbaImage::from_pixel(6, 6, image::Rgba([0, 255, 0, 255]));
        let out = HalfBlockRasterizer::new()
            .rasterize(&DynamicImage::ImageRgba8(img), ArtworkSize::new(3, 2))
            .unwrap();
        assert!(out.contains("\x1b[38;2;0;255;0m"));
        assert_eq!(out.split('\n').count(), 4);
    }

    #[test]
    fn test_zero_size_is_error() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(2, 2));
        assert!(HalfBlockRasterizer::new()
            .rasterize(&img, ArtworkSize::new(3, 0))
            .is_err());
    }
}
