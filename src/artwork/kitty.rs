//! Kitty Graphics Protocol rasterizer
//!
//! Sends the artwork itself as a PNG for pixel-perfect rendering.
//! Supported by: Kitty, WezTerm, Ghostty
//!
//! Protocol: <https://sw.kovidgoyal.net/kitty/graphics-protocol/>

use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use image::{imageops::FilterType, DynamicImage, ImageFormat};

use super::rasterizer::Rasterizer;
use super::ArtworkSize;
use crate::errors::ArtworkError;
use crate::text::ansi::kitty;

/// Assumed pixel size of one terminal cell
pub const CELL_WIDTH_PX: u32 = 10;
pub const CELL_HEIGHT_PX: u32 = 20;

/// Maximum base64 payload per escape sequence
pub const CHUNK_SIZE: usize = 4096;

/// Kitty Graphics Protocol rasterizer
#[derive(Debug, Default)]
pub struct KittyRasterizer;

impl KittyRasterizer {
    pub fn new() -> Self {
        Self
    }

    /// Downscale to fit the cell box (never upscale) and encode as PNG
    fn encode_png(image: &DynamicImage, size: ArtworkSize) -> Result<Vec<u8>, ArtworkError> {
        let max_w = size.width * CELL_WIDTH_PX;
        let max_h = size.height * CELL_HEIGHT_PX;
        if max_w == 0 || max_h == 0 {
            return Err(ArtworkError::Encode(format!(
                "empty target box {}x{}",
                size.width, size.height
            )));
        }

        let rgb = if image.width() > max_w || image.height() > max_h {
            image.resize(max_w, max_h, FilterType::Lanczos3).to_rgb8()
        } else {
            image.to_rgb8()
        };

        let mut png = Vec::new();
        rgb.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|e| ArtworkError::Encode(e.to_string()))?;
        Ok(png)
    }

    /// Frame a base64 payload as a chunked transmit-and-display command
    ///
    /// The first chunk carries the action and format keys; every chunk but
    /// the last sets `m=1`.
    pub fn build_sequence(b64: &str) -> Result<String, ArtworkError> {
        let chunks = b64
            .as_bytes()
            .chunks(CHUNK_SIZE)
            .map(std::str::from_utf8)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ArtworkError::Encode(e.to_string()))?;

        if chunks.is_empty() {
            return Err(ArtworkError::Encode("empty image payload".to_string()));
        }

        let num_chunks = chunks.len();
        let mut result = String::with_capacity(b64.len() + num_chunks * 32);

        for (i, chunk) in chunks.iter().enumerate() {
            let more = u8::from(i + 1 < num_chunks);

            result.push_str(kitty::START);
            if i == 0 {
                // a=T: transmit and display, f=100: PNG, q=2: no replies
                result.push_str(&format!("a=T,f=100,q=2,m={};", more));
            } else {
                result.push_str(&format!("m={};", more));
            }
            result.push_str(chunk);
            result.push_str(kitty::END);
        }

        Ok(result)
    }
}

impl Rasterizer for KittyRasterizer {
    fn rasterize(&self, image: &DynamicImage, size: ArtworkSize) -> Result<String, ArtworkError> {
        let png = Self::encode_png(image, size)?;
        let sequence = Self::build_sequence(&BASE64.encode(&png))?;

        // The image is drawn at the cursor on line one; the blank lines keep
        // the pane as tall as the block-art box.
        let mut lines = Vec::with_capacity(size.height as usize + 2);
        lines.push(sequence);
        lines.extend(std::iter::repeat(String::new()).take(size.height as usize + 1));
        Ok(lines.join("\n"))
    }

    fn name(&self) -> &'static str {
        "Kitty"
    }
}
