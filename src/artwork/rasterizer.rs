//! Rasterizer trait for turning decoded artwork into a pane of text

use std::path::Path;

use image::DynamicImage;

use super::ArtworkSize;
use crate::errors::ArtworkError;

/// Converts a decoded image into `size.height + 2` lines of terminal text
pub trait Rasterizer: Send + Sync {
    /// Render the image into the given cell box
    fn rasterize(&self, image: &DynamicImage, size: ArtworkSize) -> Result<String, ArtworkError>;

    /// Name of this rasterizer
    fn name(&self) -> &'static str;
}

/// Decode the image at `path` and hand it to `rasterizer`
pub fn rasterize_file(
    rasterizer: &dyn Rasterizer,
    path: &Path,
    size: ArtworkSize,
) -> Result<String, ArtworkError> {
    let image = image::open(path).map_err(ArtworkError::Decode)?;
    rasterizer.rasterize(&image, size)
}
