//! # Artwork pane
//!
//! Tiered rendering of the right-hand pane:
//! 1. Kitty graphics (pixel perfect) - if the terminal supports it
//! 2. `HalfBlock` ▀ block art (2 colors per cell) - universal fallback
//! 3. Placeholder box - no artwork, or every tier failed
//!
//! ```text
//!   origin ──► ArtworkCache ──► normalized .jpg ──► decode
//!                  │ miss                              │
//!                  ▼                                   ├──► Kitty
//!            ArtworkFetcher                            ├──► HalfBlock
//!                                                      └──► Placeholder
//! ```
//!
//! All three tiers produce `height + 2` lines so the layout engine can treat
//! them interchangeably.

mod cache;
mod caps;
mod color;
mod fetch;
pub mod frame;
mod halfblock;
mod kitty;
mod rasterizer;

use clap::ValueEnum;
use image::DynamicImage;
use serde::Deserialize;
use tracing::debug;

pub use cache::{ArtworkCache, DEFAULT_JPEG_QUALITY};
pub use caps::{GraphicsProtocol, TerminalGeometry};
pub use color::Color;
pub use fetch::{ArtworkFetcher, ArtworkOrigin, DefaultFetcher, OriginKind};
pub use halfblock::HalfBlockRasterizer;
pub use kitty::KittyRasterizer;
pub use rasterizer::{rasterize_file, Rasterizer};

use crate::errors::ArtworkError;

/// Artwork box size in terminal cells, borders excluded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtworkSize {
    pub width: u32,
    pub height: u32,
}

impl ArtworkSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Artwork size tier for a terminal of the given width
    pub fn for_terminal_width(columns: usize) -> Self {
        match columns {
            0..=79 => Self::new(20, 10),
            80..=119 => Self::new(30, 15),
            _ => Self::new(40, 20),
        }
    }

    /// Columns taken by the boxed pane
    pub fn outer_width(self) -> usize {
        self.width as usize + 2
    }

    /// Lines taken by the boxed pane
    pub fn outer_height(self) -> usize {
        self.height as usize + 2
    }
}

/// How artwork should be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GraphicsMode {
    /// Kitty graphics when the terminal advertises it, block art otherwise
    #[default]
    Auto,
    /// Always try Kitty graphics first
    Kitty,
    /// Always use block art
    Blocks,
}

impl GraphicsMode {
    pub fn use_native(self, protocol: GraphicsProtocol) -> bool {
        match self {
            Self::Auto => protocol.supports_native_images(),
            Self::Kitty => true,
            Self::Blocks => false,
        }
    }
}

/// Resolves artwork through the cache and renders the best available tier
#[derive(Debug)]
pub struct ArtworkRenderer {
    cache: ArtworkCache,
    native: Option<KittyRasterizer>,
    blocks: HalfBlockRasterizer,
}

impl ArtworkRenderer {
    pub fn new(cache: ArtworkCache, native: bool) -> Self {
        Self {
            cache,
            native: native.then(KittyRasterizer::new),
            blocks: HalfBlockRasterizer::new(),
        }
    }

    pub fn native_enabled(&self) -> bool {
        self.native.is_some()
    }

    pub fn cache(&self) -> &ArtworkCache {
        &self.cache
    }

    /// Render the pane for `origin`
    ///
    /// Never fails: every error drops to the next tier and finally to the
    /// placeholder.
    pub fn render(&mut self, origin: Option<&str>, size: ArtworkSize) -> String {
        let path = match self.cache.resolve(origin) {
            Ok(Some(path)) => path,
            Ok(None) => return frame::placeholder(size),
            Err(err) => {
                debug!(origin, kind = err.kind(), "artwork unavailable: {}", err);
                return frame::placeholder(size);
            }
        };

        let image = match image::open(&path) {
            Ok(image) => image,
            Err(err) => {
                let err = ArtworkError::Decode(err);
                debug!(path = %path.display(), "cached artwork unreadable: {}", err);
                // Drop the entry so the next update fetches it again
                self.cache.evict(&path);
                return frame::placeholder(size);
            }
        };

        self.rasterize_tiers(&image, size)
            .unwrap_or_else(|| frame::placeholder(size))
    }

    /// Try each rasterizer in turn
    fn rasterize_tiers(&self, image: &DynamicImage, size: ArtworkSize) -> Option<String> {
        let tiers: [Option<&dyn Rasterizer>; 2] = [
            self.native.as_ref().map(|r| r as &dyn Rasterizer),
            Some(&self.blocks),
        ];

        for rasterizer in tiers.into_iter().flatten() {
            match rasterizer.rasterize(image, size) {
                Ok(out) => return Some(out),
                Err(err) => debug!(
                    rasterizer = rasterizer.name(),
                    kind = err.kind(),
                    "rasterizer failed, falling back: {}",
                    err
                ),
            }
        }
        None
    }
}
