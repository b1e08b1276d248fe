//! Full-screen frame: header, track pane and artwork pane

use crate::artwork::{ArtworkRenderer, ArtworkSize, TerminalGeometry};
use crate::layout::SplitLayout;
use crate::player::TrackMetadata;
use crate::text::ansi::{paint, sgr};

use super::panel::{self, PanelGeometry};

pub const TITLE: &str = "bass-senpai";

/// Lines taken by [`header`]
pub const HEADER_LINES: usize = 4;

/// Blank line, title, separator, blank line
pub fn header(terminal_width: usize) -> String {
    let separator = "─".repeat(terminal_width.saturating_sub(4));
    let title = paint(&format!("{}{}", sgr::BOLD, sgr::MAGENTA), TITLE);
    format!(
        "\n  {}\n  {}\n",
        title,
        paint(sgr::GRAY, &separator)
    )
}

/// Builds frames from player state
#[derive(Debug)]
pub struct Dashboard {
    artwork: ArtworkRenderer,
}

impl Dashboard {
    pub fn new(artwork: ArtworkRenderer) -> Self {
        Self { artwork }
    }

    pub fn artwork(&self) -> &ArtworkRenderer {
        &self.artwork
    }

    /// Compose one frame for the given track and terminal size
    pub fn frame(&mut self, metadata: Option<&TrackMetadata>, geometry: TerminalGeometry) -> String {
        let size = ArtworkSize::for_terminal_width(geometry.width);
        let art_url = metadata.and_then(|m| m.art_url.as_deref());

        let left = panel::render(
            metadata,
            PanelGeometry::beside_artwork(geometry.width, size.width as usize, size.height as usize),
        );
        let right = self.artwork.render(art_url, size);

        let layout = SplitLayout::new(geometry.width, size.width as usize);
        format!("{}\n{}", header(geometry.width), layout.compose(&left, &right))
    }
}
