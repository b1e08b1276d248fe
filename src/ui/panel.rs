//! Left pane: track information

use crate::layout::center_vertically;
use crate::player::{PlaybackStatus, TrackMetadata};
use crate::text::ansi::{paint, sgr};
use crate::text::truncate_to_width;

/// Widest the progress bar gets
pub const MAX_BAR_WIDTH: usize = 50;

const FILLED: char = '━';
const EMPTY: char = '─';

/// Columns reserved for the indent and icon in front of text fields
const TEXT_MARGIN: usize = 8;

const INDENT: &str = "  ";

pub const NO_PLAYER_MESSAGE: &str = "No active media player found";
pub const NO_PLAYER_HINT: &str = "Start playing music and run bass-senpai again";

/// `MM:SS`, minutes unbounded
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds as u64
    } else {
        0
    };
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Number of filled cells for a bar of `width`
pub fn filled_cells(position: f64, length: f64, width: usize) -> usize {
    if length <= 0.0 || !position.is_finite() {
        return 0;
    }
    let fraction = (position / length).clamp(0.0, 1.0);
    ((fraction * width as f64).floor() as usize).min(width)
}

/// Cyan filled part, gray remainder
pub fn progress_bar(position: f64, length: f64, width: usize) -> String {
    let filled = filled_cells(position, length, width);
    let mut bar = String::with_capacity(width * 3 + 16);
    bar.push_str(sgr::CYAN);
    bar.extend(std::iter::repeat(FILLED).take(filled));
    bar.push_str(sgr::GRAY);
    bar.extend(std::iter::repeat(EMPTY).take(width - filled));
    bar.push_str(sgr::RESET);
    bar
}

pub fn status_icon(status: &PlaybackStatus) -> char {
    match status {
        PlaybackStatus::Playing => '▶',
        PlaybackStatus::Paused => '⏸',
        PlaybackStatus::Stopped | PlaybackStatus::Other(_) => '⏹',
    }
}

pub fn status_color(status: &PlaybackStatus) -> &'static str {
    match status {
        PlaybackStatus::Playing => sgr::GREEN,
        PlaybackStatus::Paused => sgr::YELLOW,
        PlaybackStatus::Stopped => sgr::RED,
        PlaybackStatus::Other(_) => sgr::WHITE,
    }
}

/// Geometry the left pane is drawn against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelGeometry {
    /// Columns available to the pane
    pub left_width: usize,
    /// Height the content is centered in
    pub target_height: usize,
}

impl PanelGeometry {
    /// Left pane geometry beside an artwork box of `artwork_width` x `artwork_height`
    pub fn beside_artwork(terminal_width: usize, artwork_width: usize, artwork_height: usize) -> Self {
        Self {
            left_width: terminal_width.saturating_sub(artwork_width + 2 + 4),
            target_height: artwork_height + 2,
        }
    }

    fn text_width(self) -> usize {
        self.left_width.saturating_sub(TEXT_MARGIN)
    }

    fn bar_width(self) -> usize {
        MAX_BAR_WIDTH.min(self.left_width.saturating_sub(4))
    }
}

/// Track pane, or the no-player message when `metadata` is `None`
pub fn render(metadata: Option<&TrackMetadata>, geometry: PanelGeometry) -> String {
    let lines = match metadata {
        Some(meta) => track_lines(meta, geometry),
        None => no_player_lines(geometry),
    };
    center_vertically(lines, geometry.target_height).join("\n")
}

fn track_lines(meta: &TrackMetadata, geometry: PanelGeometry) -> Vec<String> {
    let text_width = geometry.text_width();
    let field = |icon: &str, style: &str, text: &str| {
        format!(
            "{}{} {}",
            INDENT,
            icon,
            paint(style, &truncate_to_width(text, text_width))
        )
    };

    let status = format!(
        "{}{}{} {}{}",
        INDENT,
        status_color(&meta.status),
        status_icon(&meta.status),
        truncate_to_width(meta.status.as_str(), text_width),
        sgr::RESET
    );
    let time = format!("{} / {}", format_time(meta.position), format_time(meta.length));

    vec![
        field("♪", &format!("{}{}", sgr::BOLD, sgr::MAGENTA), &meta.title),
        String::new(),
        field("👤", sgr::CYAN, &meta.artist),
        String::new(),
        field("💿", sgr::GRAY, &meta.album),
        String::new(),
        String::new(),
        status,
        String::new(),
        String::new(),
        format!(
            "{}{}",
            INDENT,
            progress_bar(meta.position, meta.length, geometry.bar_width())
        ),
        String::new(),
        format!("{}{}", INDENT, paint(sgr::GRAY, &time)),
    ]
}

fn no_player_lines(geometry: PanelGeometry) -> Vec<String> {
    let line = |text: &str| {
        format!(
            "{}{}",
            INDENT,
            paint(sgr::GRAY, &truncate_to_width(text, geometry.text_width()))
        )
    };
    vec![line(NO_PLAYER_MESSAGE), String::new(), line(NO_PLAYER_HINT)]
}
