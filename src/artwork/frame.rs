//! Double-line box shared by block art and the placeholder

use super::ArtworkSize;

pub const TOP_LEFT: char = '╔';
pub const TOP_RIGHT: char = '╗';
pub const BOTTOM_LEFT: char = '╚';
pub const BOTTOM_RIGHT: char = '╝';
pub const HORIZONTAL: char = '═';
pub const VERTICAL: char = '║';

/// Label shown when there is no artwork to draw
pub const NO_ARTWORK_LABEL: &str = "No Artwork";

fn border(left: char, right: char, width: u32) -> String {
    let mut line = String::with_capacity((width as usize + 2) * HORIZONTAL.len_utf8());
    line.push(left);
    line.extend(std::iter::repeat(HORIZONTAL).take(width as usize));
    line.push(right);
    line
}

pub fn top_border(width: u32) -> String {
    border(TOP_LEFT, TOP_RIGHT, width)
}

pub fn bottom_border(width: u32) -> String {
    border(BOTTOM_LEFT, BOTTOM_RIGHT, width)
}

/// Content row of the placeholder that carries the label
pub fn label_row(height: u32) -> u32 {
    height.saturating_sub(1) / 2
}

/// Empty box with a centered "No Artwork" label
///
/// Same outer shape as block art for the same size: `height + 2` lines of
/// `width + 2` columns.
pub fn placeholder(size: ArtworkSize) -> String {
    let width = size.width as usize;
    let label: String = NO_ARTWORK_LABEL.chars().take(width).collect();
    let left = (width - label.len()) / 2;
    let right = width - left - label.len();

    let mut lines = Vec::with_capacity(size.height as usize + 2);
    lines.push(top_border(size.width));
    for row in 0..size.height {
        let content = if row == label_row(size.height) {
            format!("{}{}{}", " ".repeat(left), label, " ".repeat(right))
        } else {
            " ".repeat(width)
        };
        lines.push(format!("{VERTICAL}{content}{VERTICAL}"));
    }
    lines.push(bottom_border(size.width));
    lines.join("\n")
}
