//! Split-pane layout
//!
//! Places the track panel and the artwork box side by side:
//!
//! ```text
//! ┌──────────── left target ────────────┐  ┌─ artwork + 2 ─┐
//! <track line, space padded            >  <artwork line   >
//! ```

use crate::text::visible_width;

/// Columns between the two panes
pub const GUTTER: &str = "  ";

/// Columns taken by the box border around the artwork
pub const BORDER_ALLOWANCE: usize = 2;

/// Horizontal geometry of the two-pane view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitLayout {
    pub terminal_width: usize,
    pub artwork_width: usize,
}

impl SplitLayout {
    pub const fn new(terminal_width: usize, artwork_width: usize) -> Self {
        Self {
            terminal_width,
            artwork_width,
        }
    }

    /// Width reserved for the boxed artwork
    pub fn right_width(&self) -> usize {
        self.artwork_width + BORDER_ALLOWANCE
    }

    /// Width the left pane is padded to
    pub fn left_width(&self) -> usize {
        self.terminal_width
            .saturating_sub(self.right_width())
            .saturating_sub(GUTTER.len())
    }

    /// Merge two blocks row by row
    ///
    /// The shorter block is padded with empty lines at the bottom. Left lines
    /// narrower than [`Self::left_width`] get trailing spaces; wider ones are
    /// left untouched.
    pub fn compose(&self, left: &str, right: &str) -> String {
        let mut left_lines: Vec<&str> = left.split('\n').collect();
        let mut right_lines: Vec<&str> = right.split('\n').collect();

        let height = left_lines.len().max(right_lines.len());
        left_lines.resize(height, "");
        right_lines.resize(height, "");

        let target = self.left_width();
        let rows: Vec<String> = left_lines
            .into_iter()
            .zip(right_lines)
            .map(|(l, r)| {
                let pad = target.saturating_sub(visible_width(l));
                let mut row = String::with_capacity(l.len() + pad + GUTTER.len() + r.len());
                row.push_str(l);
                row.extend(std::iter::repeat(' ').take(pad));
                row.push_str(GUTTER);
                row.push_str(r);
                row
            })
            .collect();

        rows.join("\n")
    }
}

/// Pad `lines` with blank lines so they sit centered in `target_height`
///
/// The extra line of an odd split goes to the bottom. Content taller than
/// the target is returned unchanged.
pub fn center_vertically(lines: Vec<String>, target_height: usize) -> Vec<String> {
    let total = target_height.saturating_sub(lines.len());
    let top = total / 2;
    let bottom = total - top;

    let mut out = Vec::with_capacity(lines.len() + total);
    out.extend(std::iter::repeat(String::new()).take(top));
    out.extend(lines);
    out.extend(std::iter::repeat(String::new()).take(bottom));
    out
}
