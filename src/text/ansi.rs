//! ANSI escape vocabulary used by the dashboard
//!
//! Constants and builders for the handful of SGR, cursor and Kitty graphics
//! sequences the renderers emit. Parsing lives in [`super::width`].

/// Escape
pub const ESC: char = '\x1B';

/// SGR (Select Graphic Rendition) for text styling
pub mod sgr {
    /// Reset all attributes
    pub const RESET: &str = "\x1B[0m";

    /// Bold
    pub const BOLD: &str = "\x1B[1m";

    /// Red foreground
    pub const RED: &str = "\x1B[31m";

    /// Green foreground
    pub const GREEN: &str = "\x1B[32m";

    /// Yellow foreground
    pub const YELLOW: &str = "\x1B[33m";

    /// Magenta foreground
    pub const MAGENTA: &str = "\x1B[35m";

    /// Cyan foreground
    pub const CYAN: &str = "\x1B[36m";

    /// White foreground
    pub const WHITE: &str = "\x1B[37m";

    /// Bright black (gray) foreground
    pub const GRAY: &str = "\x1B[90m";

    /// 24-bit Foreground Color (RGB)
    pub fn fg_rgb(r: u8, g: u8, b: u8) -> String {
        format!("\x1B[38;2;{};{};{}m", r, g, b)
    }

    /// 24-bit Background Color (RGB)
    pub fn bg_rgb(r: u8, g: u8, b: u8) -> String {
        format!("\x1B[48;2;{};{};{}m", r, g, b)
    }
}

/// Kitty graphics protocol (APC `ESC _ G ... ESC \`)
pub mod kitty {
    /// Start of a graphics command
    pub const START: &str = "\x1B_G";

    /// String terminator closing a graphics command
    pub const END: &str = "\x1B\\";

    /// Delete every image placed on screen
    pub const DELETE_ALL: &str = "\x1B_Ga=d,d=A\x1B\\";
}

/// Wrap `text` in `style` and a trailing reset
pub fn paint(style: &str, text: &str) -> String {
    format!("{}{}{}", style, text, sgr::RESET)
}
