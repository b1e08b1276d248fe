//! 24-bit color for block-art cells

use crate::text::ansi::sgr;

/// RGB color with 8-bit components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Truecolor foreground escape
    #[inline]
    pub fn fg_code(&self) -> String {
        sgr::fg_rgb(self.r, self.g, self.b)
    }

    /// Truecolor background escape
    #[inline]
    pub fn bg_code(&self) -> String {
        sgr::bg_rgb(self.r, self.g, self.b)
    }
}

impl From<image::Rgb<u8>> for Color {
    fn from(px: image::Rgb<u8>) -> Self {
        let [r, g, b] = px.0;
        Self::rgb(r, g, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        let c = Color::rgb(1, 2, 3);
        assert_eq!(c.fg_code(), "\x1B[38;2;1;2;3m");
        assert_eq!(c.bg_code(), "\x1B[48;2;1;2;3m");
        assert_eq!(Color::from(image::Rgb([9, 8, 7])), Color::rgb(9, 8, 7));
    }
}
