//! Terminal capability detection
//!
//! Detects:
//! - Kitty graphics protocol support, from environment signals
//! - Current terminal geometry, sampled fresh on every call

use std::env;

use tracing::debug;

/// Graphics protocol supported by terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GraphicsProtocol {
    /// Kitty Graphics Protocol - in-band PNG transmission
    Kitty,
    /// No graphics support - use Unicode block art
    #[default]
    None,
}

impl GraphicsProtocol {
    /// Detect from the process environment
    pub fn detect() -> Self {
        Self::detect_from(|key| env::var(key).ok())
    }

    /// Detect using an arbitrary environment lookup
    pub fn detect_from(var: impl Fn(&str) -> Option<String>) -> Self {
        if var("KITTY_WINDOW_ID").is_some() || var("WEZTERM_PANE").is_some() {
            return Self::Kitty;
        }

        if var("TERM").is_some_and(|term| term.to_lowercase().contains("kitty")) {
            return Self::Kitty;
        }

        match var("TERM_PROGRAM").as_deref() {
            Some("WezTerm" | "ghostty" | "Ghostty") => Self::Kitty,
            _ => Self::None,
        }
    }

    pub fn supports_native_images(self) -> bool {
        self == Self::Kitty
    }
}

/// Size of the connected terminal in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalGeometry {
    pub width: usize,
    pub height: usize,
}

impl TerminalGeometry {
    /// Used when the terminal size cannot be queried
    pub const FALLBACK: Self = Self {
        width: 120,
        height: 30,
    };

    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Query the terminal, falling back to 120x30
    pub fn probe() -> Self {
        match crossterm::terminal::size() {
            Ok((cols, rows)) if cols > 0 && rows > 0 => Self::new(cols.into(), rows.into()),
            Ok(_) => Self::FALLBACK,
            Err(e) => {
                debug!("terminal size unavailable, using fallback: {}", e);
                Self::FALLBACK
            }
        }
    }
}

impl Default for TerminalGeometry {
    fn default() -> Self {
        Self::FALLBACK
    }
}
