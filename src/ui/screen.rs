//! Terminal setup, teardown and full-frame redraws
//!
//! No alternate screen and no raw mode: the dashboard is redrawn in place
//! from the home position, and the terminal is handed back with the cursor
//! visible and a goodbye line.
//!
//! Critical: installs a panic hook that shows the cursor again.

use std::io::{self, Write};
use std::panic;

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::Print,
    terminal::{Clear, ClearType},
};

use crate::errors::{Result, SenpaiError};
use crate::text::ansi::kitty;

pub const GOODBYE: &str = "Bass-senpai stopped.";

/// Restore the cursor before the panic message is printed
fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = execute!(io::stdout(), Show);
        original_hook(panic_info);
    }));
}

/// Owns the output stream for the lifetime of the dashboard
pub struct Screen<W: Write> {
    out: W,
    native_images: bool,
}

impl Screen<io::Stdout> {
    /// Take over stdout
    pub fn stdout(native_images: bool) -> Result<Self> {
        install_panic_hook();
        Self::enter(io::stdout(), native_images)
    }
}

impl<W: Write> Screen<W> {
    /// Clear the screen and hide the cursor
    pub fn enter(mut out: W, native_images: bool) -> Result<Self> {
        execute!(out, Clear(ClearType::All), MoveTo(0, 0), Hide)
            .map_err(SenpaiError::TerminalError)?;
        Ok(Self { out, native_images })
    }

    /// Redraw from the home position and clear whatever the last frame left
    pub fn draw(&mut self, frame: &str) -> Result<()> {
        queue!(
            self.out,
            MoveTo(0, 0),
            Print(frame),
            Clear(ClearType::FromCursorDown)
        )
        .map_err(SenpaiError::TerminalError)?;
        self.out.flush().map_err(SenpaiError::TerminalError)
    }

    /// Hand the terminal back
    pub fn leave(mut self) -> Result<W> {
        if self.native_images {
            queue!(self.out, Print(kitty::DELETE_ALL)).map_err(SenpaiError::TerminalError)?;
        }
        execute!(
            self.out,
            Show,
            Clear(ClearType::All),
            MoveTo(0, 0),
            Print(format!("{}\n", GOODBYE))
        )
        .map_err(SenpaiError::TerminalError)?;
        Ok(self.out)
    }
}
