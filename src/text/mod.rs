//! Terminal text helpers: escape vocabulary and display width

pub mod ansi;
pub mod width;

pub use width::{strip_escapes, truncate_to_width, visible_width, VisibleChars};
