//! # bass-senpai
//!
//! A terminal music status viewer. Track information from the active media
//! player (via `playerctl`) is shown on the left; the album artwork is shown
//! on the right, either as a native Kitty graphics image or as colored
//! Unicode block art.
//!
//! The rendering core is synchronous:
//! - [`artwork`] caches, fetches and rasterizes cover art
//! - [`text`] measures the visible width of strings with escape sequences
//! - [`layout`] composes the two panes side by side
//!
//! [`app`] drives it from a Tokio update loop.

pub mod app;
pub mod artwork;
pub mod config;
pub mod errors;
pub mod layout;
pub mod player;
pub mod text;
pub mod ui;

pub use app::App;
pub use config::Config;
pub use errors::{ArtworkError, Result, SenpaiError};
