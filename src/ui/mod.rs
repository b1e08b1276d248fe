//! Dashboard UI
//!
//! - [`panel`] renders the track pane
//! - [`dashboard`] joins header, track pane and artwork into a frame
//! - [`screen`] writes frames to the terminal

pub mod dashboard;
pub mod panel;
pub mod screen;

pub use dashboard::Dashboard;
pub use screen::Screen;
