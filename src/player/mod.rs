//! Media player metadata
//!
//! Metadata comes from the `playerctl` command line tool, polled once per
//! tick. Parsing is kept separate from the subprocess so it can be tested
//! without a player.

mod metadata;
mod playerctl;

pub use metadata::{PlaybackStatus, TrackMetadata};
pub use playerctl::{PlayerctlClient, METADATA_FORMAT};
