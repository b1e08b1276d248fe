//! Track metadata as reported by the player

use std::fmt;

/// Fields expected in one `playerctl metadata --format` line
pub const FIELD_COUNT: usize = 7;

/// Separator between formatted fields
pub const FIELD_SEPARATOR: char = '|';

pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const UNKNOWN_ALBUM: &str = "Unknown Album";

const MICROS_PER_SECOND: f64 = 1_000_000.0;

/// Playback state of the active player
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PlaybackStatus {
    Playing,
    Paused,
    #[default]
    Stopped,
    /// Any status string the player invents beyond the MPRIS three
    Other(String),
}

impl PlaybackStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "" | "Stopped" => Self::Stopped,
            "Playing" => Self::Playing,
            "Paused" => Self::Paused,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Playing => "Playing",
            Self::Paused => "Paused",
            Self::Stopped => "Stopped",
            Self::Other(s) => s,
        }
    }
}

impl fmt::Display for PlaybackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of the current track
#[derive(Debug, Clone, PartialEq)]
pub struct TrackMetadata {
    pub artist: String,
    pub title: String,
    pub album: String,
    pub status: PlaybackStatus,
    /// Seconds into the track
    pub position: f64,
    /// Track length in seconds, 0 when unknown
    pub length: f64,
    pub art_url: Option<String>,
}

impl Default for TrackMetadata {
    fn default() -> Self {
        Self {
            artist: UNKNOWN_ARTIST.to_string(),
            title: UNKNOWN_TITLE.to_string(),
            album: UNKNOWN_ALBUM.to_string(),
            status: PlaybackStatus::Stopped,
            position: 0.0,
            length: 0.0,
            art_url: None,
        }
    }
}

impl TrackMetadata {
    /// Parse one formatted metadata line
    ///
    /// Returns `None` for empty output or fewer than [`FIELD_COUNT`] fields.
    /// Fields past the seventh are ignored. Empty fields take their defaults,
    /// and an unparsable position or length resets both to zero.
    pub fn parse_line(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
        if fields.len() < FIELD_COUNT {
            return None;
        }

        let text_or = |value: &str, default: &str| {
            if value.is_empty() {
                default.to_string()
            } else {
                value.to_string()
            }
        };

        let (position, length) = match (micros_to_secs(fields[4]), micros_to_secs(fields[5])) {
            (Some(p), Some(l)) => (p, l),
            _ => (0.0, 0.0),
        };

        Some(Self {
            artist: text_or(fields[0], UNKNOWN_ARTIST),
            title: text_or(fields[1], UNKNOWN_TITLE),
            album: text_or(fields[2], UNKNOWN_ALBUM),
            status: PlaybackStatus::parse(fields[3]),
            position,
            length,
            art_url: Some(fields[6]).filter(|s| !s.is_empty()).map(str::to_string),
        })
    }

    /// Identity used to detect track changes
    pub fn track_id(&self) -> String {
        format!("{}|{}|{}", self.artist, self.title, self.album)
    }
}

/// Microsecond field to seconds; an empty field is zero
fn micros_to_secs(field: &str) -> Option<f64> {
    let field = field.trim();
    if field.is_empty() {
        return Some(0.0);
    }
    field.parse::<i64>().ok().map(|us| us as f64 / MICROS_PER_SECOND)
}
