use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while fetching, normalizing or rendering artwork
///
/// None of these reach the user as text: the renderer turns every one of
/// them into the next fallback tier and the placeholder box is the signal.
#[derive(Error, Debug)]
pub enum ArtworkError {
    /// The origin string is neither a local path nor an http(s) URL
    #[error("Unsupported artwork origin: {0}")]
    UnsupportedOrigin(String),

    /// A local artwork file could not be read
    #[error("Failed to read artwork file {path}: {source}")]
    LocalRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Transport failure or timeout while downloading artwork
    #[error("Failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    /// The server answered with a non-success status
    #[error("Fetching {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// The bytes are not an image we can decode
    #[error("Failed to decode artwork: {0}")]
    Decode(#[source] image::ImageError),

    /// Producing the output raster or payload failed
    #[error("Failed to encode artwork: {0}")]
    Encode(String),

    /// Cache directory I/O
    #[error("Artwork cache I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ArtworkError {
    /// Short, stable label for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnsupportedOrigin(_) => "unsupported-origin",
            Self::LocalRead { .. } => "local-read",
            Self::Fetch { .. } => "fetch",
            Self::HttpStatus { .. } => "http-status",
            Self::Decode(_) => "decode",
            Self::Encode(_) => "encode",
            Self::Io(_) => "io",
        }
    }
}

/// Errors that can occur in the bass-senpai application
#[derive(Error, Debug)]
pub enum SenpaiError {
    /// Configuration file or command-line value is invalid
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// The metadata command is not installed or not runnable
    #[error("Player command `{command}` is not available: {message}")]
    PlayerUnavailable { command: String, message: String },

    /// Writing to the terminal failed
    #[error("Terminal error: {0}")]
    TerminalError(#[source] std::io::Error),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Type alias for Result with SenpaiError
pub type Result<T> = std::result::Result<T, SenpaiError>;
