//! Artwork origins and the byte fetchers behind them

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::debug;
use url::Url;

use crate::errors::ArtworkError;

/// Opaque string naming where artwork comes from
///
/// Players report either a `file://` URL, a plain path or an `http(s)://`
/// URL. The string itself is the cache key; [`ArtworkOrigin::kind`] only
/// decides how to fetch it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtworkOrigin(String);

/// How an origin is fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OriginKind {
    /// Read from the local filesystem
    Local(PathBuf),
    /// Download over HTTP(S)
    Remote(Url),
    /// Some other URL scheme
    Unsupported,
}

impl ArtworkOrigin {
    pub fn new(origin: impl Into<String>) -> Self {
        Self(origin.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn kind(&self) -> OriginKind {
        match Url::parse(&self.0) {
            Ok(url) => match url.scheme() {
                "file" => url
                    .to_file_path()
                    .map_or(OriginKind::Unsupported, OriginKind::Local),
                "http" | "https" => OriginKind::Remote(url),
                _ => OriginKind::Unsupported,
            },
            // Not a URL at all: a plain filesystem path
            Err(_) => OriginKind::Local(PathBuf::from(&self.0)),
        }
    }
}

impl std::fmt::Display for ArtworkOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Source of raw artwork bytes
///
/// The cache only calls this on a miss, which makes it the seam tests use to
/// count fetch attempts.
pub trait ArtworkFetcher: Send {
    fn fetch(&self, origin: &ArtworkOrigin) -> Result<Vec<u8>, ArtworkError>;
}

/// Reads local files directly and downloads remote artwork with a timeout
#[derive(Debug, Clone)]
pub struct DefaultFetcher {
    client: reqwest::blocking::Client,
}

impl DefaultFetcher {
    /// Default network timeout for remote artwork
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("bass-senpai/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    fn read_local(path: &Path) -> Result<Vec<u8>, ArtworkError> {
        std::fs::read(path).map_err(|source| ArtworkError::LocalRead {
            path: path.to_path_buf(),
            source,
        })
    }

    fn download(&self, url: &Url) -> Result<Vec<u8>, ArtworkError> {
        let fetch_error = |e: reqwest::Error| ArtworkError::Fetch {
            url: url.to_string(),
            message: e.to_string(),
        };

        let response = self.client.get(url.as_str()).send().map_err(fetch_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ArtworkError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().map_err(fetch_error)?;
        debug!(%url, bytes = bytes.len(), "downloaded artwork");
        Ok(bytes.to_vec())
    }
}

impl ArtworkFetcher for DefaultFetcher {
    fn fetch(&self, origin: &ArtworkOrigin) -> Result<Vec<u8>, ArtworkError> {
        match origin.kind() {
            OriginKind::Local(path) => Self::read_local(&path),
            OriginKind::Remote(url) => self.download(&url),
            OriginKind::Unsupported => Err(ArtworkError::UnsupportedOrigin(origin.to_string())),
        }
    }
}
