//! On-disk artwork cache
//!
//! Every distinct origin string maps to `<cache_dir>/<sha256(origin)>.jpg`.
//! Entries are written once, after the fetched bytes decode successfully.
//! They never expire; the only eviction is of an entry that can no longer
//! be decoded, see [`ArtworkCache::evict`].

use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use super::fetch::{ArtworkFetcher, ArtworkOrigin};
use crate::errors::ArtworkError;

/// JPEG quality used when normalizing fetched artwork
pub const DEFAULT_JPEG_QUALITY: u8 = 85;

/// The most recently resolved origin and where it landed
#[derive(Debug, Clone)]
struct LastResolved {
    origin: String,
    path: PathBuf,
}

/// Maps artwork origins to normalized JPEG files on disk
pub struct ArtworkCache {
    cache_dir: PathBuf,
    fetcher: Box<dyn ArtworkFetcher>,
    jpeg_quality: u8,
    last: Option<LastResolved>,
}

impl std::fmt::Debug for ArtworkCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtworkCache")
            .field("cache_dir", &self.cache_dir)
            .field("jpeg_quality", &self.jpeg_quality)
            .field("last", &self.last)
            .finish_non_exhaustive()
    }
}

impl ArtworkCache {
    /// Create a cache rooted at `cache_dir`, creating the directory if needed
    pub fn new(
        cache_dir: impl Into<PathBuf>,
        fetcher: Box<dyn ArtworkFetcher>,
    ) -> Result<Self, ArtworkError> {
        let cache_dir = cache_dir.into();
        std::fs::create_dir_all(&cache_dir)?;
        Ok(Self {
            cache_dir,
            fetcher,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            last: None,
        })
    }

    /// Override the JPEG quality (clamped to 1..=100)
    #[must_use]
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.clamp(1, 100);
        self
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Hex SHA-256 of the origin string
    pub fn fingerprint(origin: &str) -> String {
        format!("{:x}", Sha256::digest(origin.as_bytes()))
    }

    /// Path the given origin is (or would be) cached at
    pub fn cache_path(&self, origin: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.jpg", Self::fingerprint(origin)))
    }

    /// Resolve an origin to a cached JPEG, fetching and normalizing on a miss
    ///
    /// `Ok(None)` means there is no artwork to show. An empty origin also
    /// forgets the previously resolved one so stale art cannot leak into the
    /// next track.
    pub fn resolve(&mut self, origin: Option<&str>) -> Result<Option<PathBuf>, ArtworkError> {
        let Some(origin) = origin.filter(|o| !o.is_empty()) else {
            self.last = None;
            return Ok(None);
        };

        if let Some(last) = &self.last {
            if last.origin == origin && last.path.exists() {
                return Ok(Some(last.path.clone()));
            }
        }

        match self.lookup_or_fetch(origin) {
            Ok(path) => {
                self.last = Some(LastResolved {
                    origin: origin.to_string(),
                    path: path.clone(),
                });
                Ok(Some(path))
            }
            Err(err) => {
                self.last = None;
                Err(err)
            }
        }
    }

    fn lookup_or_fetch(&self, origin: &str) -> Result<PathBuf, ArtworkError> {
        let path = self.cache_path(origin);
        if path.exists() {
            debug!(origin, path = %path.display(), "artwork cache hit");
            return Ok(path);
        }

        let bytes = self.fetcher.fetch(&ArtworkOrigin::new(origin))?;
        self.store(&bytes, &path)?;
        info!(origin, path = %path.display(), "cached new artwork");
        Ok(path)
    }

    /// Remove a cached file and forget it if it was the last one resolved
    ///
    /// A missing file is not an error. Other failures are logged and left
    /// for the next attempt.
    pub fn evict(&mut self, path: &Path) {
        if self.last.as_ref().is_some_and(|last| last.path.as_path() == path) {
            self.last = None;
        }
        match std::fs::remove_file(path) {
            Ok(()) => info!(path = %path.display(), "evicted cached artwork"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %path.display(), "cannot evict cached artwork: {}", e),
        }
    }

    /// Decode `bytes`, drop any alpha channel and persist as JPEG
    ///
    /// The encoded file is written to a temporary file in the cache directory
    /// and renamed into place, so a partially written entry is never visible.
    fn store(&self, bytes: &[u8], path: &Path) -> Result<(), ArtworkError> {
        let rgb = image::load_from_memory(bytes)
            .map_err(ArtworkError::Decode)?
            .to_rgb8();

        let mut tmp = tempfile::Builder::new()
            .prefix(".incoming-")
            .suffix(".jpg")
            .tempfile_in(&self.cache_dir)?;
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            JpegEncoder::new_with_quality(&mut writer, self.jpeg_quality)
                .encode_image(&rgb)
                .map_err(|e| ArtworkError::Encode(e.to_string()))?;
            writer.flush()?;
        }
        tmp.persist(path).map_err(|e| ArtworkError::Io(e.error))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
    use std::io::Cursor;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tempfile::TempDir;

    /// Serves fixed bytes (or a failure) and counts calls
    struct StubFetcher {
        calls: Arc<AtomicUsize>,
        bytes: Option<Vec<u8>>,
    }

    impl ArtworkFetcher for StubFetcher {
        fn fetch(&self, origin: &ArtworkOrigin) -> Result<Vec<u8>, ArtworkError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.bytes.clone().ok_or_else(|| ArtworkError::Fetch {
                url: origin.to_string(),
                message: "connection refused".to_string(),
            })
        }
    }

    fn png_bytes(image: DynamicImage) -> Vec<u8> {
        let mut buf = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    fn red_png() -> Vec<u8> {
        png_bytes(DynamicImage::ImageRgb8(RgbImage::from_pixel(
            8,
            6,
            Rgb([255, 0, 0]),
        )))
    }

    fn cache_with(dir: &TempDir, bytes: Option<Vec<u8>>) -> (ArtworkCache, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let fetcher = StubFetcher {
            calls: Arc::clone(&calls),
            bytes,
        };
        let cache = ArtworkCache::new(dir.path().join("artwork"), Box::new(fetcher)).unwrap();
        (cache, calls)
    }

    #[test]
    fn test_new_creates_directory() {
        let dir = TempDir::new().unwrap();
        let (cache, _) = cache_with(&dir, None);
        assert!(cache.cache_dir().is_dir());
    }

    #[test]
    fn test_fingerprint_is_stable_and_distinct() {
        let a = ArtworkCache::fingerprint("https://example.com/a.jpg");
        assert_eq!(a, ArtworkCache::fingerprint("https://example.com/a.jpg"));
        assert_ne!(a, ArtworkCache::fingerprint("https://example.com/b.jpg"));
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_repeat_resolve_uses_memo() {
        let dir = TempDir::new().unwrap();
        let (mut cache, calls) = cache_with(&dir, Some(red_png()));

        let first = cache.resolve(Some("https://example.com/a.jpg")).unwrap();
        let second = cache.resolve(Some("https://example.com/a.jpg")).unwrap();

        assert!(first.is_some());
        assert_eq!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_empty_origin_clears_memo() {
        let dir = TempDir::new().unwrap();
        let (mut cache, calls) = cache_with(&dir, Some(red_png()));

        let path = cache.resolve(Some("art")).unwrap().unwrap();
        assert_eq!(cache.resolve(Some("")).unwrap(), None);
        assert_eq!(cache.resolve(None).unwrap(), None);

        // Re-resolution goes back to disk and notices the file is gone
        std::fs::remove_file(&path).unwrap();
        let again = cache.resolve(Some("art")).unwrap().unwrap();
        assert_eq!(again, path);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_disk_hit_across_instances() {
        let dir = TempDir::new().unwrap();
        let (mut first, first_calls) = cache_with(&dir, Some(red_png()));
        first.resolve(Some("https://example.com/a.jpg")).unwrap();
        assert_eq!(first_calls.load(Ordering::SeqCst), 1);

        let (mut second, second_calls) = cache_with(&dir, None);
        let path = second.resolve(Some("https://example.com/a.jpg")).unwrap();
        assert!(path.is_some());
        assert_eq!(second_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_normalized_file_is_rgb_jpeg() {
        let dir = TempDir::new().unwrap();
        let rgba = DynamicImage::ImageRgba8(RgbaImage::from_pixel(5, 7, Rgba([0, 0, 255, 40])));
        let (mut cache, _) = cache_with(&dir, Some(png_bytes(rgba)));

        let path = cache.resolve(Some("with-alpha")).unwrap().unwrap();
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("jpg"));

        let decoded = image::open(&path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (5, 7));
        assert!(!decoded.color().has_alpha());
    }

    #[test]
    fn test_decode_failure_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let (mut cache, _) = cache_with(&dir, Some(b"<html>not an image</html>".to_vec()));

        let err = cache.resolve(Some("broken")).unwrap_err();
        assert_eq!(err.kind(), "decode");
        assert!(!cache.cache_path("broken").exists());
        assert_eq!(std::fs::read_dir(cache.cache_dir()).unwrap().count(), 0);
    }

    #[test]
    fn test_fetch_failure_reports_cause_and_retries() {
        let dir = TempDir::new().unwrap();
        let (mut cache, calls) = cache_with(&dir, None);

        let err = cache.resolve(Some("https://example.com/down.jpg")).unwrap_err();
        assert_eq!(err.kind(), "fetch");
        // A failed resolution is not remembered
        assert!(cache.resolve(Some("https://example.com/down.jpg")).is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_evict_forgets_and_refetches() {
        let dir = TempDir::new().unwrap();
        let (mut cache, calls) = cache_with(&dir, Some(red_png()));

        let path = cache.resolve(Some("art")).unwrap().unwrap();
        cache.evict(&path);
        assert!(!path.exists());
        // Evicting twice is harmless
        cache.evict(&path);

        assert_eq!(cache.resolve(Some("art")).unwrap(), Some(path.clone()));
        assert!(path.exists());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_distinct_origins_get_distinct_files() {
        let dir = TempDir::new().unwrap();
        let (mut cache, calls) = cache_with(&dir, Some(red_png()));

        let a = cache.resolve(Some("one")).unwrap().unwrap();
        let b = cache.resolve(Some("two")).unwrap().unwrap();
        assert_ne!(a, b);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
