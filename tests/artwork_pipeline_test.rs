//! End-to-end tests for the artwork pipeline.
//!
//! Origin string in, rendered pane out, with a fetcher that counts attempts.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use bass_senpai::artwork::{
    frame, rasterize_file, ArtworkCache, ArtworkFetcher, ArtworkOrigin, ArtworkRenderer,
    ArtworkSize, HalfBlockRasterizer, OriginKind,
};
use bass_senpai::errors::ArtworkError;
use bass_senpai::text::visible_width;
use image::{DynamicImage, Rgb, RgbImage};
use regex::Regex;
use tempfile::TempDir;

/// Reads local files and counts every call
#[derive(Clone, Default)]
struct CountingFetcher {
    calls: Arc<AtomicUsize>,
}

impl CountingFetcher {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ArtworkFetcher for CountingFetcher {
    fn fetch(&self, origin: &ArtworkOrigin) -> Result<Vec<u8>, ArtworkError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match origin.kind() {
            OriginKind::Local(path) => {
                std::fs::read(&path).map_err(|source| ArtworkError::LocalRead { path, source })
            }
            _ => Err(ArtworkError::UnsupportedOrigin(origin.to_string())),
        }
    }
}

fn solid_red_png(dir: &Path) -> PathBuf {
    let path = dir.join("red.png");
    DynamicImage::ImageRgb8(RgbImage::from_pixel(100, 100, Rgb([255, 0, 0])))
        .save(&path)
        .expect("write png");
    path
}

fn cell_colors(line: &str) -> Vec<((u8, u8, u8), (u8, u8, u8))> {
    let re = Regex::new(
        r"\x1b\[38;2;(\d+);(\d+);(\d+)m\x1b\[48;2;(\d+);(\d+);(\d+)m▀\x1b\[0m",
    )
    .expect("regex");
    re.captures_iter(line)
        .map(|c| {
            let n = |i: usize| c[i].parse::<u8>().expect("u8");
            ((n(1), n(2), n(3)), (n(4), n(5), n(6)))
        })
        .collect()
}

// ==================== Block Art ====================

#[test]
fn test_solid_red_block_art_from_file() {
    let dir = TempDir::new().expect("tempdir");
    let png = solid_red_png(dir.path());

    let out = rasterize_file(&HalfBlockRasterizer::new(), &png, ArtworkSize::new(10, 5))
        .expect("rasterize");
    let lines: Vec<&str> = out.split('\n').collect();

    assert_eq!(lines.len(), 7);
    assert!(lines.iter().all(|l| visible_width(l) == 12));
    for line in &lines[1..6] {
        let cells = cell_colors(line);
        assert_eq!(cells.len(), 10);
        assert!(cells.iter().all(|&(fg, bg)| fg == (255, 0, 0) && bg == (255, 0, 0)));
    }
}

#[test]
fn test_solid_red_through_cache() {
    let dir = TempDir::new().expect("tempdir");
    let png = solid_red_png(dir.path());
    let fetcher = CountingFetcher::default();
    let cache = ArtworkCache::new(dir.path().join("cache"), Box::new(fetcher.clone()))
        .expect("cache");
    let mut renderer = ArtworkRenderer::new(cache, false);

    let origin = png.to_string_lossy().into_owned();
    let out = renderer.render(Some(&origin), ArtworkSize::new(10, 5));
    let lines: Vec<&str> = out.split('\n').collect();

    assert_eq!(lines.len(), 7);
    assert!(lines.iter().all(|l| visible_width(l) == 12));
    // JPEG normalization is lossy; solid red survives within a small tolerance
    for line in &lines[1..6] {
        let cells = cell_colors(line);
        assert_eq!(cells.len(), 10);
        for (fg, bg) in cells {
            assert_eq!(fg, bg);
            assert!(fg.0 >= 250 && fg.1 <= 5 && fg.2 <= 5, "not red: {:?}", fg);
        }
    }
    assert_eq!(fetcher.calls(), 1);
}

#[test]
fn test_block_art_shape_for_various_sizes() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("wide.png");
    DynamicImage::ImageRgb8(RgbImage::from_fn(37, 11, |x, y| Rgb([x as u8 * 6, y as u8 * 20, 90])))
        .save(&path)
        .expect("write png");

    for (w, h) in [(1, 1), (3, 7), (20, 10), (40, 20)] {
        let out = rasterize_file(&HalfBlockRasterizer::new(), &path, ArtworkSize::new(w, h))
            .expect("rasterize");
        let lines: Vec<&str> = out.split('\n').collect();
        assert_eq!(lines.len(), h as usize + 2);
        assert!(lines.iter().all(|l| visible_width(l) == w as usize + 2));
    }
}

// ==================== Placeholder ====================

#[test]
fn test_absent_origin_is_placeholder_40x20() {
    let dir = TempDir::new().expect("tempdir");
    let cache =
        ArtworkCache::new(dir.path(), Box::new(CountingFetcher::default())).expect("cache");
    let mut renderer = ArtworkRenderer::new(cache, false);

    let size = ArtworkSize::new(40, 20);
    let out = renderer.render(None, size);
    assert_eq!(out, frame::placeholder(size));

    let lines: Vec<&str> = out.split('\n').collect();
    assert_eq!(lines.len(), 22);
    // line 11, 1-indexed
    assert_eq!(lines[10], format!("║{}No Artwork{}║", " ".repeat(15), " ".repeat(15)));
    assert!(lines
        .iter()
        .enumerate()
        .all(|(i, l)| i == 10 || !l.contains("No Artwork")));
}

#[test]
fn test_placeholder_matches_block_art_contract() {
    for (w, h) in [(1, 1), (2, 9), (9, 2), (10, 1), (30, 15)] {
        let out = frame::placeholder(ArtworkSize::new(w, h));
        let lines: Vec<&str> = out.split('\n').collect();
        assert_eq!(lines.len(), h as usize + 2);
        assert!(lines.iter().all(|l| visible_width(l) == w as usize + 2));
    }
}

#[test]
fn test_undecodable_artwork_is_placeholder() {
    let dir = TempDir::new().expect("tempdir");
    let bogus = dir.path().join("cover.jpg");
    std::fs::write(&bogus, b"definitely not a jpeg").expect("write");

    let fetcher = CountingFetcher::default();
    let cache_dir = dir.path().join("cache");
    let cache = ArtworkCache::new(&cache_dir, Box::new(fetcher.clone())).expect("cache");
    let mut renderer = ArtworkRenderer::new(cache, true);

    let size = ArtworkSize::new(8, 4);
    let origin = bogus.to_string_lossy().into_owned();
    assert_eq!(renderer.render(Some(&origin), size), frame::placeholder(size));
    assert_eq!(std::fs::read_dir(&cache_dir).expect("read dir").count(), 0);
    assert_eq!(fetcher.calls(), 1);
}

#[test]
fn test_corrupt_cache_entry_is_refetched() {
    let dir = TempDir::new().expect("tempdir");
    let png = solid_red_png(dir.path());
    let fetcher = CountingFetcher::default();
    let cache = ArtworkCache::new(dir.path().join("cache"), Box::new(fetcher.clone()))
        .expect("cache");
    let mut renderer = ArtworkRenderer::new(cache, false);

    let origin = png.to_string_lossy().into_owned();
    let entry = renderer.cache().cache_path(&origin);
    std::fs::write(&entry, b"truncated jpeg").expect("write");

    let size = ArtworkSize::new(10, 5);
    assert_eq!(renderer.render(Some(&origin), size), frame::placeholder(size));
    assert!(!entry.exists());
    assert_eq!(fetcher.calls(), 0);

    // next update goes back to the source and draws real art
    let out = renderer.render(Some(&origin), size);
    let lines: Vec<&str> = out.split('\n').collect();
    assert_eq!(lines.len(), 7);
    assert_eq!(cell_colors(lines[1]).len(), 10);
    assert!(entry.exists());
    assert_eq!(fetcher.calls(), 1);
}

// ==================== Cache Memo ====================

#[test]
fn test_repeat_resolve_does_not_refetch() {
    let dir = TempDir::new().expect("tempdir");
    let png = solid_red_png(dir.path());
    let fetcher = CountingFetcher::default();
    let mut cache =
        ArtworkCache::new(dir.path().join("cache"), Box::new(fetcher.clone())).expect("cache");

    let origin = png.to_string_lossy().into_owned();
    let first = cache.resolve(Some(&origin)).expect("resolve").expect("path");
    let second = cache.resolve(Some(&origin)).expect("resolve").expect("path");

    assert_eq!(first, second);
    assert_eq!(fetcher.calls(), 1);
}

#[test]
fn test_absent_origin_clears_memo() {
    let dir = TempDir::new().expect("tempdir");
    let png = solid_red_png(dir.path());
    let fetcher = CountingFetcher::default();
    let mut cache =
        ArtworkCache::new(dir.path().join("cache"), Box::new(fetcher.clone())).expect("cache");

    let origin = png.to_string_lossy().into_owned();
    let path = cache.resolve(Some(&origin)).expect("resolve").expect("path");
    assert!(cache.resolve(None).expect("resolve").is_none());
    assert!(cache.resolve(Some("")).expect("resolve").is_none());

    // the cached file is gone, so the next resolve has to go back to the source
    std::fs::remove_file(&path).expect("remove");
    let again = cache.resolve(Some(&origin)).expect("resolve").expect("path");

    assert_eq!(again, path);
    assert!(again.exists());
    assert_eq!(fetcher.calls(), 2);
}

#[test]
fn test_fetch_failure_reports_cause() {
    let dir = TempDir::new().expect("tempdir");
    let mut cache =
        ArtworkCache::new(dir.path(), Box::new(CountingFetcher::default())).expect("cache");

    let missing = dir.path().join("missing.png");
    let err = cache
        .resolve(Some(&missing.to_string_lossy()))
        .expect_err("missing file");
    assert_eq!(err.kind(), "local-read");

    let err = cache
        .resolve(Some("https://example.invalid/cover.jpg"))
        .expect_err("stub refuses remote");
    assert!(matches!(err, ArtworkError::UnsupportedOrigin(_)));
}
