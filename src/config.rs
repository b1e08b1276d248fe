//! Configuration
//!
//! Optional TOML file under the platform config directory, overridden by
//! command-line flags.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::Deserialize;

use crate::artwork::{GraphicsMode, DEFAULT_JPEG_QUALITY};
use crate::errors::{Result, SenpaiError};

/// Shortest accepted update interval
pub const MIN_INTERVAL_SECS: f64 = 0.1;

pub const DEFAULT_INTERVAL_SECS: f64 = 1.0;
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 5;

/// Contents of `config.toml`; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub interval_secs: Option<f64>,
    pub cache_dir: Option<String>,
    pub graphics: Option<GraphicsMode>,
    pub player: Option<String>,
    pub fetch_timeout_secs: Option<u64>,
    pub jpeg_quality: Option<u8>,
    pub log_file: Option<String>,
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub interval_secs: Option<f64>,
    pub cache_dir: Option<PathBuf>,
    pub graphics: Option<GraphicsMode>,
    pub player: Option<String>,
}

/// Resolved settings
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub interval: Duration,
    pub cache_dir: PathBuf,
    pub graphics: GraphicsMode,
    pub player: Option<String>,
    pub fetch_timeout: Duration,
    pub jpeg_quality: u8,
    pub log_file: Option<PathBuf>,
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "bass-senpai")
}

/// Default location of `config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Default artwork cache root
pub fn default_cache_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.cache_dir().join("artwork"))
        .unwrap_or_else(|| std::env::temp_dir().join("bass-senpai").join("artwork"))
}

fn expand_path(raw: &str) -> Result<PathBuf> {
    shellexpand::full(raw)
        .map(|expanded| PathBuf::from(expanded.into_owned()))
        .map_err(|e| SenpaiError::ConfigurationError(format!("Cannot expand path {raw:?}: {e}")))
}

fn validate_interval(secs: f64) -> Result<Duration> {
    let invalid = || {
        SenpaiError::ConfigurationError(format!(
            "Update interval must be at least {MIN_INTERVAL_SECS}s, got {secs}"
        ))
    };
    if secs.is_nan() || secs < MIN_INTERVAL_SECS {
        return Err(invalid());
    }
    Duration::try_from_secs_f64(secs).map_err(|_| invalid())
}

impl FileConfig {
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| SenpaiError::ConfigurationError(format!("Invalid TOML config: {e}")))
    }

    /// Read a config file; a missing file yields the empty config
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|e| {
            SenpaiError::ConfigurationError(format!(
                "Failed to read config {}: {e}",
                path.display()
            ))
        })?;
        Self::parse(&content)
    }
}

impl Config {
    /// Merge file values with command-line overrides
    pub fn resolve(file: FileConfig, cli: Overrides) -> Result<Self> {
        let interval = validate_interval(
            cli.interval_secs
                .or(file.interval_secs)
                .unwrap_or(DEFAULT_INTERVAL_SECS),
        )?;

        let cache_dir = match (cli.cache_dir, file.cache_dir) {
            (Some(dir), _) => dir,
            (None, Some(raw)) => expand_path(&raw)?,
            (None, None) => default_cache_dir(),
        };

        let log_file = file.log_file.as_deref().map(expand_path).transpose()?;

        Ok(Self {
            interval,
            cache_dir,
            graphics: cli.graphics.or(file.graphics).unwrap_or_default(),
            player: cli.player.or(file.player),
            fetch_timeout: Duration::from_secs(
                file.fetch_timeout_secs.unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS),
            ),
            jpeg_quality: file.jpeg_quality.unwrap_or(DEFAULT_JPEG_QUALITY),
            log_file,
        })
    }

    /// Load from `path` (or the default location) and apply overrides
    pub fn load(path: Option<&Path>, cli: Overrides) -> Result<Self> {
        let file = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(SenpaiError::ConfigurationError(format!(
                        "Config file {} does not exist",
                        path.display()
                    )));
                }
                FileConfig::load(path)?
            }
            None => match default_config_path() {
                Some(path) => FileConfig::load(&path)?,
                None => FileConfig::default(),
            },
        };
        Self::resolve(file, cli)
    }
}
