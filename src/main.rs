use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use bass_senpai::artwork::{GraphicsMode, GraphicsProtocol};
use bass_senpai::config::{Config, Overrides};
use bass_senpai::player::PlayerctlClient;
use bass_senpai::App;
use clap::Parser;
use tracing_subscriber::EnvFilter;

const INSTALL_HINT: &str = "Please install playerctl to use bass-senpai.
  On Ubuntu/Debian: sudo apt install playerctl
  On Arch Linux:    sudo pacman -S playerctl
  On macOS:         brew install playerctl";

/// Terminal music status viewer with album artwork
#[derive(Debug, Parser)]
#[command(
    name = "bass-senpai",
    version,
    about,
    after_help = "Requires playerctl. Kitty, WezTerm or Ghostty show pixel-perfect artwork; \
                  other terminals get colored block art."
)]
struct Cli {
    /// Seconds between updates (minimum 0.1)
    #[arg(short, long, value_name = "SECONDS")]
    interval: Option<f64>,

    /// Directory for cached artwork
    #[arg(long, value_name = "DIR")]
    cache_dir: Option<PathBuf>,

    /// How to draw artwork
    #[arg(short, long, value_enum)]
    graphics: Option<GraphicsMode>,

    /// Only follow this player (playerctl --player)
    #[arg(short, long)]
    player: Option<String>,

    /// Config file to use instead of the default location
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log at info level
    #[arg(short, long)]
    verbose: bool,

    /// Log at debug level
    #[arg(long)]
    debug: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            interval_secs: self.interval,
            cache_dir: self.cache_dir.clone(),
            graphics: self.graphics,
            player: self.player.clone(),
        }
    }

    fn log_level(&self) -> tracing::Level {
        if self.debug {
            tracing::Level::DEBUG
        } else if self.verbose {
            tracing::Level::INFO
        } else {
            tracing::Level::WARN
        }
    }
}

/// stdout belongs to the dashboard, so logs go to a file or stderr
fn init_logging(level: tracing::Level, log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter = EnvFilter::from_default_env().add_directive(level.into());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false);

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Cannot open log file {}", path.display()))?;
            builder.with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref(), cli.overrides())?;
    init_logging(cli.log_level(), config.log_file.as_deref())?;

    tracing::info!("Starting bass-senpai version {}", env!("CARGO_PKG_VERSION"));
    tracing::debug!(?config, "configuration loaded");

    PlayerctlClient::new(config.player.clone())
        .ensure_available()
        .await
        .context(INSTALL_HINT)?;

    let protocol = GraphicsProtocol::detect();
    let app = tokio::task::block_in_place(|| App::new(&config, protocol))?;

    match app.run().await {
        Ok(()) => {
            tracing::info!("bass-senpai stopped normally");
            Ok(())
        }
        Err(e) => {
            tracing::error!("bass-senpai error: {}", e);
            Err(e.into())
        }
    }
}
