//! Update loop
//!
//! One tick: poll the player, sample the terminal size, build a frame and
//! draw it. Frame building touches the disk cache and the network, so it
//! runs inside `block_in_place` on the multi-threaded runtime.

use std::time::Duration;

use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::artwork::{
    ArtworkCache, ArtworkRenderer, DefaultFetcher, GraphicsProtocol, TerminalGeometry,
};
use crate::config::Config;
use crate::errors::{Result, SenpaiError};
use crate::player::{PlayerctlClient, TrackMetadata};
use crate::ui::{Dashboard, Screen};

/// Remembers the last track so changes can be reported once
#[derive(Debug, Default)]
pub struct TrackTracker {
    last_id: Option<String>,
}

impl TrackTracker {
    /// Returns true when the track differs from the previous observation
    pub fn observe(&mut self, metadata: Option<&TrackMetadata>) -> bool {
        let id = metadata.map(TrackMetadata::track_id);
        if id == self.last_id {
            return false;
        }

        match &id {
            Some(id) => info!(track = %id, "track changed"),
            None => info!("player went away"),
        }
        self.last_id = id;
        true
    }

    pub fn current(&self) -> Option<&str> {
        self.last_id.as_deref()
    }
}

/// The running dashboard
#[derive(Debug)]
pub struct App {
    interval: Duration,
    player: PlayerctlClient,
    dashboard: Dashboard,
    tracker: TrackTracker,
}

impl App {
    /// Build the app from resolved settings
    ///
    /// Creates the blocking HTTP client, so call it outside async code or
    /// inside `block_in_place`.
    pub fn new(config: &Config, protocol: GraphicsProtocol) -> Result<Self> {
        let fetcher = DefaultFetcher::new(config.fetch_timeout).map_err(|e| {
            SenpaiError::ConfigurationError(format!("Cannot create HTTP client: {e}"))
        })?;
        let cache = ArtworkCache::new(&config.cache_dir, Box::new(fetcher))
            .map_err(|e| {
                SenpaiError::ConfigurationError(format!(
                    "Cannot use cache directory {}: {e}",
                    config.cache_dir.display()
                ))
            })?
            .with_jpeg_quality(config.jpeg_quality);

        let native = config.graphics.use_native(protocol);
        debug!(
            ?protocol,
            graphics = ?config.graphics,
            native,
            cache_dir = %config.cache_dir.display(),
            "artwork renderer configured"
        );

        Ok(Self::with_parts(
            config.interval,
            PlayerctlClient::new(config.player.clone()),
            Dashboard::new(ArtworkRenderer::new(cache, native)),
        ))
    }

    pub fn with_parts(interval: Duration, player: PlayerctlClient, dashboard: Dashboard) -> Self {
        Self {
            interval,
            player,
            dashboard,
            tracker: TrackTracker::default(),
        }
    }

    pub fn native_images(&self) -> bool {
        self.dashboard.artwork().native_enabled()
    }

    /// Build the frame for one observation
    pub fn render(&mut self, metadata: Option<&TrackMetadata>, geometry: TerminalGeometry) -> String {
        self.tracker.observe(metadata);
        self.dashboard.frame(metadata, geometry)
    }

    /// Run until Ctrl-C or SIGTERM
    ///
    /// Requires the multi-threaded runtime.
    pub async fn run(mut self) -> Result<()> {
        let mut screen = Screen::stdout(self.native_images())?;
        let mut ticker = interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let shutdown = shutdown_signal();
        tokio::pin!(shutdown);

        info!(interval = ?self.interval, "dashboard started");

        let result = loop {
            tokio::select! {
                () = &mut shutdown => break Ok(()),
                _ = ticker.tick() => {
                    let metadata = self.player.poll().await;
                    let geometry = TerminalGeometry::probe();
                    let frame = tokio::task::block_in_place(|| {
                        self.render(metadata.as_ref(), geometry)
                    });
                    if let Err(e) = screen.draw(&frame) {
                        warn!("draw failed: {}", e);
                        break Err(e);
                    }
                }
            }
        };

        info!("shutting down");
        screen.leave()?;

        // The HTTP client owns a runtime of its own; drop it where blocking is allowed
        tokio::task::block_in_place(move || drop(self));
        result
    }
}

/// Resolves on Ctrl-C, or SIGTERM on Unix
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("cannot listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("cannot listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
