//! `playerctl` subprocess client

use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, trace};

use super::metadata::TrackMetadata;
use crate::errors::{Result, SenpaiError};

/// MPRIS fields requested from playerctl, in [`TrackMetadata::parse_line`] order
pub const METADATA_FORMAT: &str =
    "{{artist}}|{{title}}|{{album}}|{{status}}|{{position}}|{{mpris:length}}|{{mpris:artUrl}}";

/// Polls the active media player through `playerctl`
#[derive(Debug, Clone)]
pub struct PlayerctlClient {
    program: String,
    player: Option<String>,
    poll_timeout: Duration,
}

impl PlayerctlClient {
    pub const DEFAULT_PROGRAM: &'static str = "playerctl";
    pub const POLL_TIMEOUT: Duration = Duration::from_secs(1);
    pub const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

    pub fn new(player: Option<String>) -> Self {
        Self {
            program: Self::DEFAULT_PROGRAM.to_string(),
            player,
            poll_timeout: Self::POLL_TIMEOUT,
        }
    }

    /// Use a different executable in place of `playerctl`
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    #[must_use]
    pub fn with_poll_timeout(mut self, poll_timeout: Duration) -> Self {
        self.poll_timeout = poll_timeout;
        self
    }

    /// Arguments for one metadata poll
    pub fn metadata_args(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(4);
        if let Some(player) = &self.player {
            args.push(format!("--player={}", player));
        }
        args.push("metadata".to_string());
        args.push("--format".to_string());
        args.push(METADATA_FORMAT.to_string());
        args
    }

    /// Make sure the executable can be run at all
    pub async fn ensure_available(&self) -> Result<()> {
        let unavailable = |message: String| SenpaiError::PlayerUnavailable {
            command: self.program.clone(),
            message,
        };

        let output = Command::new(&self.program)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .output();

        match timeout(Self::PROBE_TIMEOUT, output).await {
            Ok(Ok(out)) => {
                debug!(
                    version = %String::from_utf8_lossy(&out.stdout).trim(),
                    "{} available",
                    self.program
                );
                Ok(())
            }
            Ok(Err(e)) => Err(unavailable(e.to_string())),
            Err(_) => Err(unavailable(format!(
                "no answer within {}s",
                Self::PROBE_TIMEOUT.as_secs()
            ))),
        }
    }

    /// Current track, or `None` when no player is active
    ///
    /// Timeouts, spawn failures and non-zero exits all read as "no player".
    pub async fn poll(&self) -> Option<TrackMetadata> {
        let output = Command::new(&self.program)
            .args(self.metadata_args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .output();

        let output = match timeout(self.poll_timeout, output).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                debug!("failed to run {}: {}", self.program, e);
                return None;
            }
            Err(_) => {
                debug!("{} metadata timed out", self.program);
                return None;
            }
        };

        if !output.status.success() {
            trace!(status = ?output.status.code(), "no active player");
            return None;
        }

        TrackMetadata::parse_line(&String::from_utf8_lossy(&output.stdout))
    }
}

impl Default for PlayerctlClient {
    fn default() -> Self {
        Self::new(None)
    }
}
