//! Audio Player - mpv/VLC playback of episode files
//!
//! Episodes are played by an external media player running headless.
//! One source plays at a time; starting a new one replaces the old process.

use std::fmt;
use std::process::Stdio;
use std::str::FromStr;
use thiserror::Error;
use tokio::process::{Child, Command};
use tracing::{debug, info};

/// Supported external players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerType {
    /// mpv (default)
    #[default]
    Mpv,
    /// VLC media player
    Vlc,
}

impl PlayerType {
    /// Get the command name for this player
    pub fn command(&self) -> &'static str {
        match self {
            PlayerType::Mpv => "mpv",
            PlayerType::Vlc => {
                #[cfg(target_os = "macos")]
                if std::path::Path::new("/Applications/VLC.app").exists() {
                    return "/Applications/VLC.app/Contents/MacOS/VLC";
                }
                "vlc"
            }
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PlayerType::Mpv => "mpv",
            PlayerType::Vlc => "VLC",
        }
    }

    /// Flags for audio-only, no-UI playback that exits when done
    fn audio_args(&self) -> &'static [&'static str] {
        match self {
            PlayerType::Mpv => &["--no-video", "--no-terminal", "--force-window=no"],
            PlayerType::Vlc => &["-I", "dummy", "--no-video", "--play-and-exit"],
        }
    }
}

impl fmt::Display for PlayerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for PlayerType {
    type Err = PlayerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mpv" => Ok(PlayerType::Mpv),
            "vlc" => Ok(PlayerType::Vlc),
            other => Err(PlayerError::Unsupported(other.to_string())),
        }
    }
}

/// Errors from player operations
#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("Player '{0}' not found. Install it first.")]
    NotFound(String),
    #[error("Unsupported player '{0}' (expected mpv or vlc)")]
    Unsupported(String),
    #[error("Failed to start player: {0}")]
    StartFailed(#[from] std::io::Error),
}

/// Plays one audio source at a time
#[derive(Debug)]
pub struct AudioPlayer {
    player_type: PlayerType,
    extra_args: Vec<String>,
    current: Option<Child>,
    source: Option<String>,
}

impl AudioPlayer {
    pub fn new(player_type: PlayerType) -> Self {
        Self {
            player_type,
            extra_args: Vec::new(),
            current: None,
            source: None,
        }
    }

    /// Extra arguments passed before the source URL
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.extra_args = args;
        self
    }

    pub fn player_type(&self) -> PlayerType {
        self.player_type
    }

    /// URL of the source handed to the running player, if any
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Full argument list for a source
    pub fn args_for(&self, url: &str) -> Vec<String> {
        self.player_type
            .audio_args()
            .iter()
            .map(|s| s.to_string())
            .chain(self.extra_args.iter().cloned())
            .chain(std::iter::once(url.to_string()))
            .collect()
    }

    fn spawn(&self, url: &str) -> Result<Child, PlayerError> {
        let mut cmd = Command::new(self.player_type.command());
        cmd.args(self.args_for(url))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        cmd.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PlayerError::NotFound(self.player_type.command().to_string())
            } else {
                PlayerError::StartFailed(e)
            }
        })
    }

    /// Start playing `url`, replacing whatever was playing
    pub async fn play(&mut self, url: &str) -> Result<(), PlayerError> {
        self.stop().await;
        let child = self.spawn(url)?;
        info!(player = %self.player_type, %url, "playback started");
        self.current = Some(child);
        self.source = Some(url.to_string());
        Ok(())
    }

    /// Stop the running player, if any
    pub async fn stop(&mut self) {
        if let Some(mut child) = self.current.take() {
            if let Err(e) = child.kill().await {
                debug!(error = %e, "player already exited");
            }
        }
        self.source = None;
    }

    /// True while the player process is still running
    pub fn is_playing(&mut self) -> bool {
        match self.current.as_mut().map(|c| c.try_wait()) {
            Some(Ok(None)) => true,
            Some(_) => {
                self.current = None;
                self.source = None;
                false
            }
            None => false,
        }
    }

    /// Play a source and wait for the player to exit
    pub async fn play_and_wait(&mut self, url: &str) -> Result<(), PlayerError> {
        self.stop().await;
        let mut child = self.spawn(url)?;
        child.wait().await?;
        Ok(())
    }
}
