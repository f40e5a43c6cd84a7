//! Configuration management for podtui
//!
//! Config is stored at ~/.config/podtui/config.toml. Every field is
//! optional; a missing file means defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::catalog::{CatalogClient, DEFAULT_BASE_URL};
use crate::store::{LocalStore, StoreError};
use crate::stream::{AudioPlayer, PlayerType};
use crate::transform::SortMode;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog API base URL
    pub api_base_url: Option<String>,
    /// External player: "mpv" or "vlc"
    pub player: Option<String>,
    /// Extra arguments for the player
    pub player_args: Vec<String>,
    /// Request timeout in seconds (none when unset)
    pub request_timeout_secs: Option<u64>,
    /// Initial sort for the show list
    pub default_sort: Option<String>,
    /// Initial sort for favorites
    pub default_favorite_sort: Option<String>,
    /// Log filter directive, e.g. "info" or "podtui=debug"
    pub log_level: Option<String>,
    /// Storage file override (defaults to the data dir)
    pub storage_path: Option<PathBuf>,
}

impl Config {
    /// Get config file path (~/.config/podtui/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("podtui").join("config.toml"))
    }

    /// Load from the default path, or defaults if there is no file
    pub fn load() -> Result<Self> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from an explicit path. A missing file yields defaults; a
    /// malformed one is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", path.display()))
            }
        };
        toml::from_str(&text).with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Load from `--config` if given, else the default location
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => Self::load(),
        }
    }

    pub fn base_url(&self) -> &str {
        self.api_base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn player_type(&self) -> Result<PlayerType> {
        match self.player.as_deref() {
            Some(name) => Ok(name.parse()?),
            None => Ok(PlayerType::default()),
        }
    }

    pub fn sort(&self) -> SortMode {
        self.default_sort
            .as_deref()
            .map(SortMode::parse)
            .unwrap_or_default()
    }

    pub fn favorite_sort(&self) -> SortMode {
        self.default_favorite_sort
            .as_deref()
            .map(SortMode::parse)
            .unwrap_or_default()
    }

    /// Catalog client with the configured base URL and timeout
    pub fn catalog_client(&self) -> CatalogClient {
        let client = CatalogClient::with_base_url(self.base_url());
        match self.request_timeout() {
            Some(timeout) => client.with_timeout(timeout),
            None => client,
        }
    }

    /// Local store at the configured or default location
    pub fn store(&self) -> Result<LocalStore, StoreError> {
        match &self.storage_path {
            Some(path) => Ok(LocalStore::at(path)),
            None => LocalStore::open_default(),
        }
    }

    /// Audio player with the configured binary and arguments
    pub fn audio_player(&self) -> Result<AudioPlayer> {
        Ok(AudioPlayer::new(self.player_type()?).with_args(self.player_args.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.player_type().unwrap(), PlayerType::Mpv);
        assert_eq!(config.sort(), SortMode::Title);
        assert!(config.request_timeout().is_none());
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "player = \"vlc\"\ndefault_sort = \"date-desc\"\nrequest_timeout_secs = 5\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.player_type().unwrap(), PlayerType::Vlc);
        assert_eq!(config.sort(), SortMode::DateDesc);
        assert_eq!(config.favorite_sort(), SortMode::Title);
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "player = [").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("config.toml"));
    }
}
