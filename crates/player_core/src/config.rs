use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::controller::PlaybackSettings;
use crate::error::ConfigError;

pub fn player_root() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("player"))
}

pub fn config_path() -> Option<PathBuf> {
    player_root().map(|root| root.join("config.json"))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// rodio sink with pause, volume and position.
    #[default]
    Mixer,
    /// One blocking playback thread per track.
    Blocking,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    /// Hide the system title bar and draw our own with a close button.
    pub custom_title_bar: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 495.0,
            height: 520.0,
            custom_title_bar: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub backend: BackendKind,
    pub poll_interval_ms: u64,
    pub estimated_duration_secs: u64,
    pub initial_volume: u8,
    pub media_controls: bool,
    pub window: WindowConfig,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            poll_interval_ms: 100,
            estimated_duration_secs: 180,
            initial_volume: 100,
            media_controls: true,
            window: WindowConfig::default(),
        }
    }
}

impl PlayerConfig {
    /// Loads the user's config, or defaults when there is none.
    pub fn load() -> Result<Self, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => {
                debug!("no config directory on this platform");
                Ok(Self::default())
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    pub fn playback_settings(&self) -> PlaybackSettings {
        PlaybackSettings {
            estimated_duration: Duration::from_secs(self.estimated_duration_secs),
            initial_volume: self.initial_volume.min(100),
        }
    }
}
