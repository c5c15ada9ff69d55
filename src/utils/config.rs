//! Application configuration

use crate::utils::error::{Result, VidpickError};
use crate::utils::paths;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Download location
    pub download_location: PathBuf,

    /// Container dropped from the separate video/audio lists (None keeps everything)
    pub excluded_container: Option<String>,

    /// Audio tracks must have no language or one starting with this prefix
    pub audio_language_prefix: String,

    /// Explicit yt-dlp binary
    pub ytdlp_path: Option<PathBuf>,

    /// Explicit ffmpeg binary
    pub ffmpeg_path: Option<PathBuf>,

    /// ffmpeg `-preset` used by the aspect-ratio fix
    pub encoding_preset: String,

    /// ffmpeg audio encoder used by the aspect-ratio fix
    pub audio_encoder: String,

    /// Re-encode portrait downloads to clear the rotation flag
    pub correct_portrait: bool,

    /// Let yt-dlp print its own chatter
    pub verbose: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            download_location: paths::get_downloads_dir(),
            excluded_container: Some("webm".to_string()),
            audio_language_prefix: "en".to_string(),
            ytdlp_path: None,
            ffmpeg_path: None,
            encoding_preset: "fast".to_string(),
            audio_encoder: "aac".to_string(),
            correct_portrait: true,
            verbose: false,
        }
    }
}

impl AppSettings {
    /// Read settings from a JSON file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No settings file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)?;
        let settings: AppSettings = serde_json::from_str(&raw)
            .map_err(|e| VidpickError::Config(format!("{}: {}", path.display(), e)))?;
        settings.validate()?;

        debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Read `<config dir>/vidpick/settings.json`.
    pub fn load_default() -> Result<Self> {
        Self::load(&paths::get_settings_path())
    }

    pub fn validate(&self) -> Result<()> {
        if self.encoding_preset.trim().is_empty() {
            return Err(VidpickError::Config("encoding_preset is empty".to_string()));
        }
        if self.audio_encoder.trim().is_empty() {
            return Err(VidpickError::Config("audio_encoder is empty".to_string()));
        }
        Ok(())
    }
}
