//! Data structures for video information

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Sentinel codec tag the catalog uses for "this stream type is absent".
pub const CODEC_NONE: &str = "none";

/// Title used when metadata could not be fetched.
pub const UNKNOWN_TITLE: &str = "Unknown Title";

fn unknown_title() -> String {
    UNKNOWN_TITLE.to_string()
}

/// Video information structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoInfo {
    #[serde(default)]
    pub id: String,
    #[serde(default = "unknown_title")]
    pub title: String,
    /// Page URL of the video (not a stream URL)
    #[serde(default)]
    pub webpage_url: String,
    pub webpage_url_domain: Option<String>,
    /// Platform name, e.g. "Youtube" or "TikTok"
    #[serde(alias = "extractor_key")]
    pub platform: Option<String>,
    pub uploader: Option<String>,
    pub duration: Option<f64>,
    pub duration_string: Option<String>,
    pub view_count: Option<u64>,
    pub like_count: Option<u64>,
    /// Container the catalog expects for its own default selection
    pub ext: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    #[serde(default)]
    pub formats: Vec<Format>,
    /// Catalog fields without a typed counterpart
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl VideoInfo {
    /// Placeholder returned when the catalog could not describe `url`.
    pub fn unknown(url: &str) -> Self {
        Self {
            title: unknown_title(),
            webpage_url: url.to_string(),
            ..Default::default()
        }
    }

    /// `HH:MM:SS`, preferring the catalog's own rendering.
    pub fn duration_display(&self) -> String {
        if let Some(s) = self.duration_string.as_deref().filter(|s| !s.is_empty()) {
            return s.to_string();
        }
        let secs = self.duration.unwrap_or(0.0).max(0.0) as u64;
        format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}

/// Video format information (one downloadable stream)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Format {
    pub format_id: String,
    /// Container tag (mp4, webm, m4a, ...)
    #[serde(default)]
    pub ext: String,
    pub vcodec: Option<String>,
    pub acodec: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub fps: Option<f32>,
    pub tbr: Option<f32>, // Total bitrate
    pub abr: Option<f32>, // Audio bitrate
    pub filesize: Option<u64>,
    pub filesize_approx: Option<u64>,
    pub language: Option<String>,
    pub format_note: Option<String>,
    /// Catalog fields without a typed counterpart
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Format {
    /// Video codec present (a missing tag counts as present, only the "none" sentinel does not).
    pub fn has_video(&self) -> bool {
        self.vcodec.as_deref() != Some(CODEC_NONE)
    }

    /// Audio codec present, same sentinel rule as [`Format::has_video`].
    pub fn has_audio(&self) -> bool {
        self.acodec.as_deref() != Some(CODEC_NONE)
    }

    pub fn is_video_only(&self) -> bool {
        self.has_video() && !self.has_audio()
    }

    pub fn is_audio_only(&self) -> bool {
        self.has_audio() && !self.has_video()
    }

    pub fn height_or_zero(&self) -> u32 {
        self.height.unwrap_or(0)
    }

    pub fn width_or_zero(&self) -> u32 {
        self.width.unwrap_or(0)
    }

    pub fn tbr_or_zero(&self) -> f32 {
        self.tbr.unwrap_or(0.0)
    }

    pub fn abr_or_zero(&self) -> f32 {
        self.abr.unwrap_or(0.0)
    }

    /// Exact or approximate size in bytes, 0 when the catalog gives neither.
    pub fn size_bytes(&self) -> u64 {
        self.filesize.or(self.filesize_approx).unwrap_or(0)
    }

    /// Size in MiB for listings.
    pub fn size_mib(&self) -> f64 {
        self.size_bytes() as f64 / (1024.0 * 1024.0)
    }
}

/// A video-only stream matched with an audio-only stream.
#[derive(Debug, Clone, PartialEq)]
pub struct PairedFormat {
    pub video: Format,
    pub audio: Format,
}

impl PairedFormat {
    pub fn size_mib(&self) -> f64 {
        self.video.size_mib() + self.audio.size_mib()
    }

    /// yt-dlp format expression downloading both streams.
    pub fn format_code(&self) -> String {
        format!("{}+{}", self.video.format_id, self.audio.format_id)
    }
}
