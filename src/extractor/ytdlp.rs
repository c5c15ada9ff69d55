//! yt-dlp wrapper for metadata extraction

use crate::extractor::models::VideoInfo;
use crate::extractor::traits::Extractor;
use crate::utils::error::{Result, VidpickError};
use crate::utils::tools::{find_tool, YTDLP};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command as AsyncCommand;
use tracing::{debug, error};

/// Metadata extractor backed by `yt-dlp --dump-json`
pub struct YtDlpExtractor {
    ytdlp_path: PathBuf,
}

impl YtDlpExtractor {
    /// Locate yt-dlp (honouring an explicit path) and build the extractor.
    pub fn new(override_path: Option<&Path>) -> Result<Self> {
        let ytdlp_path = find_tool(YTDLP, override_path)?;
        Ok(Self::with_path(ytdlp_path))
    }

    pub fn with_path(ytdlp_path: PathBuf) -> Self {
        Self { ytdlp_path }
    }

    /// Get the path to yt-dlp being used
    pub fn ytdlp_path(&self) -> &Path {
        &self.ytdlp_path
    }
}

#[async_trait]
impl Extractor for YtDlpExtractor {
    fn id(&self) -> &'static str {
        "ytdlp"
    }

    /// Uses: yt-dlp --dump-json --no-download --no-playlist
    async fn extract_info(&self, url: &str) -> Result<VideoInfo> {
        debug!("Extracting video info for URL: {}", url);

        let output = AsyncCommand::new(&self.ytdlp_path)
            .arg("--dump-json")
            .arg("--no-download")
            .arg("--no-playlist")
            .arg("--no-warnings")
            .arg(url)
            .output()
            .await
            .map_err(|e| VidpickError::MetadataFetchFailed(format!("failed to run yt-dlp: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!("yt-dlp extraction failed: {}", stderr.trim());
            return Err(classify_failure(url, &stderr));
        }

        parse_info(&output.stdout)
    }
}

/// Map yt-dlp's stderr to the error taxonomy.
pub fn classify_failure(url: &str, stderr: &str) -> VidpickError {
    if stderr.contains("Unsupported URL") {
        VidpickError::UnsupportedSource(url.to_string())
    } else {
        let message = stderr
            .lines()
            .rev()
            .find(|l| l.contains("ERROR"))
            .unwrap_or_else(|| stderr.trim())
            .trim();
        VidpickError::MetadataFetchFailed(message.to_string())
    }
}

/// Parse `--dump-json` output. Only the first JSON line is used.
pub fn parse_info(stdout: &[u8]) -> Result<VideoInfo> {
    let text = String::from_utf8_lossy(stdout);
    let line = text
        .lines()
        .find(|l| !l.trim().is_empty())
        .ok_or_else(|| VidpickError::MetadataFetchFailed("yt-dlp printed no metadata".to_string()))?;

    serde_json::from_str(line)
        .map_err(|e| VidpickError::MetadataFetchFailed(format!("unreadable yt-dlp metadata: {}", e)))
}
