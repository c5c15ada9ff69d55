use crate::downloader::progress::DownloadProgress;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

/// Everything the downloader needs for one fetch
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadRequest {
    /// Page URL of the video
    pub url: String,
    /// yt-dlp format expression, e.g. "137+140" or "18"
    pub format_code: String,
    pub output_dir: PathBuf,
    /// Sanitized title, the extension is picked by the downloader
    pub file_stem: String,
    /// Extension assumed when the downloader does not report the final file
    pub fallback_ext: String,
}

impl DownloadRequest {
    /// `<dir>/<stem>.%(ext)s`
    pub fn output_template(&self) -> PathBuf {
        self.output_dir.join(format!("{}.%(ext)s", self.file_stem))
    }

    /// `<dir>/<stem>.<fallback_ext>`
    pub fn fallback_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", self.file_stem, self.fallback_ext))
    }
}

/// Fetches the bytes for a chosen format to disk
#[async_trait]
pub trait Downloader: Send + Sync {
    /// Download and return the path of the finished file.
    ///
    /// Progress is sent best-effort; a full or closed channel never fails the download.
    async fn download(
        &self,
        request: &DownloadRequest,
        progress_tx: Option<mpsc::Sender<DownloadProgress>>,
    ) -> Result<PathBuf>;
}

/// Post-download re-encode for portrait footage
#[async_trait]
pub trait Transcoder: Send + Sync {
    /// Rewrite `path` in place with the rotation flag cleared.
    async fn correct_aspect(&self, path: &Path) -> Result<()>;
}
