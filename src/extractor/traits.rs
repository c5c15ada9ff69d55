use crate::extractor::models::VideoInfo;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Source of video metadata and available formats
///
/// This trait isolates the application from the specific extraction method
/// (yt-dlp subprocess, test doubles, ...).
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Returns a unique identifier for this extractor (e.g. "ytdlp")
    fn id(&self) -> &'static str;

    /// Fetch metadata for `url` without downloading any media.
    ///
    /// Fails with `UnsupportedSource` when no extractor recognises the URL and
    /// `MetadataFetchFailed` for everything else.
    async fn extract_info(&self, url: &str) -> Result<VideoInfo>;
}
