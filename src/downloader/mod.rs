//! Download and post-processing collaborators

pub mod aspect;
pub mod progress;
pub mod traits;
pub mod ytdlp;

// Re-export for convenience
pub use aspect::AspectRatioCorrector;
pub use progress::DownloadProgress;
pub use traits::{DownloadRequest, Downloader, Transcoder};
pub use ytdlp::YtDlpDownloader;
