//! Error handling for vidpick

use thiserror::Error;

/// Main error type for vidpick
#[derive(Debug, Error)]
pub enum VidpickError {
    #[error("Unsupported URL: {0}")]
    UnsupportedSource(String),

    #[error("Failed to fetch video info: {0}")]
    MetadataFetchFailed(String),

    #[error("No available formats found")]
    NoFormatsAvailable,

    #[error("Please enter a valid number (got {0:?})")]
    InvalidSelection(String),

    #[error("Selection {index} is out of range (valid IDs: 1-{len})")]
    OutOfRangeSelection { index: i64, len: usize },

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Aspect-ratio correction failed: {0}")]
    TranscodeFailed(String),

    #[error("{0} not found. Please install {0}")]
    ToolNotFound(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl VidpickError {
    /// Whether this failure happened while resolving the user's choice.
    pub fn is_selection_error(&self) -> bool {
        matches!(
            self,
            VidpickError::InvalidSelection(_) | VidpickError::OutOfRangeSelection { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, VidpickError>;
