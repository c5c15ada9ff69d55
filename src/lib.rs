//! vidpick library

pub mod app;
pub mod cli;
pub mod downloader;
pub mod extractor;
pub mod selector;
pub mod utils;

// Re-export main types for easier use
pub use app::{DownloadReport, DownloadSession};
pub use extractor::{Format, PairedFormat, VideoInfo, YtDlpExtractor};
pub use selector::{FormatCatalog, FormatChoice, SelectionPolicy};
pub use utils::{AppSettings, Result, VidpickError};
