//! Utility modules for error handling, configuration and paths

pub mod config;
pub mod error;
pub mod filename;
pub mod paths;
pub mod tools;

// Re-export for convenience
pub use config::AppSettings;
pub use error::{Result, VidpickError};
pub use filename::sanitize_title;
pub use paths::{get_config_dir, get_downloads_dir, get_settings_path};
pub use tools::find_tool;
