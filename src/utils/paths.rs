//! Download and configuration directory resolution
//!
//! Paths are always resolved to absolute locations. When the binary is started from a
//! desktop launcher the working directory is often "/", so relative defaults like
//! `./downloads` would silently land in the wrong place.

use std::path::PathBuf;
use tracing::{debug, warn};

/// Get the downloads directory.
///
/// Uses the platform-standard Downloads directory, falling back to `~/Downloads`
/// and finally the system temp directory.
pub fn get_downloads_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
        .unwrap_or_else(|| {
            warn!("Could not determine Downloads directory, using temp dir");
            std::env::temp_dir()
        })
}

/// Get the configuration directory for vidpick (not created here).
pub fn get_config_dir() -> PathBuf {
    let dir = dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
        .unwrap_or_else(std::env::temp_dir)
        .join("vidpick");
    debug!("Config directory: {:?}", dir);
    dir
}

/// `<config dir>/settings.json`
pub fn get_settings_path() -> PathBuf {
    get_config_dir().join("settings.json")
}
