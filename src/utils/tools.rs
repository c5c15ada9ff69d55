//! Locating the external command-line tools (yt-dlp, ffmpeg)

use crate::utils::error::{Result, VidpickError};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const YTDLP: &str = "yt-dlp";
pub const FFMPEG: &str = "ffmpeg";

/// Find a tool binary with priority:
/// 1. Explicit override from settings
/// 2. System PATH
/// 3. Common installation paths
pub fn find_tool(name: &str, override_path: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = override_path {
        if is_executable(path) {
            info!("✓ Using configured {}: {:?}", name, path);
            return Ok(path.to_path_buf());
        }
        warn!("Configured {} is not executable: {:?}", name, path);
    }

    if let Ok(path) = which::which(name) {
        info!("✓ Using system {}: {:?}", name, path);
        return Ok(path);
    }

    if let Some(path) = find_in_common_paths(name) {
        info!("✓ Using {} from common path: {:?}", name, path);
        return Ok(path);
    }

    warn!("✗ {} not found anywhere!", name);
    Err(VidpickError::ToolNotFound(name.to_string()))
}

fn find_in_common_paths(name: &str) -> Option<PathBuf> {
    let mut candidates = vec![
        // macOS Homebrew (Apple Silicon)
        PathBuf::from("/opt/homebrew/bin").join(name),
        // macOS Homebrew (Intel) / manual installs
        PathBuf::from("/usr/local/bin").join(name),
        PathBuf::from("/usr/bin").join(name),
    ];
    if let Some(home) = dirs::home_dir() {
        // pip --user
        candidates.push(home.join(".local").join("bin").join(name));
    }

    candidates.into_iter().find(|p| {
        debug!("Checking {:?}", p);
        is_executable(p)
    })
}

/// Check if a file is executable
fn is_executable(path: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        std::fs::metadata(path)
            .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
    }

    #[cfg(not(unix))]
    {
        path.is_file()
    }
}
