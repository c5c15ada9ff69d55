//! Downloading a chosen format through yt-dlp

use crate::downloader::progress::{parse_progress_line, DownloadProgress, OutputTracker};
use crate::downloader::traits::{DownloadRequest, Downloader};
use crate::utils::error::{Result, VidpickError};
use crate::utils::tools::{find_tool, YTDLP};
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::process::Command as AsyncCommand;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Downloader driving a `yt-dlp` subprocess
pub struct YtDlpDownloader {
    ytdlp_path: PathBuf,
    verbose: bool,
}

impl YtDlpDownloader {
    pub fn new(override_path: Option<&Path>, verbose: bool) -> Result<Self> {
        let ytdlp_path = find_tool(YTDLP, override_path)?;
        Ok(Self::with_path(ytdlp_path, verbose))
    }

    pub fn with_path(ytdlp_path: PathBuf, verbose: bool) -> Self {
        Self {
            ytdlp_path,
            verbose,
        }
    }

    /// Command-line arguments for one request.
    pub fn build_args(&self, request: &DownloadRequest) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-f".into(),
            request.format_code.clone().into(),
            "--newline".into(), // one progress line per update (non-TTY)
            "--progress".into(),
            "--no-playlist".into(),
        ];
        if self.verbose {
            args.push("--verbose".into());
        } else {
            args.push("--no-warnings".into());
        }
        args.push("-o".into());
        args.push(request.output_template().into_os_string());
        args.push(request.url.clone().into());
        args
    }
}

#[async_trait]
impl Downloader for YtDlpDownloader {
    async fn download(
        &self,
        request: &DownloadRequest,
        progress_tx: Option<mpsc::Sender<DownloadProgress>>,
    ) -> Result<PathBuf> {
        info!(
            "Downloading {} as format {} into {}",
            request.url,
            request.format_code,
            request.output_dir.display()
        );

        let mut child = AsyncCommand::new(&self.ytdlp_path)
            .args(self.build_args(request))
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| VidpickError::DownloadFailed(format!("failed to run yt-dlp: {}", e)))?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        let read_stdout = async move {
            let mut tracker = OutputTracker::default();
            let Some(stdout) = stdout else {
                warn!("yt-dlp stdout not captured");
                return tracker;
            };

            // Titles are not always valid UTF-8; keep reading to EOF regardless
            let mut segments = BufReader::new(stdout).split(b'\n');
            loop {
                let raw = match segments.next_segment().await {
                    Ok(Some(raw)) => raw,
                    Ok(None) => break,
                    Err(e) => {
                        warn!("Failed to read yt-dlp stdout: {}", e);
                        break;
                    }
                };
                let decoded = String::from_utf8_lossy(&raw);
                let line = decoded.trim_end_matches('\r');
                if let Some(progress) = parse_progress_line(line) {
                    if let Some(tx) = progress_tx.as_ref() {
                        // Best-effort: a slow or gone receiver just misses samples
                        let _ = tx.try_send(progress);
                    }
                    continue;
                }
                debug!("yt-dlp: {}", line);
                tracker.observe(line);
            }
            tracker
        };

        let read_stderr = async move {
            let mut buf = String::new();
            if let Some(mut stderr) = stderr {
                if let Err(e) = stderr.read_to_string(&mut buf).await {
                    warn!("Failed to read yt-dlp stderr: {}", e);
                }
            }
            buf
        };

        let (tracker, stderr_text) = tokio::join!(read_stdout, read_stderr);
        let status = child
            .wait()
            .await
            .map_err(|e| VidpickError::DownloadFailed(format!("yt-dlp did not finish: {}", e)))?;

        if !status.success() {
            error!("yt-dlp download failed ({}): {}", status, stderr_text.trim());
            return Err(VidpickError::DownloadFailed(failure_message(
                &stderr_text,
                &status.to_string(),
            )));
        }

        let path = tracker.final_path().unwrap_or_else(|| {
            debug!("yt-dlp did not report an output file, assuming the template path");
            request.fallback_path()
        });
        info!("Download finished: {}", path.display());
        Ok(path)
    }
}

/// Last `ERROR` line from stderr, or the exit status when there is none.
fn failure_message(stderr: &str, status: &str) -> String {
    stderr
        .lines()
        .rev()
        .find(|l| l.contains("ERROR"))
        .map(|l| l.trim().to_string())
        .unwrap_or_else(|| format!("yt-dlp exited with {}", status))
}
