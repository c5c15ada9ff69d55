//! Reading yt-dlp's console output: progress lines and the final file location

use std::path::PathBuf;
use std::time::Duration;

/// One progress sample reported by yt-dlp
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadProgress {
    /// 0.0 to 100.0
    pub percent: f64,
    /// Approximate when yt-dlp prints `~`, 0 when unknown
    pub total_bytes: u64,
    /// bytes per second
    pub speed: f64,
    pub eta: Option<Duration>,
}

impl DownloadProgress {
    pub fn downloaded_bytes(&self) -> u64 {
        (self.percent / 100.0 * self.total_bytes as f64) as u64
    }

    pub fn is_complete(&self) -> bool {
        self.percent >= 100.0
    }
}

/// Parse a line such as `[download]  42.5% of ~ 150.00MiB at  5.20MiB/s ETA 00:15`.
pub fn parse_progress_line(line: &str) -> Option<DownloadProgress> {
    let rest = line.trim_start().strip_prefix("[download]")?.trim_start();
    let (pct, rest) = rest.split_once('%')?;
    let percent = pct.trim().parse::<f64>().ok()?;

    let total_bytes = rest
        .split_once(" of ")
        .map(|(_, after)| after.trim_start().trim_start_matches('~').trim_start())
        .and_then(|after| after.split_whitespace().next())
        .and_then(parse_size)
        .map(|b| b as u64)
        .unwrap_or(0);

    let speed = rest
        .split_once(" at ")
        .and_then(|(_, after)| after.split_whitespace().next())
        .and_then(|token| token.strip_suffix("/s"))
        .and_then(parse_size)
        .unwrap_or(0.0);

    let eta = rest
        .split_once("ETA ")
        .and_then(|(_, after)| after.split_whitespace().next())
        .and_then(parse_clock);

    Some(DownloadProgress {
        percent,
        total_bytes,
        speed,
        eta,
    })
}

/// `12.5MiB` → bytes
fn parse_size(token: &str) -> Option<f64> {
    let split = token
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(token.len());
    let (num, unit) = token.split_at(split);
    let num = num.parse::<f64>().ok()?;
    let factor = match unit {
        "" | "B" => 1.0,
        "KiB" => 1024.0,
        "MiB" => 1024.0 * 1024.0,
        "GiB" => 1024.0 * 1024.0 * 1024.0,
        "KB" | "kB" => 1000.0,
        "MB" => 1000.0 * 1000.0,
        "GB" => 1000.0 * 1000.0 * 1000.0,
        _ => return None,
    };
    Some(num * factor)
}

/// `01:02:03` / `02:03` → duration
fn parse_clock(token: &str) -> Option<Duration> {
    let mut secs = 0u64;
    for part in token.split(':') {
        secs = secs * 60 + part.parse::<u64>().ok()?;
    }
    Some(Duration::from_secs(secs))
}

/// Where yt-dlp says a file went
#[derive(Debug, Clone, PartialEq)]
pub enum OutputEvent {
    /// `[download] Destination: <path>`
    Destination(PathBuf),
    /// `[download] <path> has already been downloaded`
    AlreadyDownloaded(PathBuf),
    /// `[Merger] Merging formats into "<path>"`
    Merged(PathBuf),
}

pub fn parse_output_event(line: &str) -> Option<OutputEvent> {
    let line = line.trim();
    if let Some(rest) = line.strip_prefix("[Merger] Merging formats into ") {
        return Some(OutputEvent::Merged(PathBuf::from(rest.trim_matches('"'))));
    }
    let rest = line.strip_prefix("[download] ")?;
    if let Some(path) = rest.strip_prefix("Destination: ") {
        return Some(OutputEvent::Destination(PathBuf::from(path)));
    }
    rest.strip_suffix(" has already been downloaded")
        .map(|path| OutputEvent::AlreadyDownloaded(PathBuf::from(path)))
}

/// Folds output events into the final file: a merge target beats any
/// per-stream destination.
#[derive(Debug, Default)]
pub struct OutputTracker {
    merged: Option<PathBuf>,
    last: Option<PathBuf>,
}

impl OutputTracker {
    pub fn observe(&mut self, line: &str) {
        match parse_output_event(line) {
            Some(OutputEvent::Merged(path)) => self.merged = Some(path),
            Some(OutputEvent::Destination(path)) | Some(OutputEvent::AlreadyDownloaded(path)) => {
                self.last = Some(path)
            }
            None => {}
        }
    }

    pub fn final_path(self) -> Option<PathBuf> {
        self.merged.or(self.last)
    }
}
