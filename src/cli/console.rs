use crate::downloader::DownloadProgress;
use async_trait::async_trait;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Where the interactive flow talks to the user
#[async_trait]
pub trait Console: Send {
    /// Print one block of text.
    fn show(&mut self, text: &str);

    /// Prompt and read one line; `None` when input is closed.
    async fn ask(&mut self, prompt: &str) -> Option<String>;

    /// Download progress sample.
    fn progress(&mut self, _progress: &DownloadProgress) {}
}

/// Terminal console on stdin/stdout
pub struct StdConsole {
    stdin: tokio::io::Lines<BufReader<tokio::io::Stdin>>,
    progress_shown: bool,
}

impl StdConsole {
    pub fn new() -> Self {
        Self {
            stdin: BufReader::new(tokio::io::stdin()).lines(),
            progress_shown: false,
        }
    }

    fn end_progress_line(&mut self) {
        if self.progress_shown {
            println!();
            self.progress_shown = false;
        }
    }
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Console for StdConsole {
    fn show(&mut self, text: &str) {
        self.end_progress_line();
        println!("{}", text);
    }

    async fn ask(&mut self, prompt: &str) -> Option<String> {
        self.end_progress_line();
        print!("{}", prompt);
        let _ = std::io::stdout().flush();
        self.stdin.next_line().await.ok().flatten()
    }

    fn progress(&mut self, progress: &DownloadProgress) {
        print!("{}", progress_line(progress));
        let _ = std::io::stdout().flush();
        self.progress_shown = true;
    }
}

const MIB: f64 = 1024.0 * 1024.0;

/// `\r`-prefixed single-line progress readout
fn progress_line(progress: &DownloadProgress) -> String {
    let mut line = format!("\r⬇️  {:>5.1}%", progress.percent);
    if progress.total_bytes > 0 {
        line.push_str(&format!(
            " | {:.2}/{:.2} MiB",
            progress.downloaded_bytes() as f64 / MIB,
            progress.total_bytes as f64 / MIB
        ));
    }
    line.push_str(&format!(" | {:>8.2} MiB/s", progress.speed / MIB));
    line
}
