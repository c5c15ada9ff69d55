//! vidpick - pick the best video+audio streams and download them
//!
//! Lists the formats a video platform offers (via yt-dlp), pairs video-only and
//! audio-only streams into downloadable combinations, downloads the chosen one
//! and fixes the orientation of portrait clips with ffmpeg.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;
use tracing_subscriber::EnvFilter;
use vidpick::cli::{Console, StdConsole};
use vidpick::downloader::{AspectRatioCorrector, Transcoder, YtDlpDownloader};
use vidpick::extractor::{Extractor, YtDlpExtractor};
use vidpick::selector::SelectionPolicy;
use vidpick::utils::AppSettings;
use vidpick::DownloadSession;

#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Video URL (prompted for when omitted)
    url: Option<String>,

    /// Directory to save into (default: your Downloads folder)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Pick this ID instead of prompting
    #[arg(short, long)]
    format: Option<String>,

    /// Print the full metadata as JSON and exit
    #[arg(long)]
    dump_json: bool,

    /// Keep webm streams in the video/audio lists
    #[arg(long)]
    keep_webm: bool,

    /// Skip the aspect-ratio fix for portrait videos
    #[arg(long)]
    no_fix_aspect: bool,

    /// Settings file (default: <config dir>/vidpick/settings.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Debug logging and yt-dlp verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn apply(&self, settings: &mut AppSettings) {
        if let Some(dir) = &self.output_dir {
            settings.download_location = dir.clone();
        }
        if self.keep_webm {
            settings.excluded_container = None;
        }
        if self.no_fix_aspect {
            settings.correct_portrait = false;
        }
        if self.verbose {
            settings.verbose = true;
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let Some(mut settings) = load_settings(&args) else {
        return Ok(());
    };
    args.apply(&mut settings);

    // Logs go to stderr so listings on stdout stay readable
    let default_level = if settings.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let outcome = rt.block_on(async {
        tokio::select! {
            result = run(&args, &settings) => result,
            _ = tokio::signal::ctrl_c() => {
                println!("\n⏹️  Download cancelled by user");
                Ok(())
            }
        }
    });

    // A pending stdin read would otherwise keep the runtime alive
    rt.shutdown_background();

    if let Err(e) = outcome {
        println!("❌ Unexpected error: {}", e);
    }
    Ok(())
}

/// Settings from `--config` or the default file; a bad file is reported, not fatal.
fn load_settings(args: &Args) -> Option<AppSettings> {
    let loaded = match &args.config {
        Some(path) => AppSettings::load(path),
        None => AppSettings::load_default(),
    };
    match loaded {
        Ok(settings) => Some(settings),
        Err(e) => {
            println!("❌ {}", e);
            None
        }
    }
}

async fn run(args: &Args, settings: &AppSettings) -> Result<()> {
    let mut console = StdConsole::new();

    let url = match &args.url {
        Some(url) => url.trim().to_string(),
        None => console
            .ask("Enter URL: ")
            .await
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
    };
    if url.is_empty() {
        console.show("❌ No URL provided");
        return Ok(());
    }

    let extractor = match YtDlpExtractor::new(settings.ytdlp_path.as_deref()) {
        Ok(e) => Arc::new(e),
        Err(e) => {
            console.show(&format!("❌ {}", e));
            console.show(
                "  pip install yt-dlp\n  or: brew install yt-dlp\n  or visit: https://github.com/yt-dlp/yt-dlp",
            );
            return Ok(());
        }
    };

    if args.dump_json {
        let info = extractor.extract_info(&url).await?;
        console.show(&serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    let downloader =
        YtDlpDownloader::with_path(extractor.ytdlp_path().to_path_buf(), settings.verbose);
    let mut session = DownloadSession::new(
        extractor,
        Arc::new(downloader),
        settings.download_location.clone(),
    )
    .with_policy(SelectionPolicy::from(settings));

    if settings.correct_portrait {
        match AspectRatioCorrector::new(
            settings.ffmpeg_path.as_deref(),
            &settings.encoding_preset,
            &settings.audio_encoder,
        ) {
            Ok(corrector) => {
                let transcoder: Arc<dyn Transcoder> = Arc::new(corrector);
                session = session.with_transcoder(transcoder);
            }
            Err(e) => warn!("Portrait videos will not be corrected: {}", e),
        }
    }

    // Failures are reported by the session itself
    let _ = session
        .run_interactive(&url, args.format.as_deref(), &mut console)
        .await;
    Ok(())
}
