//! One download session: fetch → choose → download → correct

use crate::cli::display;
use crate::cli::Console;
use crate::downloader::{DownloadProgress, DownloadRequest, Downloader, Transcoder};
use crate::extractor::{Extractor, VideoInfo};
use crate::selector::{
    parse_selection, AudioMatcher, FormatCatalog, FormatChoice, GreedyMatcher, SelectionPolicy,
};
use crate::utils::error::{Result, VidpickError};
use crate::utils::filename::sanitize_title;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Result of a finished download
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadReport {
    pub path: PathBuf,
    pub format_code: String,
    /// The portrait fix ran and replaced the file
    pub aspect_corrected: bool,
}

/// Metadata plus the reason it is a placeholder, if it is one
#[derive(Debug)]
pub struct FetchedInfo {
    pub info: VideoInfo,
    pub error: Option<VidpickError>,
}

/// Wires the extractor, selector, downloader and transcoder together.
///
/// Every step runs to completion before the next one starts.
pub struct DownloadSession {
    extractor: Arc<dyn Extractor>,
    downloader: Arc<dyn Downloader>,
    transcoder: Option<Arc<dyn Transcoder>>,
    matcher: Box<dyn AudioMatcher>,
    policy: SelectionPolicy,
    output_dir: PathBuf,
}

impl DownloadSession {
    pub fn new(
        extractor: Arc<dyn Extractor>,
        downloader: Arc<dyn Downloader>,
        output_dir: PathBuf,
    ) -> Self {
        Self {
            extractor,
            downloader,
            transcoder: None,
            matcher: Box::new(GreedyMatcher),
            policy: SelectionPolicy::default(),
            output_dir,
        }
    }

    /// Enable the portrait fix
    pub fn with_transcoder(mut self, transcoder: Arc<dyn Transcoder>) -> Self {
        self.transcoder = Some(transcoder);
        self
    }

    pub fn with_policy(mut self, policy: SelectionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_matcher(mut self, matcher: Box<dyn AudioMatcher>) -> Self {
        self.matcher = matcher;
        self
    }

    pub fn output_dir(&self) -> &PathBuf {
        &self.output_dir
    }

    /// Fetch metadata, substituting the "Unknown Title" placeholder on failure.
    ///
    /// `webpage_url` falls back to `url` when the extractor leaves it empty.
    pub async fn fetch(&self, url: &str) -> FetchedInfo {
        match self.extractor.extract_info(url).await {
            Ok(mut info) => {
                debug!("{} returned {} formats", self.extractor.id(), info.formats.len());
                if info.webpage_url.is_empty() {
                    info.webpage_url = url.to_string();
                }
                FetchedInfo { info, error: None }
            }
            Err(e) => {
                warn!("Metadata fetch for {} failed: {}", url, e);
                let error = if matches!(
                    e,
                    VidpickError::UnsupportedSource(_) | VidpickError::MetadataFetchFailed(_)
                ) {
                    e
                } else {
                    VidpickError::MetadataFetchFailed(e.to_string())
                };
                FetchedInfo {
                    info: VideoInfo::unknown(url),
                    error: Some(error),
                }
            }
        }
    }

    /// Choices for `info`; an empty result is [`VidpickError::NoFormatsAvailable`].
    pub fn catalog(&self, info: &VideoInfo) -> Result<FormatCatalog> {
        let catalog = FormatCatalog::build(&info.formats, &self.policy, self.matcher.as_ref());
        if catalog.is_empty() {
            return Err(VidpickError::NoFormatsAvailable);
        }
        Ok(catalog)
    }

    /// The request that downloads `choice` of `info`.
    pub fn request_for(&self, info: &VideoInfo, choice: &FormatChoice<'_>) -> DownloadRequest {
        let fallback_ext = info
            .ext
            .clone()
            .filter(|e| !e.is_empty())
            .or_else(|| Some(choice.video().ext.clone()).filter(|e| !e.is_empty()))
            .unwrap_or_else(|| "mp4".to_string());

        DownloadRequest {
            url: info.webpage_url.clone(),
            format_code: choice.format_code(),
            output_dir: self.output_dir.clone(),
            file_stem: sanitize_title(&info.title),
            fallback_ext,
        }
    }

    /// Download `choice`, then run the portrait fix when the picture is taller than wide.
    pub async fn download(
        &self,
        info: &VideoInfo,
        choice: FormatChoice<'_>,
        progress_tx: Option<mpsc::Sender<DownloadProgress>>,
    ) -> Result<DownloadReport> {
        let request = self.request_for(info, &choice);
        let path = self.downloader.download(&request, progress_tx).await?;

        let mut aspect_corrected = false;
        if choice.is_portrait() {
            match &self.transcoder {
                Some(transcoder) => {
                    info!("Portrait video detected, correcting aspect ratio");
                    transcoder.correct_aspect(&path).await?;
                    aspect_corrected = true;
                }
                None => debug!("Portrait video, aspect correction disabled"),
            }
        }

        Ok(DownloadReport {
            path,
            format_code: request.format_code,
            aspect_corrected,
        })
    }

    /// The whole interactive flow for one URL.
    ///
    /// Every failure is already reported on `console` when this returns `Err`.
    /// `selection` answers the ID prompt without asking.
    pub async fn run_interactive(
        &self,
        url: &str,
        selection: Option<&str>,
        console: &mut dyn Console,
    ) -> Result<DownloadReport> {
        let result = self.run_steps(url, selection, console).await;
        if let Err(e) = &result {
            if e.is_selection_error() {
                debug!("Selection rejected: {}", e);
            } else {
                warn!("Run for {} failed: {}", url, e);
            }
            console.show(&format!("❌ {}", e));
        }
        result
    }

    async fn run_steps(
        &self,
        url: &str,
        selection: Option<&str>,
        console: &mut dyn Console,
    ) -> Result<DownloadReport> {
        let fetched = self.fetch(url).await;
        if let Some(e) = &fetched.error {
            console.show(&format!("❌ {}", e));
        } else {
            console.show(&display::video_banner(&fetched.info));
        }
        let info = fetched.info;

        let catalog = self.catalog(&info)?;
        console.show(&display::format_listing(&catalog));

        let answer = match selection {
            Some(s) => s.to_string(),
            None => console
                .ask("Select ID: ")
                .await
                .ok_or_else(|| VidpickError::InvalidSelection(String::new()))?,
        };
        let choice = catalog.select(parse_selection(&answer)?)?;

        let (tx, mut rx) = mpsc::channel::<DownloadProgress>(64);
        let download = self.download(&info, choice, Some(tx));
        let report_progress = async {
            while let Some(progress) = rx.recv().await {
                console.progress(&progress);
            }
        };
        let (report, ()) = tokio::join!(download, report_progress);
        let report = report?;

        console.show("🎉 Download process completed!");
        console.show(&format!("📁 Download saved in: {}", self.output_dir.display()));
        Ok(report)
    }
}
