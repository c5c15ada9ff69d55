//! Text rendering for the terminal

use crate::extractor::{Format, VideoInfo};
use crate::selector::{FormatCatalog, FormatChoice};

/// Metadata box shown after a successful fetch
pub fn video_banner(info: &VideoInfo) -> String {
    let or_na = |v: Option<&str>| v.filter(|s| !s.is_empty()).unwrap_or("N/A").to_string();

    format!(
        "╔════════════════════════════════════════╗\n\
         🎬 Title:     {}\n\
         💻 Platform:  {}\n\
         👤 Uploader:  {}\n\
         ⏱️ Duration:  {}\n\
         🔍 Views:     {}\n\
         ❤️ Likes:     {}\n\
         ╚════════════════════════════════════════╝",
        info.title,
        or_na(info.platform.as_deref()),
        or_na(info.uploader.as_deref()),
        info.duration_display(),
        info.view_count.unwrap_or(0),
        info.like_count.unwrap_or(0),
    )
}

fn resolution(format: &Format) -> String {
    format
        .height
        .map(|h| format!("{}p", h))
        .unwrap_or_else(|| "N/A".to_string())
}

fn fps(format: &Format) -> String {
    format
        .fps
        .map(|f| f.to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

fn size(mib: f64) -> String {
    if mib > 0.0 {
        format!("{:.3} MiB", mib)
    } else {
        "N/A".to_string()
    }
}

/// One numbered line; `index` is 1-based.
pub fn choice_line(index: usize, choice: &FormatChoice<'_>) -> String {
    let video = choice.video();
    let streams = match choice {
        FormatChoice::Paired(pair) => {
            format!("Video: {:<4} + Audio: {:<4}", pair.video.ext, pair.audio.ext)
        }
        FormatChoice::Single(format) => format!("Video: {:<4}", format.ext),
    };

    format!(
        "🔹 ID: {:<2} | {:<5} | {} | {} | Size: {:<7}",
        index,
        resolution(video),
        streams,
        fps(video),
        size(choice.size_mib())
    )
}

/// Header plus every choice in the catalog
pub fn format_listing(catalog: &FormatCatalog) -> String {
    let mut lines = vec!["Video Download(s): ".to_string()];
    lines.extend(
        catalog
            .choices()
            .iter()
            .enumerate()
            .map(|(i, choice)| choice_line(i + 1, choice)),
    );
    lines.join("\n")
}
