//! Ordering formats best-first

use crate::extractor::models::Format;
use std::cmp::Ordering;

/// Sort video formats by height, then total bitrate, both descending.
/// Missing values count as 0. Equal formats keep their input order.
pub fn rank_video(mut formats: Vec<Format>) -> Vec<Format> {
    formats.sort_by(compare_video);
    formats
}

/// Sort audio formats by audio bitrate, descending. Missing bitrate counts as 0.
pub fn rank_audio(mut formats: Vec<Format>) -> Vec<Format> {
    formats.sort_by(|a, b| b.abr_or_zero().total_cmp(&a.abr_or_zero()));
    formats
}

fn compare_video(a: &Format, b: &Format) -> Ordering {
    b.height_or_zero()
        .cmp(&a.height_or_zero())
        .then_with(|| b.tbr_or_zero().total_cmp(&a.tbr_or_zero()))
}
