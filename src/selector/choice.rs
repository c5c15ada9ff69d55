//! Resolving a user's numbered selection into a yt-dlp format code

use crate::extractor::models::{Format, PairedFormat};
use crate::selector::catalog::FormatCatalog;
use crate::utils::error::{Result, VidpickError};

/// One entry the user can pick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormatChoice<'a> {
    /// Separate video and audio streams muxed by the downloader
    Paired(&'a PairedFormat),
    /// A single format downloaded as-is
    Single(&'a Format),
}

impl<'a> FormatChoice<'a> {
    /// `"<video>+<audio>"` for pairs, the bare format id otherwise.
    pub fn format_code(&self) -> String {
        match self {
            FormatChoice::Paired(pair) => pair.format_code(),
            FormatChoice::Single(format) => format.format_id.clone(),
        }
    }

    /// The format whose dimensions describe the downloaded picture.
    pub fn video(&self) -> &'a Format {
        match self {
            FormatChoice::Paired(pair) => &pair.video,
            FormatChoice::Single(format) => format,
        }
    }

    /// Taller than wide. Unknown dimensions count as 0.
    pub fn is_portrait(&self) -> bool {
        let video = self.video();
        video.width_or_zero() < video.height_or_zero()
    }

    pub fn size_mib(&self) -> f64 {
        match self {
            FormatChoice::Paired(pair) => pair.size_mib(),
            FormatChoice::Single(format) => format.size_mib(),
        }
    }
}

impl FormatCatalog {
    /// All entries in display order.
    pub fn choices(&self) -> Vec<FormatChoice<'_>> {
        if self.uses_pairs() {
            self.paired.iter().map(FormatChoice::Paired).collect()
        } else {
            self.video_only.iter().map(FormatChoice::Single).collect()
        }
    }

    /// Look up a 1-based selection.
    pub fn select(&self, index: i64) -> Result<FormatChoice<'_>> {
        let len = self.len();
        if len == 0 {
            return Err(VidpickError::NoFormatsAvailable);
        }
        if index < 1 || index as u64 > len as u64 {
            return Err(VidpickError::OutOfRangeSelection { index, len });
        }

        let slot = (index - 1) as usize;
        Ok(if self.uses_pairs() {
            FormatChoice::Paired(&self.paired[slot])
        } else {
            FormatChoice::Single(&self.video_only[slot])
        })
    }
}

/// Parse the user's typed selection. Non-numbers are an [`VidpickError::InvalidSelection`];
/// range checking is left to [`FormatCatalog::select`].
///
/// Integers too large for `i64` saturate, so they still fail as out of range.
pub fn parse_selection(input: &str) -> Result<i64> {
    let trimmed = input.trim();
    match trimmed.parse::<i64>() {
        Ok(index) => Ok(index),
        Err(_) => {
            let (negative, digits) = match trimmed.strip_prefix('-') {
                Some(rest) => (true, rest),
                None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
            };
            if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
                Ok(if negative { i64::MIN } else { i64::MAX })
            } else {
                Err(VidpickError::InvalidSelection(trimmed.to_string()))
            }
        }
    }
}
