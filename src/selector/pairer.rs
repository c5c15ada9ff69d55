//! Matching video-only formats with audio-only formats

use crate::extractor::models::{Format, PairedFormat};

/// Whether a video container can be muxed with an audio container without re-encoding.
pub fn is_compatible(video_ext: &str, audio_ext: &str) -> bool {
    match video_ext {
        "mp4" => matches!(audio_ext, "m4a" | "mp4"),
        "webm" => audio_ext == "webm",
        _ => false,
    }
}

/// Strategy for pairing ranked video formats with ranked audio formats.
///
/// Implementations must only emit pairs accepted by [`is_compatible`], and must
/// leave out videos for which no audio fits rather than pairing them with nothing.
pub trait AudioMatcher: Send + Sync {
    fn pair(&self, videos: &[Format], audios: &[Format]) -> Vec<PairedFormat>;
}

/// Gives every video the first compatible audio in list order.
///
/// An audio track may be reused by any number of videos.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyMatcher;

impl AudioMatcher for GreedyMatcher {
    fn pair(&self, videos: &[Format], audios: &[Format]) -> Vec<PairedFormat> {
        videos
            .iter()
            .filter_map(|video| {
                audios
                    .iter()
                    .find(|audio| is_compatible(&video.ext, &audio.ext))
                    .map(|audio| PairedFormat {
                        video: video.clone(),
                        audio: audio.clone(),
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn video(id: &str, ext: &str) -> Format {
        Format {
            format_id: id.to_string(),
            ext: ext.to_string(),
            vcodec: Some("vp9".to_string()),
            acodec: Some("none".to_string()),
            ..Default::default()
        }
    }

    fn audio(id: &str, ext: &str) -> Format {
        Format {
            format_id: id.to_string(),
            ext: ext.to_string(),
            vcodec: Some("none".to_string()),
            acodec: Some("opus".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_compatibility_table() {
        assert!(is_compatible("mp4", "m4a"));
        assert!(is_compatible("mp4", "mp4"));
        assert!(is_compatible("webm", "webm"));
        assert!(!is_compatible("mp4", "webm"));
        assert!(!is_compatible("webm", "m4a"));
        assert!(!is_compatible("mkv", "m4a"));
    }

    #[test]
    fn test_webm_audio_only_pairs_with_webm_video() {
        let videos = vec![video("137", "mp4"), video("248", "webm")];
        let audios = vec![audio("251", "webm")];

        let pairs = GreedyMatcher.pair(&videos, &audios);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].video.format_id, "248");
        assert_eq!(pairs[0].audio.format_id, "251");
    }

    #[test]
    fn test_first_compatible_audio_wins_and_is_reused() {
        let videos = vec![video("v1", "mp4"), video("v2", "mp4")];
        let audios = vec![audio("w", "webm"), audio("best", "m4a"), audio("worse", "m4a")];

        let pairs = GreedyMatcher.pair(&videos, &audios);
        assert_eq!(pairs.len(), 2);
        assert!(pairs.iter().all(|p| p.audio.format_id == "best"));
        assert_eq!(pairs[0].format_code(), "v1+best");
        assert_eq!(pairs[1].format_code(), "v2+best");
    }

    #[test]
    fn test_no_audio_means_no_pairs() {
        let videos = vec![video("v1", "mp4")];
        assert!(GreedyMatcher.pair(&videos, &[]).is_empty());
    }

    proptest! {
        #[test]
        fn prop_all_pairs_compatible(
            video_exts in prop::collection::vec(prop::sample::select(vec!["mp4", "webm", "flv"]), 0..12),
            audio_exts in prop::collection::vec(prop::sample::select(vec!["m4a", "mp4", "webm"]), 0..12),
        ) {
            let videos: Vec<_> = video_exts.iter().enumerate().map(|(i, e)| video(&format!("v{i}"), e)).collect();
            let audios: Vec<_> = audio_exts.iter().enumerate().map(|(i, e)| audio(&format!("a{i}"), e)).collect();

            let pairs = GreedyMatcher.pair(&videos, &audios);
            prop_assert!(pairs.len() <= videos.len());
            for p in &pairs {
                prop_assert!(is_compatible(&p.video.ext, &p.audio.ext));
                prop_assert!(p.video.has_video() && !p.video.has_audio());
                prop_assert!(p.audio.has_audio() && !p.audio.has_video());
            }
            if audios.is_empty() {
                prop_assert!(pairs.is_empty());
            }
        }
    }
}
