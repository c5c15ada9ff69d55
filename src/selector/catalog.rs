//! Building the downloadable choices for one video

use crate::extractor::models::{Format, PairedFormat};
use crate::selector::pairer::AudioMatcher;
use crate::selector::{classifier, dedup, ranker};
use crate::utils::config::AppSettings;
use tracing::debug;

/// Knobs for turning a raw format list into choices.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionPolicy {
    /// Container removed from the separate video/audio lists
    pub excluded_container: Option<String>,
    /// Required prefix for tagged audio languages
    pub audio_language_prefix: String,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            excluded_container: Some("webm".to_string()),
            audio_language_prefix: "en".to_string(),
        }
    }
}

impl From<&AppSettings> for SelectionPolicy {
    fn from(settings: &AppSettings) -> Self {
        Self {
            excluded_container: settings.excluded_container.clone(),
            audio_language_prefix: settings.audio_language_prefix.clone(),
        }
    }
}

/// The working lists derived from one catalog response.
///
/// When `paired` is non-empty the user picks from it; otherwise `video_only`
/// holds the deduplicated, ranked full format list (muxed streams included).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormatCatalog {
    pub video_only: Vec<Format>,
    pub audio_only: Vec<Format>,
    pub paired: Vec<PairedFormat>,
}

impl FormatCatalog {
    /// classify → filter → dedup → rank → pair, falling back to the whole
    /// list when nothing pairs.
    pub fn build(formats: &[Format], policy: &SelectionPolicy, matcher: &dyn AudioMatcher) -> Self {
        let mut video = classifier::video_only(formats);
        let mut audio = classifier::audio_only(formats, &policy.audio_language_prefix);

        if let Some(excluded) = policy.excluded_container.as_deref() {
            video = classifier::filter_excluding(video, excluded);
            audio = classifier::filter_excluding(audio, excluded);
        }

        let video_only = ranker::rank_video(dedup::dedup_by_height_and_container(video));
        let audio_only = ranker::rank_audio(audio);
        let paired = matcher.pair(&video_only, &audio_only);

        debug!(
            "Classified {} formats: {} video-only, {} audio-only, {} pairs",
            formats.len(),
            video_only.len(),
            audio_only.len(),
            paired.len()
        );

        let video_only = if paired.is_empty() {
            debug!("No separable audio, falling back to every format");
            ranker::rank_video(dedup::dedup_by_height_and_container(formats.to_vec()))
        } else {
            video_only
        };

        Self {
            video_only,
            audio_only,
            paired,
        }
    }

    /// Whether choices are video+audio pairs (as opposed to single formats).
    pub fn uses_pairs(&self) -> bool {
        !self.paired.is_empty()
    }

    /// Number of selectable entries.
    pub fn len(&self) -> usize {
        if self.uses_pairs() {
            self.paired.len()
        } else {
            self.video_only.len()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::pairer::{is_compatible, GreedyMatcher};

    fn video(id: &str, ext: &str, height: u32, tbr: f32) -> Format {
        Format {
            format_id: id.to_string(),
            ext: ext.to_string(),
            height: Some(height),
            width: Some(height * 16 / 9),
            tbr: Some(tbr),
            vcodec: Some("avc1".to_string()),
            acodec: Some("none".to_string()),
            ..Default::default()
        }
    }

    fn audio(id: &str, ext: &str, abr: f32) -> Format {
        Format {
            format_id: id.to_string(),
            ext: ext.to_string(),
            abr: Some(abr),
            vcodec: Some("none".to_string()),
            acodec: Some("mp4a".to_string()),
            ..Default::default()
        }
    }

    fn muxed(id: &str, height: u32) -> Format {
        Format {
            format_id: id.to_string(),
            ext: "mp4".to_string(),
            height: Some(height),
            vcodec: Some("avc1".to_string()),
            acodec: Some("mp4a".to_string()),
            ..Default::default()
        }
    }

    fn build(formats: &[Format]) -> FormatCatalog {
        FormatCatalog::build(formats, &SelectionPolicy::default(), &GreedyMatcher)
    }

    #[test]
    fn test_typical_youtube_catalog() {
        let formats = vec![
            audio("139", "m4a", 48.0),
            audio("140", "m4a", 128.0),
            audio("251", "webm", 160.0),
            video("136", "mp4", 720, 1500.0),
            video("247", "webm", 720, 1400.0),
            video("137", "mp4", 1080, 4000.0),
            video("248", "webm", 1080, 3900.0),
            muxed("18", 360),
        ];
        let catalog = build(&formats);

        assert!(catalog.uses_pairs());
        let codes: Vec<_> = catalog.paired.iter().map(|p| p.format_code()).collect();
        assert_eq!(codes, vec!["137+140", "136+140"]);
        assert!(catalog.audio_only.iter().all(|a| a.ext != "webm"));
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_720_duplicates_collapse_and_1080_ranks_first() {
        let formats = vec![
            video("136", "mp4", 720, 9000.0),
            video("298", "mp4", 720, 1000.0),
            video("137", "mp4", 1080, 10.0),
            audio("140", "m4a", 128.0),
        ];
        let catalog = build(&formats);

        let ids: Vec<_> = catalog.video_only.iter().map(|f| f.format_id.as_str()).collect();
        assert_eq!(ids, vec!["137", "298"]);
    }

    #[test]
    fn test_webm_kept_when_policy_allows() {
        let formats = vec![
            video("137", "mp4", 1080, 4000.0),
            video("248", "webm", 1080, 3900.0),
            audio("251", "webm", 160.0),
        ];
        let policy = SelectionPolicy {
            excluded_container: None,
            ..Default::default()
        };
        let catalog = FormatCatalog::build(&formats, &policy, &GreedyMatcher);

        assert_eq!(catalog.paired.len(), 1);
        assert_eq!(catalog.paired[0].format_code(), "248+251");
        assert!(catalog
            .paired
            .iter()
            .all(|p| is_compatible(&p.video.ext, &p.audio.ext)));
    }

    #[test]
    fn test_muxed_only_source_falls_back_to_full_list() {
        let formats = vec![muxed("hd", 720), muxed("sd", 360), muxed("hd-dup", 720)];
        let catalog = build(&formats);

        assert!(!catalog.uses_pairs());
        assert!(catalog.audio_only.is_empty());
        let ids: Vec<_> = catalog.video_only.iter().map(|f| f.format_id.as_str()).collect();
        assert_eq!(ids, vec!["hd-dup", "sd"]);
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_fallback_ignores_container_exclusion() {
        let mut only_webm = muxed("w", 480);
        only_webm.ext = "webm".to_string();
        let catalog = build(&[only_webm]);
        assert_eq!(catalog.video_only.len(), 1);
    }

    #[test]
    fn test_unpairable_videos_trigger_fallback() {
        // audio exists but nothing is container-compatible
        let formats = vec![video("flv", "flv", 480, 800.0), audio("140", "m4a", 128.0)];
        let catalog = build(&formats);

        assert!(!catalog.uses_pairs());
        assert_eq!(catalog.video_only.len(), 2);
        assert_eq!(catalog.video_only[0].format_id, "flv");
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = build(&[]);
        assert!(catalog.is_empty());
        assert!(!catalog.uses_pairs());
    }
}
