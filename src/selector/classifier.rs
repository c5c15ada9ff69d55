//! Splitting a catalog's formats into video-only and audio-only streams

use crate::extractor::models::Format;

/// Streams carrying video and no audio.
pub fn video_only(formats: &[Format]) -> Vec<Format> {
    formats.iter().filter(|f| f.is_video_only()).cloned().collect()
}

/// Streams carrying audio and no video, restricted to tracks with no language tag
/// or one starting with `language_prefix`.
pub fn audio_only(formats: &[Format], language_prefix: &str) -> Vec<Format> {
    formats
        .iter()
        .filter(|f| f.is_audio_only())
        .filter(|f| {
            f.language
                .as_deref()
                .map_or(true, |lang| lang.starts_with(language_prefix))
        })
        .cloned()
        .collect()
}

/// Drop every format whose container equals `excluded`.
pub fn filter_excluding(formats: Vec<Format>, excluded: &str) -> Vec<Format> {
    formats.into_iter().filter(|f| f.ext != excluded).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(id: &str, ext: &str, vcodec: &str, acodec: &str) -> Format {
        Format {
            format_id: id.to_string(),
            ext: ext.to_string(),
            vcodec: Some(vcodec.to_string()),
            acodec: Some(acodec.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_partition_drops_muxed_streams() {
        let formats = vec![
            fmt("137", "mp4", "avc1", "none"),
            fmt("140", "m4a", "none", "mp4a"),
            fmt("18", "mp4", "avc1", "mp4a"),
            fmt("sb0", "mhtml", "none", "none"),
        ];

        let video = video_only(&formats);
        let audio = audio_only(&formats, "en");
        assert_eq!(video.len(), 1);
        assert_eq!(video[0].format_id, "137");
        assert_eq!(audio.len(), 1);
        assert_eq!(audio[0].format_id, "140");
    }

    #[test]
    fn test_audio_language_filter() {
        let mut english = fmt("a-en", "m4a", "none", "mp4a");
        english.language = Some("en-US".to_string());
        let mut german = fmt("a-de", "m4a", "none", "mp4a");
        german.language = Some("de".to_string());
        let untagged = fmt("a", "m4a", "none", "mp4a");

        let audio = audio_only(&[english, german, untagged], "en");
        let ids: Vec<_> = audio.iter().map(|f| f.format_id.as_str()).collect();
        assert_eq!(ids, vec!["a-en", "a"]);
    }

    #[test]
    fn test_filter_excluding_container() {
        let formats = vec![
            fmt("1", "webm", "vp9", "none"),
            fmt("2", "mp4", "avc1", "none"),
            fmt("3", "webm", "none", "opus"),
        ];
        let kept = filter_excluding(formats, "webm");
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].format_id, "2");
    }
}
