//! Aspect-ratio correction for portrait downloads
//!
//! Phones store portrait video as landscape frames plus a rotation flag, which many
//! players ignore. Re-encoding through ffmpeg with `rotate=0` bakes the orientation
//! into the frames.

use crate::downloader::traits::Transcoder;
use crate::utils::error::{Result, VidpickError};
use crate::utils::tools::{find_tool, FFMPEG};
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::process::Command as AsyncCommand;
use tracing::{debug, error, info, warn};

/// Rewrites a file through ffmpeg, replacing the original only on success
pub struct AspectRatioCorrector {
    ffmpeg_path: PathBuf,
    preset: String,
    audio_encoder: String,
}

impl AspectRatioCorrector {
    pub fn new(override_path: Option<&Path>, preset: &str, audio_encoder: &str) -> Result<Self> {
        let ffmpeg_path = find_tool(FFMPEG, override_path)?;
        Ok(Self::with_path(ffmpeg_path, preset, audio_encoder))
    }

    pub fn with_path(ffmpeg_path: PathBuf, preset: &str, audio_encoder: &str) -> Self {
        Self {
            ffmpeg_path,
            preset: preset.to_string(),
            audio_encoder: audio_encoder.to_string(),
        }
    }

    /// `<input>_fixed.mp4`, next to the input.
    pub fn temp_path(input: &Path) -> PathBuf {
        let mut name = input.as_os_str().to_owned();
        name.push("_fixed.mp4");
        PathBuf::from(name)
    }

    pub fn build_args(&self, input: &Path, output: &Path) -> Vec<OsString> {
        vec![
            "-y".into(), // overwrite
            "-i".into(),
            input.as_os_str().to_owned(),
            "-preset".into(),
            self.preset.clone().into(),
            "-metadata:s:v".into(),
            "rotate=0".into(),
            "-c:a".into(),
            self.audio_encoder.clone().into(),
            output.as_os_str().to_owned(),
        ]
    }
}

#[async_trait]
impl Transcoder for AspectRatioCorrector {
    async fn correct_aspect(&self, path: &Path) -> Result<()> {
        let temp = Self::temp_path(path);
        info!("Correcting aspect ratio of {}", path.display());
        debug!("ffmpeg output goes to {}", temp.display());

        let output = AsyncCommand::new(&self.ffmpeg_path)
            .args(self.build_args(path, &temp))
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| VidpickError::TranscodeFailed(format!("failed to run ffmpeg: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!("ffmpeg failed ({}): {}", output.status, stderr.trim());
            discard_temp(&temp).await;
            let detail = stderr
                .lines()
                .rev()
                .find(|l| !l.trim().is_empty())
                .map(|l| l.trim().to_string())
                .unwrap_or_else(|| format!("ffmpeg exited with {}", output.status));
            return Err(VidpickError::TranscodeFailed(detail));
        }

        // rename-over keeps the original intact until the corrected file is complete
        if let Err(e) = tokio::fs::rename(&temp, path).await {
            discard_temp(&temp).await;
            return Err(VidpickError::TranscodeFailed(format!(
                "could not replace {}: {}",
                path.display(),
                e
            )));
        }

        info!("Aspect ratio corrected: {}", path.display());
        Ok(())
    }
}

async fn discard_temp(temp: &Path) {
    if temp.exists() {
        if let Err(e) = tokio::fs::remove_file(temp).await {
            warn!("Failed to remove {}: {}", temp.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_temp_path_appends_suffix() {
        let temp = AspectRatioCorrector::temp_path(Path::new("/d/Clip.mp4"));
        assert_eq!(temp, PathBuf::from("/d/Clip.mp4_fixed.mp4"));
    }

    #[test]
    fn test_build_args_order() {
        let corrector = AspectRatioCorrector::with_path(PathBuf::from("ffmpeg"), "fast", "aac");
        let args: Vec<String> = corrector
            .build_args(Path::new("in.mp4"), Path::new("in.mp4_fixed.mp4"))
            .into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            args,
            vec![
                "-y",
                "-i",
                "in.mp4",
                "-preset",
                "fast",
                "-metadata:s:v",
                "rotate=0",
                "-c:a",
                "aac",
                "in.mp4_fixed.mp4"
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_ffmpeg_is_transcode_failure() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("clip.mp4");
        std::fs::write(&input, b"original").unwrap();

        let corrector =
            AspectRatioCorrector::with_path(PathBuf::from("/nonexistent/ffmpeg"), "fast", "aac");
        let err = corrector.correct_aspect(&input).await.unwrap_err();
        assert!(matches!(err, VidpickError::TranscodeFailed(_)));
        assert_eq!(std::fs::read(&input).unwrap(), b"original");
    }

    #[cfg(unix)]
    fn fake_ffmpeg(dir: &Path, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let script = dir.join("ffmpeg");
        std::fs::write(&script, format!("#!/bin/sh\n{}\n", body)).unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
        script
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_success_replaces_original() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("clip.mp4");
        std::fs::write(&input, b"original").unwrap();
        // last argument is the output path
        let script = fake_ffmpeg(
            temp_dir.path(),
            r#"for last; do :; done; printf corrected > "$last""#,
        );

        let corrector = AspectRatioCorrector::with_path(script, "fast", "aac");
        corrector.correct_aspect(&input).await.unwrap();

        assert_eq!(std::fs::read(&input).unwrap(), b"corrected");
        assert!(!AspectRatioCorrector::temp_path(&input).exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failure_keeps_original_and_removes_temp() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("clip.mp4");
        std::fs::write(&input, b"original").unwrap();
        let script = fake_ffmpeg(
            temp_dir.path(),
            r#"for last; do :; done; printf partial > "$last"; echo 'Conversion failed!' >&2; exit 1"#,
        );

        let corrector = AspectRatioCorrector::with_path(script, "fast", "aac");
        match corrector.correct_aspect(&input).await {
            Err(VidpickError::TranscodeFailed(msg)) => assert_eq!(msg, "Conversion failed!"),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(std::fs::read(&input).unwrap(), b"original");
        assert!(!AspectRatioCorrector::temp_path(&input).exists());
    }
}
