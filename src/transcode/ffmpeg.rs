//! ffmpeg-backed transcoder implementation.

use super::Transcoder;
use crate::error::{FlatripError, Result};
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

/// Transcoder that extracts audio by shelling out to ffmpeg.
pub struct FfmpegTranscoder {
    /// VBR quality passed to `-qscale:a` (0 = best, 9 = smallest).
    quality: u8,
}

impl FfmpegTranscoder {
    pub fn new() -> Self {
        Self { quality: 2 }
    }

    pub fn with_quality(quality: u8) -> Self {
        Self { quality }
    }
}

impl Default for FfmpegTranscoder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transcoder for FfmpegTranscoder {
    async fn transcode(&self, source: &Path, dest: &Path) -> Result<()> {
        ensure_audio_stream(source).await?;

        info!("Extracting audio from {} to {}", source.display(), dest.display());

        let result = Command::new("ffmpeg")
            .arg("-i").arg(source)
            .arg("-vn")
            .arg("-codec:a").arg("libmp3lame")
            .arg("-qscale:a").arg(self.quality.to_string())
            .arg("-y")
            .arg("-loglevel").arg("error")
            .arg(dest)
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await;

        match result {
            Ok(out) if out.status.success() => Ok(()),
            Ok(out) => {
                let err = String::from_utf8_lossy(&out.stderr);
                Err(FlatripError::Transcode {
                    path: source.to_path_buf(),
                    reason: format!("ffmpeg failed: {}", err.trim()),
                })
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(FlatripError::ToolNotFound("ffmpeg".into()))
            }
            Err(e) => Err(FlatripError::Transcode {
                path: source.to_path_buf(),
                reason: format!("ffmpeg error: {e}"),
            }),
        }
    }
}

/// Verify with ffprobe that `source` carries at least one audio stream.
///
/// Catching this up front turns an unsupported-source failure into a typed
/// error instead of an opaque ffmpeg exit code.
async fn ensure_audio_stream(source: &Path) -> Result<()> {
    debug!("Probing {} for audio streams", source.display());

    let result = Command::new("ffprobe")
        .arg("-v").arg("quiet")
        .arg("-print_format").arg("json")
        .arg("-select_streams").arg("a")
        .arg("-show_streams")
        .arg(source)
        .output()
        .await;

    let output = match result {
        Ok(o) => o,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(FlatripError::ToolNotFound("ffprobe".into()));
        }
        Err(e) => {
            return Err(FlatripError::Transcode {
                path: source.to_path_buf(),
                reason: format!("ffprobe failed: {e}"),
            });
        }
    };

    if !output.status.success() {
        return Err(FlatripError::Transcode {
            path: source.to_path_buf(),
            reason: "ffprobe could not read the file".into(),
        });
    }

    let json_str = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value = serde_json::from_str(&json_str).map_err(|_| {
        FlatripError::Transcode {
            path: source.to_path_buf(),
            reason: "Invalid ffprobe output".into(),
        }
    })?;

    let has_audio = parsed["streams"]
        .as_array()
        .map(|streams| !streams.is_empty())
        .unwrap_or(false);

    if has_audio {
        Ok(())
    } else {
        Err(FlatripError::Transcode {
            path: source.to_path_buf(),
            reason: "No audio stream in source".into(),
        })
    }
}
