//! Media transcoding for Flatrip.
//!
//! The conversion step is modeled as a capability trait so the pipeline
//! can be exercised without touching real codecs; the production
//! implementation shells out to ffmpeg.

mod ffmpeg;

pub use ffmpeg::FfmpegTranscoder;

use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

/// Trait for media transcoders.
#[async_trait]
pub trait Transcoder: Send + Sync {
    /// Extract the audio track of `source` into an MP3 file at `dest`.
    async fn transcode(&self, source: &Path, dest: &Path) -> Result<()>;
}

/// Build the sortable output file name for a conversion started at `at`,
/// e.g. `2026-08-07_14_03_59.mp3`.
pub fn output_name(at: DateTime<Local>) -> String {
    format!("{}.mp3", at.format("%Y-%m-%d_%H_%M_%S"))
}

/// Pick a destination inside `dir` for a conversion started at `at`.
///
/// Batch runs can start several conversions within the same second; an
/// already-taken name gets a numeric suffix instead of being overwritten.
pub fn unique_destination(dir: &Path, at: DateTime<Local>) -> PathBuf {
    let mut candidate = dir.join(output_name(at));
    let stamp = at.format("%Y-%m-%d_%H_%M_%S").to_string();
    let mut counter = 1u32;

    while candidate.exists() {
        candidate = dir.join(format!("{stamp}_{counter}.mp3"));
        counter += 1;
    }

    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::fs::File;
    use tempfile::tempdir;

    fn stamp() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 8, 7, 14, 3, 59).unwrap()
    }

    #[test]
    fn test_output_name_is_sortable_timestamp() {
        assert_eq!(output_name(stamp()), "2026-08-07_14_03_59.mp3");
    }

    #[test]
    fn test_unique_destination_uses_timestamp_name() {
        let dir = tempdir().unwrap();
        let dest = unique_destination(dir.path(), stamp());
        assert_eq!(dest, dir.path().join("2026-08-07_14_03_59.mp3"));
    }

    #[test]
    fn test_unique_destination_disambiguates_same_second() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("2026-08-07_14_03_59.mp3")).unwrap();
        File::create(dir.path().join("2026-08-07_14_03_59_1.mp3")).unwrap();

        let dest = unique_destination(dir.path(), stamp());
        assert_eq!(dest, dir.path().join("2026-08-07_14_03_59_2.mp3"));
    }
}
