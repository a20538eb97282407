//! Conversion pipeline for Flatrip.
//!
//! Ties the pieces together: collapse the recordings folder, select the
//! candidate recordings, and hand each one to the transcoder. The
//! transcoder is injected so tests never touch real codecs.

use crate::config::Settings;
use crate::error::{FlatripError, Result};
use crate::folder;
use crate::recording;
use crate::transcode::{unique_destination, FfmpegTranscoder, Transcoder};
use chrono::Local;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Which recordings to convert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    /// The single most recently modified recording.
    Latest,
    /// Every recording modified on the current UTC date.
    Today,
}

impl std::str::FromStr for SelectionMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "latest" | "recent" | "single" => Ok(SelectionMode::Latest),
            "today" | "all-today" | "all" => Ok(SelectionMode::Today),
            _ => Err(format!("Unknown selection mode: {} (expected 'latest' or 'today')", s)),
        }
    }
}

impl std::fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionMode::Latest => write!(f, "latest"),
            SelectionMode::Today => write!(f, "today"),
        }
    }
}

/// Outcome of one attempted conversion.
#[derive(Debug)]
pub struct FileOutcome {
    /// The recording that was fed to the transcoder.
    pub source: PathBuf,
    /// The written MP3 on success, the per-file error otherwise.
    pub outcome: Result<PathBuf>,
}

/// Per-file results of a conversion run.
///
/// An empty report is a successful no-op: nothing matched the selection.
#[derive(Debug, Default)]
pub struct ConversionReport {
    pub outcomes: Vec<FileOutcome>,
}

impl ConversionReport {
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn converted_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.outcome.is_ok()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.converted_count()
    }
}

/// The conversion orchestrator.
pub struct Orchestrator {
    settings: Settings,
    transcoder: Arc<dyn Transcoder>,
}

impl Orchestrator {
    /// Create an orchestrator backed by ffmpeg.
    pub fn new(settings: Settings) -> Self {
        let transcoder = Arc::new(FfmpegTranscoder::with_quality(settings.conversion.quality));
        Self {
            settings,
            transcoder,
        }
    }

    /// Create an orchestrator with a custom transcoder.
    pub fn with_transcoder(settings: Settings, transcoder: Arc<dyn Transcoder>) -> Self {
        Self {
            settings,
            transcoder,
        }
    }

    /// Collapse the recordings folder, select per `mode`, and convert every
    /// selected recording into the destination directory.
    ///
    /// A failure while collapsing or selecting aborts the run. A failing
    /// transcode does not: each file is attempted and the report carries the
    /// per-file outcomes, so one broken recording cannot sink a batch.
    #[instrument(skip(self))]
    pub async fn run(&self, mode: SelectionMode) -> Result<ConversionReport> {
        let source_root = self.settings.source_dir();

        info!("Collapsing {}", source_root.display());
        folder::collapse(&source_root)?;

        let selected = self.select(mode)?;
        if selected.is_empty() {
            info!("No recordings matched, nothing to convert");
            return Ok(ConversionReport::default());
        }

        let dest_dir = self.settings.destination_dir();
        std::fs::create_dir_all(&dest_dir).map_err(|e| FlatripError::filesystem(&dest_dir, e))?;

        let mut report = ConversionReport::default();
        for source in selected {
            let dest = unique_destination(&dest_dir, Local::now());

            let outcome = match self.transcoder.transcode(&source, &dest).await {
                Ok(()) => {
                    info!("Converted {} -> {}", source.display(), dest.display());
                    Ok(dest)
                }
                Err(e) => {
                    warn!("Conversion failed for {}: {}", source.display(), e);
                    Err(e)
                }
            };

            report.outcomes.push(FileOutcome { source, outcome });
        }

        Ok(report)
    }

    /// Resolve the recordings to convert for the given mode.
    fn select(&self, mode: SelectionMode) -> Result<Vec<PathBuf>> {
        let dir = self.settings.source_dir();
        let ext = &self.settings.recordings.extension;

        match mode {
            SelectionMode::Latest => Ok(recording::most_recent(&dir, ext)?.into_iter().collect()),
            SelectionMode::Today => recording::recorded_today(&dir, ext),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::fs::{self, File};
    use std::path::Path;
    use std::sync::Mutex;
    use std::time::{Duration, SystemTime};
    use tempfile::tempdir;

    /// Transcoder double that records calls and writes empty output files.
    struct MockTranscoder {
        calls: Mutex<Vec<(PathBuf, PathBuf)>>,
        fail_for: Option<String>,
    }

    impl MockTranscoder {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_for: None,
            }
        }

        fn failing_for(name: &str) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_for: Some(name.to_string()),
            }
        }

        fn calls(&self) -> Vec<(PathBuf, PathBuf)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transcoder for MockTranscoder {
        async fn transcode(&self, source: &Path, dest: &Path) -> Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push((source.to_path_buf(), dest.to_path_buf()));

            let name = source.file_name().unwrap().to_string_lossy();
            if self.fail_for.as_deref() == Some(name.as_ref()) {
                return Err(FlatripError::Transcode {
                    path: source.to_path_buf(),
                    reason: "mock failure".into(),
                });
            }

            File::create(dest)?;
            Ok(())
        }
    }

    fn test_settings(source: &Path, dest: &Path) -> Settings {
        let mut settings = Settings::default();
        settings.recordings.source_dir = source.to_string_lossy().into_owned();
        settings.conversion.destination_dir = dest.to_string_lossy().into_owned();
        settings
    }

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        File::create(path).unwrap();
    }

    fn age(path: &Path, hours: u64) {
        File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(SystemTime::now() - Duration::from_secs(hours * 3600))
            .unwrap();
    }

    #[tokio::test]
    async fn test_empty_selection_is_a_noop() {
        let source = tempdir().unwrap();
        let dest = tempdir().unwrap();
        touch(&source.path().join("notes.txt"));

        let transcoder = Arc::new(MockTranscoder::new());
        let orchestrator = Orchestrator::with_transcoder(
            test_settings(source.path(), dest.path()),
            transcoder.clone(),
        );

        let report = orchestrator.run(SelectionMode::Latest).await.unwrap();
        assert!(report.is_empty());
        assert!(transcoder.calls().is_empty());
    }

    #[tokio::test]
    async fn test_latest_mode_converts_only_the_newest() {
        let source = tempdir().unwrap();
        let dest = tempdir().unwrap();

        for (name, hours) in [("old.mp4", 5), ("older.mp4", 9)] {
            let path = source.path().join(name);
            touch(&path);
            age(&path, hours);
        }
        touch(&source.path().join("new.mp4"));

        let transcoder = Arc::new(MockTranscoder::new());
        let orchestrator = Orchestrator::with_transcoder(
            test_settings(source.path(), dest.path()),
            transcoder.clone(),
        );

        let report = orchestrator.run(SelectionMode::Latest).await.unwrap();
        assert_eq!(report.converted_count(), 1);

        let calls = transcoder.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, source.path().join("new.mp4"));
        assert!(calls[0].1.starts_with(dest.path()));
    }

    #[tokio::test]
    async fn test_today_mode_converts_each_fresh_recording() {
        let source = tempdir().unwrap();
        let dest = tempdir().unwrap();

        touch(&source.path().join("first.mp4"));
        touch(&source.path().join("second.mp4"));
        let stale = source.path().join("stale.mp4");
        touch(&stale);
        age(&stale, 72);

        let transcoder = Arc::new(MockTranscoder::new());
        let orchestrator = Orchestrator::with_transcoder(
            test_settings(source.path(), dest.path()),
            transcoder.clone(),
        );

        let report = orchestrator.run(SelectionMode::Today).await.unwrap();
        assert_eq!(report.converted_count(), 2);

        let sources: Vec<PathBuf> = transcoder.calls().into_iter().map(|(s, _)| s).collect();
        assert_eq!(
            sources,
            vec![
                source.path().join("first.mp4"),
                source.path().join("second.mp4"),
            ]
        );
    }

    #[tokio::test]
    async fn test_collapse_runs_before_selection() {
        let source = tempdir().unwrap();
        let dest = tempdir().unwrap();

        touch(&source.path().join("meetings/monday/standup.mp4"));

        let transcoder = Arc::new(MockTranscoder::new());
        let orchestrator = Orchestrator::with_transcoder(
            test_settings(source.path(), dest.path()),
            transcoder.clone(),
        );

        let report = orchestrator.run(SelectionMode::Latest).await.unwrap();
        assert_eq!(report.converted_count(), 1);

        // The nested recording was flattened to the root before selection.
        let calls = transcoder.calls();
        assert_eq!(calls[0].0, source.path().join("standup.mp4"));
        assert!(!source.path().join("meetings").exists());
    }

    #[tokio::test]
    async fn test_batch_continues_after_a_failed_file() {
        let source = tempdir().unwrap();
        let dest = tempdir().unwrap();

        touch(&source.path().join("bad.mp4"));
        touch(&source.path().join("good.mp4"));

        let transcoder = Arc::new(MockTranscoder::failing_for("bad.mp4"));
        let orchestrator = Orchestrator::with_transcoder(
            test_settings(source.path(), dest.path()),
            transcoder.clone(),
        );

        let report = orchestrator.run(SelectionMode::Today).await.unwrap();
        assert_eq!(transcoder.calls().len(), 2);
        assert_eq!(report.converted_count(), 1);
        assert_eq!(report.failed_count(), 1);

        let failed = report
            .outcomes
            .iter()
            .find(|o| o.outcome.is_err())
            .unwrap();
        assert_eq!(failed.source, source.path().join("bad.mp4"));
    }

    #[tokio::test]
    async fn test_missing_source_dir_aborts_run() {
        let dest = tempdir().unwrap();
        let mut settings = Settings::default();
        settings.recordings.source_dir = "/nonexistent/flatrip-test".to_string();
        settings.conversion.destination_dir = dest.path().to_string_lossy().into_owned();

        let orchestrator =
            Orchestrator::with_transcoder(settings, Arc::new(MockTranscoder::new()));

        let err = orchestrator.run(SelectionMode::Latest).await.unwrap_err();
        assert!(matches!(err, FlatripError::Filesystem { .. }));
    }

    #[test]
    fn test_selection_mode_parsing() {
        assert_eq!("latest".parse::<SelectionMode>().unwrap(), SelectionMode::Latest);
        assert_eq!("Today".parse::<SelectionMode>().unwrap(), SelectionMode::Today);
        assert_eq!("all-today".parse::<SelectionMode>().unwrap(), SelectionMode::Today);
        assert!("yesterday".parse::<SelectionMode>().is_err());
    }
}
