//! Recording selection.
//!
//! Inspects a flat folder of recordings and picks candidates for
//! conversion, either the single newest file or everything captured on a
//! given calendar day. The file's modification time stands in for its
//! capture time; the collapser renames files rather than copying them, so
//! that proxy stays accurate after flattening.

use crate::error::{FlatripError, Result};
use crate::folder::sorted_entries;
use chrono::{DateTime, NaiveDate, Utc};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::debug;

/// Check whether `path` names a recording with the given extension.
///
/// The comparison is case-insensitive, so `CLIP.MP4` matches `mp4`.
pub fn is_recording(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(extension))
        .unwrap_or(false)
}

/// Return the most recently modified recording in `dir`.
///
/// Returns `Ok(None)` when the folder holds no matching files. When
/// several recordings share the newest timestamp, the lexicographically
/// smallest file name wins, so the result is deterministic.
pub fn most_recent(dir: &Path, extension: &str) -> Result<Option<PathBuf>> {
    let mut newest: Option<(PathBuf, SystemTime)> = None;

    for path in matching_files(dir, extension)? {
        let modified = modified_at(&path)?;

        // Entries arrive name-sorted, so a strict comparison keeps the
        // lexicographically smallest name on timestamp ties.
        let is_newer = match &newest {
            Some((_, best)) => modified > *best,
            None => true,
        };
        if is_newer {
            newest = Some((path, modified));
        }
    }

    Ok(newest.map(|(path, _)| path))
}

/// Return every recording in `dir` modified on the current UTC date.
///
/// Returns an empty vector, never an error, when nothing matches.
pub fn recorded_today(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    recorded_on(dir, extension, Utc::now().date_naive())
}

/// Return every recording in `dir` whose modification time falls on
/// `date` (interpreted in UTC), in file-name order.
pub fn recorded_on(dir: &Path, extension: &str, date: NaiveDate) -> Result<Vec<PathBuf>> {
    let mut matches = Vec::new();

    for path in matching_files(dir, extension)? {
        let modified: DateTime<Utc> = modified_at(&path)?.into();
        if modified.date_naive() == date {
            matches.push(path);
        }
    }

    debug!("{} recording(s) dated {}", matches.len(), date);
    Ok(matches)
}

/// List the recordings in `dir`, in file-name order.
pub fn matching_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    Ok(sorted_entries(dir)?
        .into_iter()
        .filter(|p| p.is_file() && is_recording(p, extension))
        .collect())
}

/// Read a file's modification time.
///
/// An entry that vanished between listing and stat surfaces as
/// [`FlatripError::NotFound`], distinct from the empty-selection case.
pub fn modified_at(path: &Path) -> Result<SystemTime> {
    let metadata = match std::fs::metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(FlatripError::NotFound(path.to_path_buf()));
        }
        Err(e) => return Err(FlatripError::filesystem(path, e)),
    };

    metadata
        .modified()
        .map_err(|e| FlatripError::filesystem(path, e))
}
