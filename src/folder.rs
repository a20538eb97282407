//! Folder collapsing.
//!
//! Flattens a nested directory tree into its root by recursively moving
//! every file up and removing the emptied subdirectories. This is the
//! destructive half of the pipeline: files are renamed, never copied, so
//! their modification times survive the move.

use crate::error::{FlatripError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Recursively collapse every subdirectory of `root` into `root`.
///
/// Works bottom-up: each child directory is collapsed first, then its
/// remaining entries are moved into `root` and the empty child is removed.
/// Children are processed in file-name order so the result does not depend
/// on platform enumeration order.
///
/// Moving an entry whose name already exists in `root` aborts the whole
/// operation with [`FlatripError::Collision`] before anything is
/// overwritten. No rollback is attempted on failure; re-running after a
/// partial collapse still converges to a flat tree. Calling this on an
/// already-flat directory is a no-op.
#[instrument(skip_all, fields(root = %root.display()))]
pub fn collapse(root: &Path) -> Result<()> {
    for child in sorted_entries(root)? {
        if !child.is_dir() {
            continue;
        }

        collapse(&child)?;

        for entry in sorted_entries(&child)? {
            let name = entry
                .file_name()
                .ok_or_else(|| FlatripError::NotFound(entry.clone()))?;
            let target = root.join(name);

            match fs::symlink_metadata(&target) {
                Ok(_) => return Err(FlatripError::Collision(target)),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(FlatripError::filesystem(&target, e)),
            }

            debug!("Moving {} -> {}", entry.display(), target.display());
            fs::rename(&entry, &target).map_err(|e| FlatripError::filesystem(&entry, e))?;
        }

        debug!("Removing emptied folder {}", child.display());
        fs::remove_dir(&child).map_err(|e| FlatripError::filesystem(&child, e))?;
    }

    Ok(())
}

/// List the entries of `dir`, sorted by file name.
pub(crate) fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = Vec::new();

    let listing = fs::read_dir(dir).map_err(|e| FlatripError::filesystem(dir, e))?;
    for entry in listing {
        let entry = entry.map_err(|e| FlatripError::filesystem(dir, e))?;
        entries.push(entry.path());
    }

    entries.sort();
    Ok(entries)
}
