//! Pre-flight checks before destructive operations.
//!
//! The convert flow mutates the recordings tree before it ever touches
//! ffmpeg, so missing tools or directories are caught here, before any
//! folder is collapsed.

use crate::config::Settings;
use crate::error::{FlatripError, Result};
use std::process::Command;

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Conversion requires ffmpeg/ffprobe and the recordings folder.
    Convert,
    /// Listing only requires the recordings folder.
    List,
}

/// Run pre-flight checks for the given operation.
pub fn check(operation: Operation, settings: &Settings) -> Result<()> {
    match operation {
        Operation::Convert => {
            check_tool("ffmpeg")?;
            check_tool("ffprobe")?;
            check_source_dir(settings)?;
        }
        Operation::List => {
            check_source_dir(settings)?;
        }
    }
    Ok(())
}

/// Check that the configured recordings folder exists.
fn check_source_dir(settings: &Settings) -> Result<()> {
    let dir = settings.source_dir();
    if dir.is_dir() {
        Ok(())
    } else {
        Err(FlatripError::Config(format!(
            "Recordings folder {} does not exist. Set recordings.source_dir with 'flatrip init'.",
            dir.display()
        )))
    }
}

/// Check if an external tool is available.
fn check_tool(name: &str) -> Result<()> {
    // ffmpeg/ffprobe use -version (single dash)
    match Command::new(name).arg("-version").output() {
        Ok(output) if output.status.success() => Ok(()),
        Ok(_) => Err(FlatripError::ToolNotFound(format!(
            "{} is installed but not working correctly",
            name
        ))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(FlatripError::ToolNotFound(name.to_string()))
        }
        Err(e) => Err(FlatripError::ToolNotFound(format!("{}: {}", name, e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_check_list_requires_existing_source_dir() {
        let mut settings = Settings::default();
        settings.recordings.source_dir = "/nonexistent/flatrip-preflight".to_string();

        let err = check(Operation::List, &settings).unwrap_err();
        assert!(matches!(err, FlatripError::Config(_)));
    }

    #[test]
    fn test_check_list_passes_with_source_dir() {
        let dir = tempdir().unwrap();
        let mut settings = Settings::default();
        settings.recordings.source_dir = dir.path().to_string_lossy().into_owned();

        assert!(check(Operation::List, &settings).is_ok());
    }
}
