//! List command - show recordings without touching them.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::recording;
use chrono::{DateTime, Local};

/// List the recordings in the source folder with their modification times.
///
/// Read-only: the folder is not collapsed first, so nested recordings are
/// not shown until a convert run flattens them.
pub fn run_list(settings: Settings) -> anyhow::Result<()> {
    if let Err(e) = preflight::check(Operation::List, &settings) {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    let dir = settings.source_dir();
    let files = recording::matching_files(&dir, &settings.recordings.extension)?;

    if files.is_empty() {
        Output::info(&format!("No recordings found in {}.", dir.display()));
        return Ok(());
    }

    Output::header(&format!("Recordings in {}", dir.display()));
    for file in &files {
        let name = file.file_name().unwrap_or_default().to_string_lossy();
        let modified: DateTime<Local> = recording::modified_at(file)?.into();
        Output::list_item(&format!("{}  ({})", name, modified.format("%Y-%m-%d %H:%M:%S")));
    }

    println!();
    Output::info(&format!("{} recording(s).", files.len()));
    Ok(())
}
