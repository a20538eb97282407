//! Convert command - flatten the recordings folder and rip audio.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::{ConversionReport, Orchestrator, SelectionMode};
use std::io::{self, BufRead, Write};

/// Run the convert command.
///
/// When `mode` is not given on the command line, falls back to the
/// two-item interactive menu.
pub async fn run_convert(
    mode: Option<&str>,
    source: Option<String>,
    dest: Option<String>,
    mut settings: Settings,
) -> anyhow::Result<()> {
    if let Some(s) = source {
        settings.recordings.source_dir = s;
    }
    if let Some(d) = dest {
        settings.conversion.destination_dir = d;
    }

    if let Err(e) = preflight::check(Operation::Convert, &settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'flatrip doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let mode = match mode {
        Some(m) => m.parse::<SelectionMode>().map_err(anyhow::Error::msg)?,
        None => prompt_mode()?,
    };

    Output::kv("Recordings", &settings.source_dir().display().to_string());
    Output::kv("Output", &settings.destination_dir().display().to_string());

    let spinner = Output::spinner("Flattening folders and converting...");
    let orchestrator = Orchestrator::new(settings);
    let result = orchestrator.run(mode).await;
    spinner.finish_and_clear();

    let report = result?;
    print_report(&report);

    if report.failed_count() > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn print_report(report: &ConversionReport) {
    if report.is_empty() {
        Output::info("No recordings matched. Nothing to convert.");
        return;
    }

    for outcome in &report.outcomes {
        let name = outcome.source.file_name().unwrap_or_default().to_string_lossy();
        match &outcome.outcome {
            Ok(dest) => Output::list_item(&format!("{} -> {}", name, dest.display())),
            Err(e) => Output::error(&format!("{}: {}", name, e)),
        }
    }

    if report.failed_count() > 0 {
        Output::warning(&format!(
            "{} of {} conversion(s) failed.",
            report.failed_count(),
            report.outcomes.len()
        ));
    } else {
        Output::success(&format!("Converted {} recording(s).", report.converted_count()));
    }
}

/// Ask which recordings to convert, retrying until the answer is valid.
fn prompt_mode() -> anyhow::Result<SelectionMode> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        println!("Press '1' for the most recent recording.");
        println!("Press '2' for all recordings from today.");
        print!(">> ");
        stdout.flush()?;

        let mut input = String::new();
        stdin.lock().read_line(&mut input)?;

        match input.trim() {
            "1" => return Ok(SelectionMode::Latest),
            "2" => return Ok(SelectionMode::Today),
            _ => Output::warning("Invalid selection."),
        }
    }
}
