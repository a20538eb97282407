//! Init command - interactive first-run setup.

use crate::cli::Output;
use crate::config::Settings;
use console::style;
use std::io::{self, BufRead, Write};

/// Run the init command for first-time setup.
pub fn run_init(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Flatrip Setup");
    println!();
    println!("Welcome to Flatrip! Let's set up your folders.\n");

    // Step 1: Check prerequisites
    println!("{}", style("Step 1: Checking prerequisites").bold().cyan());
    println!();

    let missing = missing_tools();
    if missing.is_empty() {
        Output::success("ffmpeg and ffprobe are installed!");
    } else {
        Output::warning("Some tools are missing. Please install them:");
        println!();
        for name in &missing {
            println!("  {} {} - not found", style("✗").red(), style(name).bold());
            println!(
                "    {} {}",
                style("→").dim(),
                style("Install ffmpeg (includes ffprobe) via your package manager").dim()
            );
        }
        println!();

        if !prompt_continue("Continue anyway?")? {
            println!();
            Output::info("Setup cancelled. Install ffmpeg and run 'flatrip init' again.");
            return Ok(());
        }
    }

    println!();

    // Step 2: Pick folders
    println!("{}", style("Step 2: Choosing folders").bold().cyan());
    println!();

    let mut configured = settings.clone();
    configured.recordings.source_dir = prompt_path(
        "Where does your capture tool save recordings?",
        &settings.recordings.source_dir,
    )?;
    configured.conversion.destination_dir = prompt_path(
        "Where should converted MP3 files go?",
        &settings.conversion.destination_dir,
    )?;

    println!();

    // Step 3: Write config
    println!("{}", style("Step 3: Writing configuration").bold().cyan());
    println!();

    let config_path = Settings::default_config_path();
    if config_path.exists() && !prompt_continue("A config file already exists. Overwrite?")? {
        println!();
        Output::info("Setup cancelled. Existing configuration left untouched.");
        return Ok(());
    }

    configured.save()?;
    Output::success(&format!("Configuration written to {}", config_path.display()));
    println!();
    Output::info("Run 'flatrip convert' to convert your first recording.");

    Ok(())
}

/// Names of required tools that are not on the PATH.
fn missing_tools() -> Vec<&'static str> {
    ["ffmpeg", "ffprobe"]
        .into_iter()
        .filter(|name| {
            std::process::Command::new(name)
                .arg("-version")
                .output()
                .map(|o| !o.status.success())
                .unwrap_or(true)
        })
        .collect()
}

/// Prompt for a directory path, falling back to the default on empty input.
fn prompt_path(question: &str, default: &str) -> anyhow::Result<String> {
    print!("{} [{}] ", question, style(default).dim());
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;

    let trimmed = input.trim();
    if trimmed.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(trimmed.to_string())
    }
}

/// Ask a yes/no question, defaulting to no.
fn prompt_continue(question: &str) -> anyhow::Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;

    Ok(matches!(input.trim().to_lowercase().as_str(), "y" | "yes"))
}
