//! CLI module for Flatrip.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Flatrip - Recordings to MP3
///
/// A local-first CLI tool that flattens a nested recordings folder and
/// rips the audio track of selected recordings to MP3.
#[derive(Parser, Debug)]
#[command(name = "flatrip")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Flatten the recordings folder and convert selected recordings to MP3
    Convert {
        /// Selection mode: 'latest' or 'today' (prompts when omitted)
        #[arg(short, long)]
        mode: Option<String>,

        /// Recordings folder (overrides config)
        #[arg(short, long)]
        source: Option<String>,

        /// Output folder for MP3 files (overrides config)
        #[arg(short, long)]
        dest: Option<String>,
    },

    /// List recordings in the source folder
    List,

    /// Initialize Flatrip and write a starter configuration
    Init,

    /// Check system requirements and configuration
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,
}
