//! Flatrip - Recordings to MP3
//!
//! A local-first CLI tool for flattening nested recording folders and
//! ripping the audio track of screen recordings to MP3.
//!
//! # Overview
//!
//! Capture tools like to bury recordings in per-session subfolders.
//! Flatrip collapses that tree into a single flat folder, picks the
//! recordings you care about (the newest one, or everything from today),
//! and hands each one to ffmpeg to extract an MP3.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management
//! - `folder` - Recursive folder collapsing
//! - `recording` - Recording selection by recency or date
//! - `transcode` - Media transcoder abstraction (ffmpeg)
//! - `orchestrator` - Pipeline coordination
//!
//! # Example
//!
//! ```rust,no_run
//! use flatrip::config::Settings;
//! use flatrip::orchestrator::{Orchestrator, SelectionMode};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let orchestrator = Orchestrator::new(settings);
//!
//!     // Convert the newest recording in the configured folder
//!     let report = orchestrator.run(SelectionMode::Latest).await?;
//!     println!("Converted {} recording(s)", report.converted_count());
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod folder;
pub mod orchestrator;
pub mod recording;
pub mod transcode;

pub use error::{FlatripError, Result};
