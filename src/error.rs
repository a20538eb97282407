//! Error types for Flatrip.

use std::path::PathBuf;
use thiserror::Error;

/// Library-level error type for Flatrip operations.
#[derive(Error, Debug)]
pub enum FlatripError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filesystem error at {}: {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Name collision: {} already exists in the target folder", .0.display())]
    Collision(PathBuf),

    #[error("Path vanished during scan: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Transcode failed for {}: {reason}", .path.display())]
    Transcode { path: PathBuf, reason: String },

    #[error("External tool not found: {0}. Please install it and ensure it's in your PATH.")]
    ToolNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl FlatripError {
    /// Wrap an I/O error with the path it occurred on.
    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FlatripError::Filesystem {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for Flatrip operations.
pub type Result<T> = std::result::Result<T, FlatripError>;
