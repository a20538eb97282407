//! Configuration management for Flatrip.

mod settings;

pub use settings::{ConversionSettings, GeneralSettings, RecordingSettings, Settings};
