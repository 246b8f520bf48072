//! Configuration module for reportdoc.
//!
//! Handles the settings file and its defaults.

mod settings;

pub use settings::{LoggingSettings, NormalizeSettings, ScanSettings, Settings, SettingsError};
