//! TOML-based configuration for reportdoc.
//!
//! Example configuration:
//! ```toml
//! [normalize]
//! date_table_pattern = "^(LocalDateTable|DateTableTemplate)_"
//!
//! [scan]
//! content_provider_type = "PbixInImportMode"
//! excluded_name_markers = ["Usage Metrics Report"]
//!
//! [logging]
//! filter = "reportdoc=debug"
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::ingest::scan::{ReportFilter, DEFAULT_CONTENT_PROVIDER, USAGE_METRICS_REPORT};
use crate::ingest::{NormalizeOptions, DEFAULT_DATE_TABLE_PATTERN};

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Normalization settings.
    pub normalize: NormalizeSettings,

    /// Scan document settings.
    pub scan: ScanSettings,

    /// Logging settings.
    pub logging: LoggingSettings,
}

/// Normalization settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct NormalizeSettings {
    /// Regex matching auto-generated date tables, which are left out.
    pub date_table_pattern: String,
}

impl Default for NormalizeSettings {
    fn default() -> Self {
        Self {
            date_table_pattern: DEFAULT_DATE_TABLE_PATTERN.to_string(),
        }
    }
}

/// Which scanned datasets are listed as reports.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScanSettings {
    /// Required fragment of a dataset's content provider type.
    pub content_provider_type: String,

    /// Datasets whose name contains one of these are not listed.
    pub excluded_name_markers: Vec<String>,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            content_provider_type: DEFAULT_CONTENT_PROVIDER.to_string(),
            excluded_name_markers: vec![USAGE_METRICS_REPORT.to_string()],
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        Ok(settings)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `REPORTDOC_CONFIG`
    /// 2. `./reportdoc.toml`
    /// 3. `~/.config/reportdoc/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var("REPORTDOC_CONFIG") {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("reportdoc.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("reportdoc").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        Ok(Settings::default())
    }

    /// Build the adapters' options.
    pub fn normalize_options(&self) -> Result<NormalizeOptions, SettingsError> {
        NormalizeOptions::default()
            .with_date_table_pattern(&self.normalize.date_table_pattern)
            .map_err(|e| {
                SettingsError::InvalidConfig(format!(
                    "normalize.date_table_pattern '{}': {}",
                    self.normalize.date_table_pattern, e
                ))
            })
    }

    /// Build the report listing filter.
    pub fn report_filter(&self) -> ReportFilter {
        ReportFilter {
            content_provider_type: self.scan.content_provider_type.clone(),
            excluded_name_markers: self.scan.excluded_name_markers.clone(),
        }
    }
}
