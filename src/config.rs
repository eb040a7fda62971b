//! Application Configuration
//! Optional JSON settings file; every field falls back to a default.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// File looked up in the working directory at startup.
pub const CONFIG_FILE_NAME: &str = "chartify_fit.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Raster export settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub width: u32,
    pub height: u32,
    /// Draw captions and axis labels. Needs a system sans-serif font.
    pub draw_labels: bool,
    /// Open the destination folder once the archive is written.
    pub open_after_export: bool,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 700,
            draw_labels: true,
            open_after_export: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
    /// Rows scanned by the CSV reader to infer column types.
    pub infer_schema_rows: usize,
    pub export: ExportSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_size: [1400.0, 850.0],
            min_window_size: [1000.0, 650.0],
            infer_schema_rows: 10000,
            export: ExportSettings::default(),
        }
    }
}

impl AppConfig {
    /// Read a config file. Missing fields take their defaults.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Load `chartify_fit.json` when present, otherwise defaults.
    /// A broken file is reported and ignored.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::from_path(path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("{e}; using defaults");
                Self::default()
            }
        }
    }
}
