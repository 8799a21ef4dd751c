//! Dashboard configuration.
//!
//! Values come from an optional JSON file; command-line flags override them.

use crate::gallery::PlotType;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming the example-data cache directory.
pub const DATA_HOME_ENV: &str = "SEABORN_DATA";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Directory holding `<dataset>.csv` files.
    pub data_dir: Option<PathBuf>,
    pub default_plot: PlotType,
    pub window_width: f32,
    pub window_height: f32,
    pub export_width: u32,
    pub export_height: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            default_plot: PlotType::default(),
            window_width: 1100.0,
            window_height: 900.0,
            export_width: 1000,
            export_height: 700,
        }
    }
}

impl DashboardConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Command-line values replace file values when given.
    pub fn apply_overrides(&mut self, data_dir: Option<PathBuf>, plot: Option<PlotType>) {
        if let Some(dir) = data_dir {
            self.data_dir = Some(dir);
        }
        if let Some(plot) = plot {
            self.default_plot = plot;
        }
    }

    /// The configured data directory, else the example-data home.
    pub fn resolve_data_dir(&self) -> PathBuf {
        match &self.data_dir {
            Some(dir) => dir.clone(),
            None => data_home(std::env::var_os(DATA_HOME_ENV), dirs::home_dir()),
        }
    }
}

/// `$SEABORN_DATA` if set, else `~/seaborn-data`.
pub fn data_home(env_value: Option<OsString>, home: Option<PathBuf>) -> PathBuf {
    match env_value.filter(|v| !v.is_empty()) {
        Some(dir) => PathBuf::from(dir),
        None => home
            .unwrap_or_else(|| PathBuf::from("."))
            .join("seaborn-data"),
    }
}
