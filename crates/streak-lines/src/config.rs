//! JSON configuration and report helpers.

use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use streak_lines_core::{ImageMatrixElement, Line};
use streak_lines_hough::HoughParams;

#[derive(thiserror::Error, Debug)]
pub enum ConfigIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

const DEFAULT_REPORT_PATH: &str = "streak_lines_report.json";

/// Everything one detection run needs. Missing fields take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectConfig {
    pub image_path: String,
    pub output_path: Option<String>,
    /// Cap on lines per frame, or per tile when tiling.
    pub max_results: Option<usize>,
    /// Side of the square tiles the frame is split into; 0 keeps the frame whole.
    pub tile_size: usize,
    pub hough: HoughParams,
}

impl DetectConfig {
    pub fn new(image_path: impl Into<String>) -> Self {
        Self {
            image_path: image_path.into(),
            ..Self::default()
        }
    }

    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ConfigIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ConfigIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Resolve the output report path.
    pub fn output_path(&self) -> PathBuf {
        self.output_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT_PATH))
    }
}

/// Result of one detection run.
///
/// `lines` are always in frame coordinates, strongest first. When the frame
/// was tiled, `tiles` holds the per-tile results in tile-local coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectReport {
    pub image_path: String,
    pub width: usize,
    pub height: usize,
    pub tile_size: usize,
    pub lines: Vec<Line>,
    #[serde(default)]
    pub tiles: Option<Vec<ImageMatrixElement>>,
}

impl DetectReport {
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ConfigIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ConfigIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
