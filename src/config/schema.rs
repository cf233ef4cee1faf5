//! Configuration schema types for `gifsheet.toml`
//!
//! Defines the structure and validation rules for gifsheet configuration.

use crate::layout::{BuildConfig, Tile};
use crate::source::TranscodeConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default overrides applied to every build
///
/// Same fields as [`BuildConfig`]; anything set on the command line or in
/// inline settings wins over these.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Maximum frames to keep
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frames: Option<u32>,
    /// Grid shape, e.g. "4x4"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tile: Option<String>,
    /// Reported frame rate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fps: Option<u32>,
}

impl DefaultsConfig {
    pub fn build_config(&self) -> BuildConfig {
        BuildConfig { frame_count: self.frames, tile: self.tile.clone(), fps: self.fps }
    }
}

/// Where and how sheets are written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory for generated sheets
    #[serde(default = "default_dir")]
    pub dir: PathBuf,
    /// Write a JSON metadata file next to each sheet
    #[serde(default = "default_true")]
    pub metadata: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { dir: default_dir(), metadata: true }
    }
}

fn default_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_true() -> bool {
    true
}

/// Rendering settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Worker threads for frame scaling (default: all cores)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jobs: Option<usize>,
}

/// Complete gifsheet.toml configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetConfig {
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub render: RenderConfig,
    /// Video transcoding settings
    #[serde(default)]
    pub transcode: TranscodeConfig,
}

/// Configuration validation error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "defaults.tile")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "gifsheet.toml: '{}' {}", self.field, self.message)
    }
}

impl SheetConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();
        let mut push = |field: &str, message: String| {
            errors.push(ConfigValidationError { field: field.to_string(), message });
        };

        if let Some(tile) = &self.defaults.tile {
            if let Err(e) = Tile::parse(tile) {
                push("defaults.tile", e.to_string());
            }
        }
        if self.defaults.frames == Some(0) {
            push("defaults.frames", "must be a positive integer".to_string());
        }
        if self.defaults.fps == Some(0) {
            push("defaults.fps", "must be a positive integer".to_string());
        }
        if self.render.jobs == Some(0) {
            push("render.jobs", "must be a positive integer".to_string());
        }
        if self.transcode.fps == 0 {
            push("transcode.fps", "must be a positive integer".to_string());
        }
        if self.transcode.width == 0 {
            push("transcode.width", "must be a positive integer".to_string());
        }
        if self.transcode.ffmpeg.as_os_str().is_empty() {
            push("transcode.ffmpeg", "must not be empty".to_string());
        }

        errors
    }
}
