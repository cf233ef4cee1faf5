//! Configuration loading and discovery for `gifsheet.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::SheetConfig;
use crate::layout::BuildConfig;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the configuration file
pub const CONFIG_FILE: &str = "gifsheet.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse gifsheet.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override frame count
    pub frames: Option<u32>,
    /// Override tile
    pub tile: Option<String>,
    /// Override reported fps
    pub fps: Option<u32>,
    /// Number of parallel jobs
    pub jobs: Option<usize>,
    /// Disable metadata sidecar files
    pub no_metadata: bool,
}

/// Find gifsheet.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for gifsheet.toml
/// 2. Check XDG_CONFIG_HOME/gifsheet/gifsheet.toml (or ~/.config/gifsheet/gifsheet.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find gifsheet.toml in the XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("gifsheet").join(CONFIG_FILE);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Find gifsheet.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a gifsheet.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses
/// [`find_config`] to locate one. With no config file at all the defaults
/// are returned.
pub fn load_config(path: Option<&Path>) -> Result<SheetConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => load_config_file(&p),
        None => Ok(SheetConfig::default()),
    }
}

/// Load and validate configuration from a specific file path.
pub fn load_config_file(path: &Path) -> Result<SheetConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Parse and validate configuration text.
pub fn parse_config(contents: &str) -> Result<SheetConfig, ConfigError> {
    let config: SheetConfig = toml::from_str(contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(config)
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values. The per-build
/// fields (frames, tile, fps) are resolved by [`effective_build_config`]
/// instead, since inline settings sit between the two.
pub fn merge_cli_overrides(config: &mut SheetConfig, overrides: &CliOverrides) {
    if let Some(jobs) = overrides.jobs {
        config.render.jobs = Some(jobs);
    }
    if overrides.no_metadata {
        config.output.metadata = false;
    }
}

/// Resolve the build config for one input.
///
/// Precedence, highest first: CLI flags, inline settings, config defaults.
pub fn effective_build_config(
    config: &SheetConfig,
    overrides: &CliOverrides,
    inline: &BuildConfig,
) -> BuildConfig {
    let cli = BuildConfig {
        frame_count: overrides.frames,
        tile: overrides.tile.clone(),
        fps: overrides.fps,
    };
    cli.or(inline).or(&config.defaults.build_config())
}

/// Resolve a path relative to the directory holding the config file.
///
/// If the path is absolute, returns it unchanged.
pub fn resolve_path(config_root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        config_root.join(path)
    }
}
