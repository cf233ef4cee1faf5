//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod build;
mod info;

use clap::{Parser, Subcommand};
use glob::glob;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use crate::config::CliOverrides;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Extensions picked up when an input is a directory
const INPUT_EXTENSIONS: &[&str] = &["gif", "mp4", "mov", "webm", "mkv"];

/// Check if a path looks like an animation input (.gif or a video container).
pub fn is_animation_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| INPUT_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Find all animation files in a directory (recursively), sorted by path.
///
/// Extensions match case-insensitively, so `CLIP.GIF` is picked up too.
pub fn find_animation_files(dir: &Path) -> Vec<PathBuf> {
    let pattern = format!("{}/**/*", dir.display());
    let mut files: Vec<PathBuf> = match glob(&pattern) {
        Ok(paths) => paths
            .filter_map(Result::ok)
            .filter(|p| p.is_file() && is_animation_file(p))
            .collect(),
        Err(e) => {
            warn!(dir = %dir.display(), "could not scan directory: {}", e);
            Vec::new()
        }
    };

    files.sort();
    files
}

/// Expand directories in `inputs` into the animation files they contain.
pub fn expand_inputs(inputs: &[PathBuf]) -> Vec<PathBuf> {
    inputs
        .iter()
        .flat_map(|input| {
            if input.is_dir() {
                find_animation_files(input)
            } else {
                vec![input.clone()]
            }
        })
        .collect()
}

/// gifsheet - turn animated GIFs and short videos into sprite sheets
#[derive(Parser)]
#[command(name = "gifsheet")]
#[command(about = "gifsheet - Turn animated GIFs and short videos into tiled sprite sheets")]
#[command(version)]
pub struct Cli {
    /// Log debug output (RUST_LOG overrides this)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a sprite sheet from each input
    Build {
        /// Input files or directories (.gif, .mp4, .mov, .webm, .mkv, or a still image)
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output file or directory.
        /// If omitted: {output.dir}/SpriteSheet_{frames}frames_{fps}fps.png
        /// If file (single input): that file
        /// If file (multiple inputs): {stem}_{input}.png
        /// If directory (ends with /): dir/SpriteSheet_....png
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Keep at most this many frames (hard limit 64)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        frames: Option<u32>,

        /// Grid shape as COLSxROWS (e.g., "4x4"); does not change the cell size
        #[arg(long)]
        tile: Option<String>,

        /// Frame rate to report in metadata and the file name
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        fps: Option<u32>,

        /// Free-text settings, e.g. "frames:12 tile:4x3 fps:8"
        #[arg(long)]
        settings: Option<String>,

        /// Path to gifsheet.toml (default: discovered from the current directory)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Worker threads for frame scaling
        #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
        jobs: Option<u64>,

        /// Print metadata as JSON
        #[arg(long)]
        json: bool,

        /// Don't write a .json metadata file next to each sheet
        #[arg(long)]
        no_metadata: bool,
    },
    /// Show frame count, size and timing of an input without building
    Info {
        /// Input file
        input: PathBuf,

        /// Path to gifsheet.toml (used for video transcoding settings)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Install the global tracing subscriber, writing to stderr.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
    if let Err(e) = installed {
        // Embedded callers may have installed their own subscriber
        debug!("keeping existing tracing subscriber: {}", e);
    }
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Build {
            inputs,
            output,
            frames,
            tile,
            fps,
            settings,
            config,
            jobs,
            json,
            no_metadata,
        } => {
            let overrides = CliOverrides {
                frames,
                tile,
                fps,
                jobs: jobs.map(|j| j as usize),
                no_metadata,
            };
            build::run_build(
                &inputs,
                output.as_deref(),
                &overrides,
                settings.as_deref(),
                config.as_deref(),
                json,
            )
        }
        Commands::Info { input, config, json } => info::run_info(&input, config.as_deref(), json),
    }
}
