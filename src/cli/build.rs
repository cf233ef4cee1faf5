//! Build command implementation

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tracing::{error, info};

use super::{expand_inputs, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};
use crate::config::{
    effective_build_config, find_config, load_config, merge_cli_overrides, resolve_path,
    CliOverrides, SheetConfig,
};
use crate::error::SheetError;
use crate::layout::{default_tier, BuildConfig, LayoutConfig, Tile, MAX_FRAMES};
use crate::output::{generate_output_path, save_sheet, WrittenSheet};
use crate::pipeline::{build, build_with_jobs, SpriteSheet};
use crate::settings::parse_settings;
use crate::source::{self, Transcoder};

/// Load config from an explicit path or by discovery, resolving the output
/// directory against the config file's location.
pub(crate) fn load_sheet_config(config_arg: Option<&Path>) -> Result<SheetConfig, ExitCode> {
    let config_path = config_arg.map(Path::to_path_buf).or_else(find_config);
    let mut config = match load_config(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Err(ExitCode::from(EXIT_INVALID_ARGS));
        }
    };
    if let Some(path) = &config_path {
        info!(config = %path.display(), "loaded config");
        if let Some(root) = path.parent() {
            config.output.dir = resolve_path(root, &config.output.dir);
        }
    }
    Ok(config)
}

/// Reject a tile that is malformed, or too large even with the smallest cells.
fn check_tile(tile: &str) -> Result<(), SheetError> {
    let Tile { columns, rows } = Tile::parse(tile)?;
    let (_, smallest_cell) = default_tier(MAX_FRAMES);
    LayoutConfig { columns, rows, cell_size: smallest_cell }
        .canvas_size()
        .map(|_| ())
        .map_err(|e| match e {
            SheetError::Config { reason, .. } => SheetError::config(tile, reason),
            other => other,
        })
}

/// Execute the build command
pub fn run_build(
    inputs: &[PathBuf],
    output: Option<&Path>,
    overrides: &CliOverrides,
    settings: Option<&str>,
    config_arg: Option<&Path>,
    json: bool,
) -> ExitCode {
    let mut config = match load_sheet_config(config_arg) {
        Ok(config) => config,
        Err(code) => return code,
    };
    merge_cli_overrides(&mut config, overrides);

    let inline = settings.map(parse_settings).unwrap_or_default();
    let build_config = effective_build_config(&config, overrides, &inline);

    // Catch a bad tile before decoding anything
    if let Some(tile) = &build_config.tile {
        if let Err(e) = check_tile(tile) {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    }

    let files = expand_inputs(inputs);
    if files.is_empty() {
        eprintln!("Error: No input files found");
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let transcoder = Transcoder::new(config.transcode.clone());
    let is_single = files.len() == 1;
    let mut failures = 0usize;

    for file in &files {
        match build_one(file, &config, &build_config, &transcoder, output, is_single) {
            Ok((sheet, written)) => report(file, &sheet, &written, json),
            Err(message) => {
                error!(input = %file.display(), "{}", message);
                eprintln!("Error: {}: {}", file.display(), message);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        ExitCode::from(EXIT_ERROR)
    } else {
        ExitCode::from(EXIT_SUCCESS)
    }
}

/// Decode, build and save a single input.
fn build_one(
    input: &Path,
    config: &SheetConfig,
    build_config: &BuildConfig,
    transcoder: &Transcoder,
    output: Option<&Path>,
    is_single: bool,
) -> Result<(SpriteSheet, WrittenSheet), String> {
    info!(input = %input.display(), "processing");
    let sequence = source::open(input, transcoder).map_err(|e| e.to_string())?;

    let sheet = match config.render.jobs {
        Some(jobs) => build_with_jobs(&sequence, build_config, jobs),
        None => build(&sequence, build_config),
    }
    .map_err(|e| e.to_string())?;

    let path =
        generate_output_path(input, &sheet.metadata, &config.output.dir, output, is_single);
    let written = save_sheet(&sheet, &path, config.output.metadata).map_err(|e| e.to_string())?;
    info!(output = %written.image.display(), "sprite sheet saved");

    Ok((sheet, written))
}

fn report(input: &Path, sheet: &SpriteSheet, written: &WrittenSheet, json: bool) {
    if json {
        let value = serde_json::json!({
            "input": input.display().to_string(),
            "output": written.image.display().to_string(),
            "metadata_file": written.metadata.as_ref().map(|p| p.display().to_string()),
            "width": sheet.width(),
            "height": sheet.height(),
            "metadata": sheet.metadata,
        });
        println!("{}", value);
    } else {
        println!("{}", input.display());
        println!("{}", sheet.metadata);
        println!("  Saved to:             {}", written.image.display());
    }
}
