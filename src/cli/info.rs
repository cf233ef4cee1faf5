//! Info command implementation

use std::path::Path;
use std::process::ExitCode;

use super::build::load_sheet_config;
use super::{EXIT_ERROR, EXIT_SUCCESS};
use crate::layout::{default_tier, retained_frames, BuildConfig};
use crate::source::{self, Transcoder};

/// Execute the info command
pub fn run_info(input: &Path, config_arg: Option<&Path>, json: bool) -> ExitCode {
    let config = match load_sheet_config(config_arg) {
        Ok(config) => config,
        Err(code) => return code,
    };

    let sequence = match source::open(input, &Transcoder::new(config.transcode)) {
        Ok(sequence) => sequence,
        Err(e) => {
            eprintln!("Error: {}: {}", input.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let (width, height) = sequence.dimensions();
    let retained = retained_frames(sequence.frame_count(), &BuildConfig::default());
    let (tile, cell_size) = default_tier(retained);

    if json {
        let value = serde_json::json!({
            "input": input.display().to_string(),
            "frames": sequence.frame_count(),
            "width": width,
            "height": height,
            "delay_cs": sequence.delay_cs(),
            "fps": sequence.fps(),
            "default_tile": tile,
            "default_cell_size": cell_size,
        });
        println!("{}", value);
    } else {
        println!("{}", input.display());
        println!("  Frames:       {}", sequence.frame_count());
        println!("  Dimensions:   {}x{}", width, height);
        println!("  Delay:        {}cs", sequence.delay_cs());
        println!("  FPS:          {}", sequence.fps());
        println!("  Default tile: {} ({}px cells, {} frames)", tile, cell_size, retained);
    }

    ExitCode::from(EXIT_SUCCESS)
}
