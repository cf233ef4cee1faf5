//! Tile layout planning - grid shape and cell size for a sheet
//!
//! Planning happens in a fixed order:
//!
//! 1. Clamp the frame list to [`MAX_FRAMES`].
//! 2. Apply the frame count override, itself capped at [`MAX_FRAMES`].
//! 3. Choose a default tile and cell size from the retained frame count.
//! 4. Replace the tile (and only the tile) with the override, if any.
//! 5. Parse the effective tile into columns and rows.
//!
//! A tile override never changes the cell size. Overriding `4x4` with `2x2`
//! on a 10 frame animation keeps 256px cells and leaves frames 4..10 without
//! a cell.

use crate::error::SheetError;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Hard ceiling on frames in a sheet, applied before any override.
pub const MAX_FRAMES: usize = 64;

/// Largest canvas a layout may describe, in pixels (1 GiB of RGBA).
pub const MAX_CANVAS_PIXELS: u64 = 1 << 28;

/// Optional per-build overrides. Absent fields fall back to computed defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Keep at most this many frames (still capped at [`MAX_FRAMES`])
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_count: Option<u32>,
    /// Grid shape as `{cols}x{rows}`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tile: Option<String>,
    /// Reported frame rate; a label only, no retiming happens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fps: Option<u32>,
}

impl BuildConfig {
    pub fn with_frame_count(mut self, frame_count: u32) -> Self {
        self.frame_count = Some(frame_count);
        self
    }

    pub fn with_tile(mut self, tile: impl Into<String>) -> Self {
        self.tile = Some(tile.into());
        self
    }

    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = Some(fps);
        self
    }

    /// Fill every absent field from `fallback`.
    pub fn or(self, fallback: &BuildConfig) -> BuildConfig {
        BuildConfig {
            frame_count: self.frame_count.or(fallback.frame_count),
            tile: self.tile.or_else(|| fallback.tile.clone()),
            fps: self.fps.or(fallback.fps),
        }
    }
}

/// Grid dimensions in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub columns: u32,
    pub rows: u32,
}

impl Tile {
    /// Parse `"{cols}x{rows}"` where both are positive integers.
    pub fn parse(s: &str) -> Result<Tile, SheetError> {
        let (cols, rows) = s
            .split_once('x')
            .ok_or_else(|| SheetError::config(s, "expected COLSxROWS, e.g. '4x4'"))?;
        let parse_part = |part: &str, what: &str| -> Result<u32, SheetError> {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(SheetError::config(s, format!("{} must be a positive integer", what)));
            }
            match part.parse::<u32>() {
                Ok(n) if n > 0 => Ok(n),
                Ok(_) => Err(SheetError::config(s, format!("{} must be at least 1", what))),
                Err(_) => Err(SheetError::config(s, format!("{} is out of range", what))),
            }
        };
        Ok(Tile { columns: parse_part(cols, "columns")?, rows: parse_part(rows, "rows")? })
    }

    /// Number of cells in the grid.
    pub fn capacity(&self) -> usize {
        self.columns as usize * self.rows as usize
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.columns, self.rows)
    }
}

/// Resolved grid: columns, rows and square cell size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutConfig {
    pub columns: u32,
    pub rows: u32,
    pub cell_size: u32,
}

impl LayoutConfig {
    pub fn tile(&self) -> Tile {
        Tile { columns: self.columns, rows: self.rows }
    }

    /// Number of frames the grid can hold.
    pub fn capacity(&self) -> usize {
        self.tile().capacity()
    }

    /// Canvas size in pixels, `(columns * cell, rows * cell)`.
    ///
    /// Fails if either side overflows `u32` or the total exceeds
    /// [`MAX_CANVAS_PIXELS`].
    pub fn canvas_size(&self) -> Result<(u32, u32), SheetError> {
        let too_large = || {
            SheetError::config(
                self.tile().to_string(),
                format!("canvas too large for {}px cells", self.cell_size),
            )
        };
        let width = self.columns.checked_mul(self.cell_size).ok_or_else(too_large)?;
        let height = self.rows.checked_mul(self.cell_size).ok_or_else(too_large)?;
        if u64::from(width) * u64::from(height) > MAX_CANVAS_PIXELS {
            return Err(too_large());
        }
        Ok((width, height))
    }

    /// Top-left pixel of the cell holding frame `index` (row-major order).
    pub fn cell_origin(&self, index: usize) -> (u32, u32) {
        let i = index as u32;
        let row = i / self.columns;
        let col = i % self.columns;
        (col * self.cell_size, row * self.cell_size)
    }
}

/// Outcome of planning: the grid, how many frames survive, and the tile label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutPlan {
    pub layout: LayoutConfig,
    /// Frames kept after clamping and the frame count override
    pub frame_count: usize,
    /// The effective tile string as given (override or default)
    pub tile: String,
}

/// Default `(tile, cell_size)` tier for a retained frame count.
pub fn default_tier(frame_count: usize) -> (&'static str, u32) {
    if frame_count <= 4 {
        ("2x2", 512)
    } else if frame_count <= 16 {
        ("4x4", 256)
    } else {
        ("8x8", 128)
    }
}

/// Number of frames retained from `native_count` under `config`.
///
/// A zero frame override counts as absent.
pub fn retained_frames(native_count: usize, config: &BuildConfig) -> usize {
    let clamped = native_count.min(MAX_FRAMES);
    match config.frame_count {
        Some(n) if n > 0 => clamped.min((n as usize).min(MAX_FRAMES)),
        _ => clamped,
    }
}

/// Plan the grid for an animation with `native_count` frames.
pub fn plan(native_count: usize, config: &BuildConfig) -> Result<LayoutPlan, SheetError> {
    let frame_count = retained_frames(native_count, config);
    let (default_tile, cell_size) = default_tier(frame_count);
    let tile = config.tile.clone().unwrap_or_else(|| default_tile.to_string());
    let Tile { columns, rows } = Tile::parse(&tile)?;
    let layout = LayoutConfig { columns, rows, cell_size };
    // Report the tile as given, not its normalized form
    layout.canvas_size().map_err(|e| match e {
        SheetError::Config { reason, .. } => SheetError::config(&tile, reason),
        other => other,
    })?;

    debug!(frame_count, %tile, cell_size, "planned sheet layout");

    Ok(LayoutPlan { layout, frame_count, tile })
}
