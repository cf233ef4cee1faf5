//! Error types for sprite sheet building

use thiserror::Error;

/// Failure of a single `build` call.
///
/// Every variant is fatal for the build it came from. No partial canvas is
/// ever returned alongside one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SheetError {
    /// The animation had no frames at all
    #[error("Animation contains no frames")]
    EmptyAnimation,
    /// The tile string is not `{cols}x{rows}` with two positive integers,
    /// or describes a canvas too large to allocate
    #[error("Invalid tile configuration '{tile}': {reason}")]
    Config { tile: String, reason: String },
    /// A frame reported a zero-sized dimension
    #[error("Frame {index} has invalid dimensions {width}x{height}")]
    Scale { index: usize, width: u32, height: u32 },
}

impl SheetError {
    /// Build a [`SheetError::Config`] for the given tile string.
    pub fn config(tile: impl Into<String>, reason: impl Into<String>) -> Self {
        SheetError::Config { tile: tile.into(), reason: reason.into() }
    }
}
