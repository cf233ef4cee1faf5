//! Aspect-preserving frame scaling into square cells

use crate::error::SheetError;
use image::imageops::{self, FilterType};
use image::RgbaImage;

/// Target size of one frame inside a `cell_size` square cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaledSize {
    pub width: u32,
    pub height: u32,
    pub cell_size: u32,
}

impl ScaledSize {
    /// Offset of the scaled frame inside its cell, centered with the frame
    /// biased one pixel toward the top-left for odd remainders.
    pub fn offset(&self) -> (u32, u32) {
        (
            self.cell_size.saturating_sub(self.width) / 2,
            self.cell_size.saturating_sub(self.height) / 2,
        )
    }
}

/// A resampled frame ready to be placed on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledFrame {
    pub size: ScaledSize,
    pub image: RgbaImage,
}

/// Compute the target size of a `width x height` frame for `cell_size`.
///
/// `scale = min(cell / w, cell / h)` and each side is floored. A side is
/// never floored to zero: extremely thin frames keep one pixel.
pub fn target_size(
    index: usize,
    width: u32,
    height: u32,
    cell_size: u32,
) -> Result<ScaledSize, SheetError> {
    if width == 0 || height == 0 {
        return Err(SheetError::Scale { index, width, height });
    }
    let cell = f64::from(cell_size);
    let scale = (cell / f64::from(width)).min(cell / f64::from(height));
    let fit = |side: u32| ((f64::from(side) * scale).floor() as u32).clamp(1, cell_size.max(1));
    Ok(ScaledSize { width: fit(width), height: fit(height), cell_size })
}

/// Resample `image` to `size` with a Lanczos filter.
///
/// The source is never modified. Frames are RGBA end to end, so transparent
/// pixels stay transparent rather than picking up a fill color.
pub fn scale_frame(image: &RgbaImage, size: ScaledSize) -> ScaledFrame {
    let image = if image.dimensions() == (size.width, size.height) {
        image.clone()
    } else {
        imageops::resize(image, size.width, size.height, FilterType::Lanczos3)
    };
    ScaledFrame { size, image }
}
