//! The sheet build: plan, scale, composite, describe
//!
//! ```text
//! AnimationSequence ──plan──> LayoutPlan ──target_size──> ScaledSize per frame
//!                                                         │
//!                              scale_frame (rayon) <──────┘
//!                                     │
//!                        render_spritesheet ──> SpriteSheet { image, metadata }
//! ```
//!
//! A build either returns a complete sheet or an error; nothing partial
//! escapes. Builds share no state with each other.

use crate::error::SheetError;
use crate::layout::{self, BuildConfig, LayoutConfig};
use crate::metadata::SheetMetadata;
use crate::scale::{scale_frame, target_size, ScaledFrame, ScaledSize};
use crate::source::AnimationSequence;
use crate::spritesheet::render_spritesheet;
use image::RgbaImage;
use rayon::prelude::*;
use tracing::{debug, warn};

/// Result of a successful build.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteSheet {
    /// The composited canvas, `columns * cell` by `rows * cell`
    pub image: RgbaImage,
    pub layout: LayoutConfig,
    pub metadata: SheetMetadata,
}

impl SpriteSheet {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// True if the canvas has no pixels; such a sheet must not be encoded.
    pub fn is_empty(&self) -> bool {
        self.image.width() == 0 || self.image.height() == 0
    }
}

/// Build a sprite sheet from a decoded animation.
///
/// Frame resampling runs on the current rayon pool. Placement and the
/// last-frame metadata follow sequence order regardless of which frame
/// finishes first.
#[tracing::instrument(skip_all, fields(frames = sequence.frame_count()))]
pub fn build(sequence: &AnimationSequence, config: &BuildConfig) -> Result<SpriteSheet, SheetError> {
    let plan = layout::plan(sequence.frame_count(), config)?;
    let retained = &sequence.frames()[..plan.frame_count];
    let cell_size = plan.layout.cell_size;

    // Every retained frame is processed for metadata, even ones with no cell
    let sizes = retained
        .iter()
        .enumerate()
        .map(|(i, frame)| target_size(i, frame.width(), frame.height(), cell_size))
        .collect::<Result<Vec<ScaledSize>, SheetError>>()?;

    let placed = plan.frame_count.min(plan.layout.capacity());
    if placed < plan.frame_count {
        debug!(
            placed,
            retained = plan.frame_count,
            tile = %plan.tile,
            "grid holds fewer cells than frames; trailing frames are not placed"
        );
    }

    let scaled: Vec<ScaledFrame> = retained[..placed]
        .par_iter()
        .zip(&sizes[..placed])
        .map(|(frame, size)| scale_frame(frame.image(), *size))
        .collect();

    let image = render_spritesheet(&plan.layout, &scaled)?;
    let last = *sizes.last().ok_or(SheetError::EmptyAnimation)?;
    let metadata = SheetMetadata::collect(sequence, &plan, last, config.fps);

    Ok(SpriteSheet { image, layout: plan.layout, metadata })
}

/// Build using a dedicated pool of `jobs` worker threads.
///
/// Falls back to the global pool if the dedicated one cannot be created.
pub fn build_with_jobs(
    sequence: &AnimationSequence,
    config: &BuildConfig,
    jobs: usize,
) -> Result<SpriteSheet, SheetError> {
    match rayon::ThreadPoolBuilder::new().num_threads(jobs.max(1)).build() {
        Ok(pool) => pool.install(|| build(sequence, config)),
        Err(e) => {
            warn!("could not create a {}-thread pool ({}); using the global pool", jobs, e);
            build(sequence, config)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::AnimationFrame;
    use image::Rgba;

    fn solid_sequence(count: usize, width: u32, height: u32) -> AnimationSequence {
        let images =
            (0..count).map(|_| RgbaImage::from_pixel(width, height, Rgba([200, 10, 10, 255])));
        AnimationSequence::with_uniform_delay(images.collect(), 0).unwrap()
    }

    #[test]
    fn test_build_small_sequence() {
        let sheet = build(&solid_sequence(3, 32, 32), &BuildConfig::default()).unwrap();
        assert_eq!((sheet.width(), sheet.height()), (1024, 1024));
        assert_eq!(sheet.layout.cell_size, 512);
        assert!(!sheet.is_empty());
        // Fourth cell is empty
        assert_eq!(sheet.image.get_pixel(700, 700)[3], 0);
        assert_eq!(sheet.image.get_pixel(256, 256)[3], 255);
    }

    #[test]
    fn test_last_frame_drives_scaled_flag() {
        // Reference 256x256 is not scaled in a 256 cell, but the last frame is
        let mut frames: Vec<AnimationFrame> = (0..5)
            .map(|_| AnimationFrame::new(RgbaImage::from_pixel(256, 256, Rgba([1, 1, 1, 255])), 0))
            .collect();
        frames.push(AnimationFrame::new(RgbaImage::from_pixel(64, 32, Rgba([1, 1, 1, 255])), 0));
        let seq = AnimationSequence::new(frames).unwrap();

        let sheet = build(&seq, &BuildConfig::default()).unwrap();
        assert!(sheet.metadata.scaled);
        assert_eq!(sheet.metadata.final_frame_size, "256x128");
    }

    #[test]
    fn test_scaled_compares_last_target_with_reference() {
        // The last frame is downscaled, but its target equals the reference's
        // native size, so the sheet reports no scaling.
        let mut frames: Vec<AnimationFrame> = (0..5)
            .map(|_| AnimationFrame::new(RgbaImage::from_pixel(256, 256, Rgba([1, 1, 1, 255])), 0))
            .collect();
        frames.push(AnimationFrame::new(RgbaImage::from_pixel(512, 512, Rgba([1, 1, 1, 255])), 0));
        let seq = AnimationSequence::new(frames).unwrap();

        let sheet = build(&seq, &BuildConfig::default()).unwrap();
        assert_eq!(sheet.metadata.final_frame_size, "256x256");
        assert!(!sheet.metadata.scaled);
    }

    #[test]
    fn test_zero_sized_frame_fails_whole_build() {
        let frames = vec![
            AnimationFrame::new(RgbaImage::from_pixel(8, 8, Rgba([1, 1, 1, 255])), 0),
            AnimationFrame::new(RgbaImage::new(0, 8), 0),
        ];
        let seq = AnimationSequence::new(frames).unwrap();
        assert_eq!(
            build(&seq, &BuildConfig::default()),
            Err(SheetError::Scale { index: 1, width: 0, height: 8 })
        );
    }

    #[test]
    fn test_zero_sized_frame_past_cutoff_is_ignored() {
        let mut frames: Vec<AnimationFrame> = (0..2)
            .map(|_| AnimationFrame::new(RgbaImage::from_pixel(8, 8, Rgba([1, 1, 1, 255])), 0))
            .collect();
        frames.push(AnimationFrame::new(RgbaImage::new(0, 0), 0));
        let seq = AnimationSequence::new(frames).unwrap();
        let config = BuildConfig::default().with_frame_count(2);
        assert!(build(&seq, &config).is_ok());
    }

    #[test]
    fn test_build_with_jobs_matches_build() {
        let seq = solid_sequence(20, 40, 30);
        let config = BuildConfig::default();
        let a = build(&seq, &config).unwrap();
        let b = build_with_jobs(&seq, &config, 2).unwrap();
        assert_eq!(a, b);
    }
}
