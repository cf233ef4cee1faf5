//! Sheet metadata - what the source looked like and what was done to it

use crate::layout::LayoutPlan;
use crate::scale::ScaledSize;
use crate::source::AnimationSequence;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Summary of one sheet build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetMetadata {
    /// Reference frame size, `"{w}x{h}"`
    pub original_dimensions: String,
    /// Frames in the input, before any truncation
    pub original_frame_count: usize,
    /// Frame rate derived from the input delay
    pub original_fps: u32,
    /// Frames kept after the 64-frame clamp and the frame override
    pub final_frame_count: usize,
    /// Override fps if given, otherwise `original_fps`
    pub final_fps: u32,
    pub frames_cropped: usize,
    /// Whether the last processed frame was resized away from the reference size
    pub scaled: bool,
    /// Target size of the last processed frame, `"{w}x{h}"`
    pub final_frame_size: String,
    pub tile_configuration: String,
}

impl SheetMetadata {
    /// Collect metadata for a build.
    ///
    /// `scaled` and `final_frame_size` describe the last processed frame, in
    /// sequence order, compared against the reference frame. They are not an
    /// aggregate over the whole sequence.
    pub fn collect(
        sequence: &AnimationSequence,
        plan: &LayoutPlan,
        last: ScaledSize,
        fps_override: Option<u32>,
    ) -> Self {
        let (ref_w, ref_h) = sequence.dimensions();
        let original_frame_count = sequence.frame_count();
        let original_fps = sequence.fps();

        Self {
            original_dimensions: format!("{}x{}", ref_w, ref_h),
            original_frame_count,
            original_fps,
            final_frame_count: plan.frame_count,
            final_fps: fps_override.unwrap_or(original_fps),
            frames_cropped: original_frame_count.saturating_sub(plan.frame_count),
            scaled: last.width != ref_w || last.height != ref_h,
            final_frame_size: format!("{}x{}", last.width, last.height),
            tile_configuration: plan.tile.clone(),
        }
    }

    /// Conventional file name, `SpriteSheet_{frames}frames_{fps}fps.png`.
    pub fn file_name(&self) -> String {
        format!("SpriteSheet_{}frames_{}fps.png", self.final_frame_count, self.final_fps)
    }
}

impl fmt::Display for SheetMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Sprite Sheet Information")?;
        writeln!(f, "  Original Dimensions:  {}", self.original_dimensions)?;
        writeln!(f, "  Original Frame Count: {}", self.original_frame_count)?;
        writeln!(f, "  Original FPS:         {}", self.original_fps)?;
        writeln!(f, "  Final Frame Count:    {}", self.final_frame_count)?;
        writeln!(f, "  Final FPS:            {}", self.final_fps)?;
        writeln!(f, "  Frames Cropped:       {}", self.frames_cropped)?;
        writeln!(f, "  Scaled:               {}", if self.scaled { "Yes" } else { "No" })?;
        writeln!(f, "  Final Frame Size:     {}", self.final_frame_size)?;
        write!(f, "  Tile Configuration:   {}", self.tile_configuration)
    }
}
