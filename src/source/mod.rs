//! Frame sources - decoded animations ready for sheet building
//!
//! An [`AnimationSequence`] is the only input the sheet builder understands.
//! It does not matter whether the frames came out of a GIF decoder, a video
//! transcoded to GIF, or a single still image: all paths normalize to the same
//! shape here.

pub mod transcode;

use crate::error::SheetError;
use image::codecs::gif::GifDecoder;
use image::{AnimationDecoder, Delay, RgbaImage};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use thiserror::Error;

pub use transcode::{TranscodeConfig, Transcoder};

/// Frames per second assumed when the animation encodes no delay.
pub const DEFAULT_FPS: u32 = 10;

/// Error raised while turning an input file into an [`AnimationSequence`]
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceError {
    /// File could not be opened or read
    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),
    /// The image data could not be decoded
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    /// The external video transcoder failed
    #[error("Failed to transcode video: {0}")]
    Transcode(String),
    /// Decoding succeeded but produced an unusable animation
    #[error(transparent)]
    Animation(#[from] SheetError),
}

/// How an input file is turned into frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Animated GIF, decoded frame by frame
    Gif,
    /// Video container, transcoded to GIF first
    Video,
    /// Any other image format, treated as a single frame
    Still,
}

impl SourceKind {
    /// Pick the source kind from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Self {
        let ext = path.extension().and_then(|e| e.to_str()).map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("gif") => SourceKind::Gif,
            Some("mp4") | Some("mov") | Some("webm") | Some("mkv") => SourceKind::Video,
            _ => SourceKind::Still,
        }
    }
}

/// A single decoded frame.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationFrame {
    image: RgbaImage,
    delay_cs: u32,
}

impl AnimationFrame {
    /// Wrap an RGBA buffer with its display delay in centiseconds.
    pub fn new(image: RgbaImage, delay_cs: u32) -> Self {
        Self { image, delay_cs }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Display duration in hundredths of a second (0 if none was encoded)
    pub fn delay_cs(&self) -> u32 {
        self.delay_cs
    }
}

/// An ordered, non-empty list of frames in playback order.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationSequence {
    frames: Vec<AnimationFrame>,
}

impl AnimationSequence {
    /// Create a sequence, rejecting an empty frame list.
    pub fn new(frames: Vec<AnimationFrame>) -> Result<Self, SheetError> {
        if frames.is_empty() {
            return Err(SheetError::EmptyAnimation);
        }
        Ok(Self { frames })
    }

    /// Create a sequence where every frame shares the same delay.
    pub fn with_uniform_delay(images: Vec<RgbaImage>, delay_cs: u32) -> Result<Self, SheetError> {
        Self::new(images.into_iter().map(|img| AnimationFrame::new(img, delay_cs)).collect())
    }

    pub fn frames(&self) -> &[AnimationFrame] {
        &self.frames
    }

    /// Number of frames before any truncation.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// The first frame, used as the reference for native size and timing.
    pub fn reference(&self) -> &AnimationFrame {
        // Non-empty by construction
        &self.frames[0]
    }

    /// Width and height of the reference frame.
    pub fn dimensions(&self) -> (u32, u32) {
        let reference = self.reference();
        (reference.width(), reference.height())
    }

    /// Representative delay of the animation in centiseconds.
    pub fn delay_cs(&self) -> u32 {
        self.reference().delay_cs()
    }

    /// Native frame rate derived from the representative delay.
    ///
    /// A zero delay maps to [`DEFAULT_FPS`]; otherwise `100 / delay` with
    /// integer truncation (a 3cs delay reports 33 fps).
    pub fn fps(&self) -> u32 {
        fps_from_delay(self.delay_cs())
    }
}

/// Convert a centisecond frame delay to whole frames per second.
pub fn fps_from_delay(delay_cs: u32) -> u32 {
    if delay_cs == 0 {
        DEFAULT_FPS
    } else {
        100 / delay_cs
    }
}

/// Convert an `image` frame delay to centiseconds, truncating.
fn delay_to_cs(delay: Delay) -> u32 {
    let (numer, denom) = delay.numer_denom_ms();
    if denom == 0 {
        return 0;
    }
    (u64::from(numer) / (u64::from(denom) * 10)) as u32
}

/// Decode an animated GIF from a reader.
///
/// Frames come back composited onto the full logical screen, so every frame
/// has the GIF's canvas size.
pub fn decode_gif<R: Read>(reader: R) -> Result<AnimationSequence, SourceError> {
    let decoder = GifDecoder::new(reader)?;
    let frames = decoder
        .into_frames()
        .collect_frames()?
        .into_iter()
        .map(|frame| {
            let delay_cs = delay_to_cs(frame.delay());
            AnimationFrame::new(frame.into_buffer(), delay_cs)
        })
        .collect();
    Ok(AnimationSequence::new(frames)?)
}

/// Decode a GIF file from disk.
pub fn open_gif(path: &Path) -> Result<AnimationSequence, SourceError> {
    let file = File::open(path)?;
    decode_gif(BufReader::new(file))
}

/// Open a still image as a one-frame sequence.
pub fn open_still(path: &Path) -> Result<AnimationSequence, SourceError> {
    let image = image::open(path)?.to_rgba8();
    Ok(AnimationSequence::new(vec![AnimationFrame::new(image, 0)])?)
}

/// Open any supported input, dispatching on its extension.
///
/// Video inputs are handed to `transcoder` and the resulting GIF is decoded;
/// its scratch files are gone by the time this returns.
pub fn open(path: &Path, transcoder: &Transcoder) -> Result<AnimationSequence, SourceError> {
    match SourceKind::from_path(path) {
        SourceKind::Gif => open_gif(path),
        SourceKind::Video => transcoder.decode(path),
        SourceKind::Still => open_still(path),
    }
}
