//! gifsheet - Library for turning animations into sprite sheets
//!
//! This library provides functionality to:
//! - Decode GIFs (and, through ffmpeg, short videos) into frame sequences
//! - Plan a tile grid and scale each frame into its cell
//! - Composite the frames into one RGBA canvas with build metadata
//!
//! ```
//! use gifsheet::layout::BuildConfig;
//! use gifsheet::pipeline::build;
//! use gifsheet::source::AnimationSequence;
//! use image::{Rgba, RgbaImage};
//!
//! let frames = vec![RgbaImage::from_pixel(32, 16, Rgba([255, 0, 0, 255])); 3];
//! let sequence = AnimationSequence::with_uniform_delay(frames, 0).unwrap();
//! let sheet = build(&sequence, &BuildConfig::default()).unwrap();
//!
//! assert_eq!((sheet.width(), sheet.height()), (1024, 1024));
//! assert_eq!(sheet.metadata.tile_configuration, "2x2");
//! assert_eq!(sheet.metadata.final_frame_size, "512x256");
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod layout;
pub mod metadata;
pub mod output;
pub mod pipeline;
pub mod scale;
pub mod settings;
pub mod source;
pub mod spritesheet;

pub use error::SheetError;
pub use layout::{BuildConfig, LayoutConfig};
pub use metadata::SheetMetadata;
pub use pipeline::{build, SpriteSheet};
pub use source::{AnimationFrame, AnimationSequence};
