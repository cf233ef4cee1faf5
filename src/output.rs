//! PNG output and file path generation
//!
//! Persisting a sheet is the caller's job; the builder never touches disk.

use crate::metadata::SheetMetadata;
use crate::pipeline::SpriteSheet;
use image::RgbaImage;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for output operations
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OutputError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Image encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    /// Metadata serialization error
    #[error("Metadata error: {0}")]
    Json(#[from] serde_json::Error),
    /// The sheet has no pixels to encode
    #[error("Refusing to write an empty sprite sheet to {0}")]
    EmptySheet(PathBuf),
}

/// Files written for one sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenSheet {
    pub image: PathBuf,
    pub metadata: Option<PathBuf>,
}

fn ensure_parent_dir(path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Save an RGBA image to a PNG file, creating parent directories.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), OutputError> {
    ensure_parent_dir(path)?;
    image.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}

/// Write metadata as pretty-printed JSON.
pub fn write_metadata(metadata: &SheetMetadata, path: &Path) -> Result<(), OutputError> {
    ensure_parent_dir(path)?;
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, metadata)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Default location of a sheet: `dir/SpriteSheet_{n}frames_{fps}fps.png`.
pub fn sheet_path(dir: &Path, metadata: &SheetMetadata) -> PathBuf {
    dir.join(metadata.file_name())
}

/// Metadata sidecar path for a sheet image (`.png` replaced by `.json`).
pub fn metadata_path(image_path: &Path) -> PathBuf {
    image_path.with_extension("json")
}

/// Resolve where a sheet goes.
///
/// | `output` argument | Result |
/// |-------------------|--------|
/// | none | `{dir}/SpriteSheet_{n}frames_{fps}fps.png` |
/// | `sheet.png`, single input | `sheet.png` |
/// | `sheet.png`, several inputs | `sheet_{input_stem}.png` |
/// | `out/` (or existing directory) | `out/SpriteSheet_...png` |
pub fn generate_output_path(
    input: &Path,
    metadata: &SheetMetadata,
    default_dir: &Path,
    output_arg: Option<&Path>,
    is_single_input: bool,
) -> PathBuf {
    match output_arg {
        Some(output) => {
            let is_dir = output.as_os_str().to_string_lossy().ends_with('/') || output.is_dir();

            if is_dir {
                sheet_path(output, metadata)
            } else if is_single_input {
                output.to_path_buf()
            } else {
                let stem = output.file_stem().and_then(|s| s.to_str()).unwrap_or("output");
                let input_stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("input");
                let name = format!("{}_{}.png", stem, input_stem);
                match output.parent() {
                    Some(parent) if !parent.as_os_str().is_empty() => parent.join(name),
                    _ => PathBuf::from(name),
                }
            }
        }
        None => sheet_path(default_dir, metadata),
    }
}

/// Write a sheet image and, optionally, its metadata sidecar.
pub fn save_sheet(
    sheet: &SpriteSheet,
    path: &Path,
    with_metadata: bool,
) -> Result<WrittenSheet, OutputError> {
    if sheet.is_empty() {
        return Err(OutputError::EmptySheet(path.to_path_buf()));
    }
    save_png(&sheet.image, path)?;

    let metadata = if with_metadata {
        let meta_path = metadata_path(path);
        write_metadata(&sheet.metadata, &meta_path)?;
        Some(meta_path)
    } else {
        None
    };

    Ok(WrittenSheet { image: path.to_path_buf(), metadata })
}
