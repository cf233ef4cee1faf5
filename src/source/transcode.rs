//! Video to GIF transcoding through an external `ffmpeg`
//!
//! The system binary is used rather than linking FFmpeg, so the only runtime
//! requirement is `ffmpeg` on PATH (or a configured path).

use super::{open_gif, AnimationSequence, SourceError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, info};

/// Settings for the video transcoder, also read from `[transcode]` in config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscodeConfig {
    /// Path or name of the ffmpeg binary
    #[serde(default = "default_ffmpeg")]
    pub ffmpeg: PathBuf,
    /// Frame rate of the intermediate GIF
    #[serde(default = "default_fps")]
    pub fps: u32,
    /// Width of the intermediate GIF (height follows aspect ratio)
    #[serde(default = "default_width")]
    pub width: u32,
}

impl Default for TranscodeConfig {
    fn default() -> Self {
        Self { ffmpeg: default_ffmpeg(), fps: default_fps(), width: default_width() }
    }
}

fn default_ffmpeg() -> PathBuf {
    PathBuf::from("ffmpeg")
}

fn default_fps() -> u32 {
    10
}

fn default_width() -> u32 {
    320
}

/// Converts video containers into decodable animations.
#[derive(Debug, Clone, Default)]
pub struct Transcoder {
    config: TranscodeConfig,
}

impl Transcoder {
    pub fn new(config: TranscodeConfig) -> Self {
        Self { config }
    }

    /// The ffmpeg filter graph: resample, resize with lanczos, then build and
    /// apply a dedicated palette so the GIF keeps as much color as it can.
    pub fn filter_graph(&self) -> String {
        format!(
            "fps={},scale={}:-1:flags=lanczos,split[s0][s1];[s0]palettegen[p];[s1][p]paletteuse",
            self.config.fps, self.config.width
        )
    }

    /// Build the ffmpeg invocation converting `input` into `output`.
    pub fn command(&self, input: &Path, output: &Path) -> Command {
        let mut cmd = Command::new(&self.config.ffmpeg);
        cmd.stdin(Stdio::null()).stdout(Stdio::null()).stderr(Stdio::piped());
        cmd.args(["-y", "-loglevel", "error", "-i"])
            .arg(input)
            .arg("-vf")
            .arg(self.filter_graph())
            .args(["-loop", "0"])
            .arg(output);
        cmd
    }

    /// Whether the configured ffmpeg binary can be executed.
    pub fn is_available(&self) -> bool {
        Command::new(&self.config.ffmpeg)
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    /// Transcode `input` to `converted.gif` inside `dir`.
    pub fn transcode_to_gif(&self, input: &Path, dir: &Path) -> Result<PathBuf, SourceError> {
        let output = dir.join("converted.gif");
        debug!(input = %input.display(), filter = %self.filter_graph(), "running ffmpeg");

        let result = self.command(input, &output).output().map_err(|e| {
            SourceError::Transcode(format!(
                "could not run '{}': {}",
                self.config.ffmpeg.display(),
                e
            ))
        })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(SourceError::Transcode(format!(
                "ffmpeg exited with {}: {}",
                result.status,
                stderr.trim()
            )));
        }
        if !output.exists() {
            return Err(SourceError::Transcode(format!(
                "ffmpeg reported success but '{}' was not written",
                output.display()
            )));
        }

        info!(gif = %output.display(), "video converted to GIF");
        Ok(output)
    }

    /// Transcode and decode a video in a scratch directory.
    ///
    /// The scratch directory is removed when this returns, on success or error.
    pub fn decode(&self, input: &Path) -> Result<AnimationSequence, SourceError> {
        if !self.is_available() {
            return Err(SourceError::Transcode(format!(
                "ffmpeg not found at '{}'; install it or set [transcode].ffmpeg in gifsheet.toml",
                self.config.ffmpeg.display()
            )));
        }
        let scratch = tempfile::Builder::new().prefix("gifsheet-").tempdir()?;
        debug!(dir = %scratch.path().display(), "created scratch directory");
        let gif = self.transcode_to_gif(input, scratch.path())?;
        open_gif(&gif)
    }
}
