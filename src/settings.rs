//! Inline settings parsing
//!
//! Free text such as `"make this a sheet frames:12 tile:4x3 fps:8 please"`
//! is scanned for three `key:value` pairs. Anything else in the text is
//! ignored, and a missing key stays unset.

use crate::layout::BuildConfig;
use regex::Regex;
use std::sync::OnceLock;

fn frames_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"frames:(\d+)").expect("valid regex"))
}

fn tile_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"tile:(\d+x\d+)").expect("valid regex"))
}

fn fps_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"fps:(\d+)").expect("valid regex"))
}

fn capture_u32(re: &Regex, text: &str) -> Option<u32> {
    re.captures(text).and_then(|c| c[1].parse().ok())
}

/// Extract `frames:N`, `tile:CxR` and `fps:N` from free text.
///
/// The first occurrence of each key wins. Numbers too large for `u32` are
/// treated as absent.
pub fn parse_settings(text: &str) -> BuildConfig {
    BuildConfig {
        frame_count: capture_u32(frames_re(), text),
        tile: tile_re().captures(text).map(|c| c[1].to_string()),
        fps: capture_u32(fps_re(), text),
    }
}
