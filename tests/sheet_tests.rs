//! Integration tests for sprite sheet building
//!
//! Covers the end-to-end scenarios and the layout/scaling properties that
//! must hold for every build.

use gifsheet::layout::{plan, BuildConfig, MAX_FRAMES};
use gifsheet::pipeline::build;
use gifsheet::scale::target_size;
use gifsheet::source::{decode_gif, AnimationFrame, AnimationSequence};
use gifsheet::SheetError;
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, Rgba, RgbaImage};

/// A sequence of `count` frames, each a distinct solid color.
fn colored_sequence(count: usize, width: u32, height: u32, delay_cs: u32) -> AnimationSequence {
    let frames = (0..count)
        .map(|i| {
            let c = (i * 3 % 256) as u8;
            AnimationFrame::new(RgbaImage::from_pixel(width, height, Rgba([c, 255 - c, 7, 255])), delay_cs)
        })
        .collect();
    AnimationSequence::new(frames).unwrap()
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_scenario_a_three_frames_zero_delay() {
    let seq = colored_sequence(3, 40, 40, 0);
    let sheet = build(&seq, &BuildConfig::default()).unwrap();

    assert_eq!(sheet.layout.cell_size, 512);
    assert_eq!(sheet.metadata.tile_configuration, "2x2");
    assert_eq!((sheet.width(), sheet.height()), (1024, 1024));
    assert_eq!(sheet.metadata.original_fps, 10);
    assert_eq!(sheet.metadata.final_frame_count, 3);
    assert_eq!(sheet.metadata.frames_cropped, 0);
}

#[test]
fn test_scenario_b_sixteen_frames_delay_four() {
    let seq = colored_sequence(16, 50, 25, 4);
    let sheet = build(&seq, &BuildConfig::default()).unwrap();

    assert_eq!(sheet.metadata.original_fps, 25);
    assert_eq!(sheet.metadata.final_fps, 25);
    assert_eq!(sheet.metadata.tile_configuration, "4x4");
    assert_eq!(sheet.layout.cell_size, 256);
    assert_eq!((sheet.width(), sheet.height()), (1024, 1024));
    assert_eq!(sheet.metadata.final_frame_count, 16);
    assert_eq!(sheet.metadata.final_frame_size, "256x128");
    assert!(sheet.metadata.scaled);
}

#[test]
fn test_scenario_c_hundred_frames_truncated() {
    let seq = colored_sequence(100, 16, 16, 5);
    let sheet = build(&seq, &BuildConfig::default()).unwrap();

    assert_eq!(sheet.metadata.original_frame_count, 100);
    assert_eq!(sheet.metadata.final_frame_count, 64);
    assert_eq!(sheet.metadata.tile_configuration, "8x8");
    assert_eq!(sheet.layout.cell_size, 128);
    assert_eq!((sheet.width(), sheet.height()), (1024, 1024));
    assert_eq!(sheet.metadata.frames_cropped, 36);
}

#[test]
fn test_scenario_d_tile_override_keeps_cell_size() {
    let seq = colored_sequence(10, 20, 20, 0);
    let config = BuildConfig::default().with_tile("2x2");
    let sheet = build(&seq, &config).unwrap();

    assert_eq!(sheet.layout.cell_size, 256);
    assert_eq!(sheet.metadata.tile_configuration, "2x2");
    assert_eq!((sheet.width(), sheet.height()), (512, 512));
    assert_eq!(sheet.metadata.final_frame_count, 10);

    // Only the first four frames are on the canvas, one per cell
    for i in 0..4u32 {
        let c = (i * 3) as u8;
        let x = (i % 2) * 256 + 128;
        let y = (i / 2) * 256 + 128;
        let px = sheet.image.get_pixel(x, y);
        assert!((i32::from(px[0]) - i32::from(c)).abs() <= 1, "cell {} has {:?}", i, px);
        assert_eq!(px[3], 255);
    }
}

#[test]
fn test_scenario_e_empty_sequence() {
    assert_eq!(AnimationSequence::new(Vec::new()), Err(SheetError::EmptyAnimation));
}

#[test]
fn test_scenario_f_malformed_tile() {
    let seq = colored_sequence(4, 8, 8, 0);
    let config = BuildConfig::default().with_tile("abc");
    match build(&seq, &config) {
        Err(SheetError::Config { tile, .. }) => assert_eq!(tile, "abc"),
        other => panic!("expected config error, got {:?}", other),
    }
}

#[test]
fn test_oversized_tile_is_config_error() {
    let seq = colored_sequence(3, 8, 8, 0);
    for tile in ["10000000x1", "60000x60000"] {
        match build(&seq, &BuildConfig::default().with_tile(tile)) {
            Err(SheetError::Config { tile: got, reason }) => {
                assert_eq!(got, tile);
                assert!(reason.contains("canvas too large"));
            }
            other => panic!("expected config error for {}, got {:?}", tile, other),
        }
    }
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn test_over_64_always_retains_64() {
    for n in [65, 80, 128, 300] {
        let layout = plan(n, &BuildConfig::default()).unwrap();
        assert_eq!(layout.frame_count, MAX_FRAMES);
    }
}

#[test]
fn test_frame_override_above_64_still_capped() {
    let seq = colored_sequence(90, 4, 4, 0);
    let sheet = build(&seq, &BuildConfig::default().with_frame_count(70)).unwrap();
    assert_eq!(sheet.metadata.final_frame_count, 64);
    assert_eq!(sheet.metadata.frames_cropped, 26);
}

#[test]
fn test_frame_override_below_native() {
    let seq = colored_sequence(30, 4, 4, 0);
    let sheet = build(&seq, &BuildConfig::default().with_frame_count(10)).unwrap();
    assert_eq!(sheet.metadata.final_frame_count, 10);
    assert_eq!(sheet.metadata.frames_cropped, 20);
    assert_eq!(sheet.metadata.tile_configuration, "4x4");
}

#[test]
fn test_canvas_matches_layout() {
    for (n, tile) in [(1, None), (7, None), (40, None), (5, Some("3x1")), (30, Some("1x9"))] {
        let seq = colored_sequence(n, 10, 6, 0);
        let mut config = BuildConfig::default();
        config.tile = tile.map(str::to_string);
        let sheet = build(&seq, &config).unwrap();
        let l = sheet.layout;
        assert_eq!((sheet.width(), sheet.height()), (l.columns * l.cell_size, l.rows * l.cell_size));
    }
}

#[test]
fn test_frames_cropped_formula() {
    for n in [1, 4, 16, 63, 64, 65, 200] {
        for over in [None, Some(1), Some(5), Some(64), Some(100)] {
            let seq = colored_sequence(n, 2, 2, 0);
            let mut config = BuildConfig::default();
            config.frame_count = over;
            let meta = build(&seq, &config).unwrap().metadata;
            assert_eq!(
                meta.frames_cropped,
                meta.original_frame_count.saturating_sub(meta.final_frame_count)
            );
        }
    }
}

#[test]
fn test_scaled_size_fits_cell() {
    for (w, h) in [(1, 1), (2, 9), (640, 360), (360, 640), (123, 457)] {
        for cell in [128, 256, 512] {
            let s = target_size(0, w, h, cell).unwrap();
            assert!(s.width <= cell && s.height <= cell);
        }
    }
}

#[test]
fn test_fps_override_is_label_only() {
    let seq = colored_sequence(5, 8, 8, 4);
    let plain = build(&seq, &BuildConfig::default()).unwrap();
    let labelled = build(&seq, &BuildConfig::default().with_fps(60)).unwrap();

    assert_eq!(labelled.metadata.final_fps, 60);
    assert_eq!(labelled.metadata.original_fps, 25);
    assert_eq!(labelled.metadata.file_name(), "SpriteSheet_5frames_60fps.png");
    assert_eq!(plain.image, labelled.image);
}

#[test]
fn test_build_is_deterministic() {
    let seq = colored_sequence(23, 37, 19, 3);
    let config = BuildConfig::default().with_frame_count(20);
    let a = build(&seq, &config).unwrap();
    let b = build(&seq, &config).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_decoded_gif_builds() {
    let mut bytes = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut bytes);
        encoder.set_repeat(Repeat::Infinite).unwrap();
        for i in 0..6u8 {
            let img = RgbaImage::from_pixel(20, 10, Rgba([i * 40, 0, 0, 255]));
            let delay = Delay::from_numer_denom_ms(30, 1);
            encoder.encode_frame(Frame::from_parts(img, 0, 0, delay)).unwrap();
        }
    }

    let seq = decode_gif(bytes.as_slice()).unwrap();
    let sheet = build(&seq, &BuildConfig::default()).unwrap();
    assert_eq!(sheet.metadata.original_dimensions, "20x10");
    assert_eq!(sheet.metadata.original_fps, 33);
    assert_eq!(sheet.metadata.tile_configuration, "4x4");
    assert_eq!(sheet.metadata.final_frame_size, "256x128");
}
