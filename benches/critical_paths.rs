//! Criterion benchmarks for gifsheet critical paths
//!
//! Benchmarks the core performance-critical operations:
//! - Layout: tile planning for a range of frame counts
//! - Scaling: Lanczos resampling of a single frame into a cell
//! - Compositing: placing pre-scaled frames onto the canvas
//! - Build: the full pipeline for small, medium and clamped sequences

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use gifsheet::layout::{plan, BuildConfig, LayoutConfig};
use gifsheet::pipeline::build;
use gifsheet::scale::{scale_frame, target_size};
use gifsheet::source::AnimationSequence;
use gifsheet::spritesheet::render_spritesheet;
use image::{Rgba, RgbaImage};

// =============================================================================
// Test Data Generators
// =============================================================================

/// Generate a frame with a simple gradient so resampling has real work
fn make_frame(width: u32, height: u32, seed: u8) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, seed, if (x + y) % 7 == 0 { 0 } else { 255 }])
    })
}

/// Generate a sequence of `count` gradient frames
fn make_sequence(count: usize, width: u32, height: u32) -> AnimationSequence {
    let frames = (0..count).map(|i| make_frame(width, height, i as u8)).collect();
    AnimationSequence::with_uniform_delay(frames, 4).expect("non-empty")
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let config = BuildConfig::default().with_tile("8x4");
    for n in [3usize, 16, 64, 500] {
        group.bench_with_input(BenchmarkId::new("plan", n), &n, |b, &n| {
            b.iter(|| plan(black_box(n), black_box(&config)))
        });
    }
    group.finish();
}

fn bench_scale(c: &mut Criterion) {
    let mut group = c.benchmark_group("scale");
    for (w, h, cell) in [(320u32, 240u32, 128u32), (320, 240, 256), (480, 270, 512)] {
        let frame = make_frame(w, h, 1);
        let size = target_size(0, w, h, cell).expect("valid size");
        group.throughput(Throughput::Elements(u64::from(size.width * size.height)));
        group.bench_with_input(
            BenchmarkId::new("lanczos", format!("{}x{}->{}", w, h, cell)),
            &frame,
            |b, frame| b.iter(|| scale_frame(black_box(frame), size)),
        );
    }
    group.finish();
}

fn bench_composite(c: &mut Criterion) {
    let layout = LayoutConfig { columns: 8, rows: 8, cell_size: 128 };
    let size = target_size(0, 320, 240, 128).expect("valid size");
    let scaled: Vec<_> = (0..64).map(|i| scale_frame(&make_frame(320, 240, i), size)).collect();

    c.bench_function("composite_8x8", |b| {
        b.iter(|| render_spritesheet(black_box(&layout), black_box(&scaled)).expect("fits"))
    });
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    group.sample_size(20);
    for count in [4usize, 16, 100] {
        let seq = make_sequence(count, 160, 120);
        group.bench_with_input(BenchmarkId::from_parameter(count), &seq, |b, seq| {
            b.iter(|| build(black_box(seq), &BuildConfig::default()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_layout, bench_scale, bench_composite, bench_build);
criterion_main!(benches);
