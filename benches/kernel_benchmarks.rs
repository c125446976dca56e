//! Benchmarks for the pixel-level kernels

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use eye_gaze_tracking::{
    frame_source::{FrameSource, SyntheticEyeCamera},
    image_processing::{
        adaptive_threshold, clahe, dilate, erode, find_contours, otsu_threshold, rgb_to_gray, rgb_to_hsv,
        sobel_edges,
    },
};

fn benchmark_color(c: &mut Criterion) {
    let frame = SyntheticEyeCamera::new(4, 1).next_frame().unwrap();
    let mut group = c.benchmark_group("color");

    group.bench_function("rgb_to_gray_640x480", |b| b.iter(|| black_box(rgb_to_gray(black_box(&frame)))));
    group.bench_function("rgb_to_hsv_640x480", |b| b.iter(|| black_box(rgb_to_hsv(black_box(&frame)))));

    group.finish();
}

fn benchmark_enhancement(c: &mut Criterion) {
    let frame = SyntheticEyeCamera::new(4, 1).next_frame().unwrap();
    let gray = rgb_to_gray(&frame);
    let mut group = c.benchmark_group("enhancement");

    for tile in [8, 16, 32] {
        group.bench_with_input(BenchmarkId::new("clahe", tile), &tile, |b, &tile| {
            b.iter(|| black_box(clahe(black_box(&gray), 2.0, tile)));
        });
    }

    group.bench_function("otsu_threshold", |b| b.iter(|| black_box(otsu_threshold(black_box(&gray)))));

    for block in [11, 31] {
        group.bench_with_input(BenchmarkId::new("adaptive_threshold", block), &block, |b, &block| {
            b.iter(|| black_box(adaptive_threshold(black_box(&gray), block, 5.0)));
        });
    }

    group.bench_function("sobel_edges", |b| b.iter(|| black_box(sobel_edges(black_box(&gray)))));

    group.finish();
}

fn benchmark_masks(c: &mut Criterion) {
    let frame = SyntheticEyeCamera::new(4, 1).next_frame().unwrap();
    let mask = adaptive_threshold(&rgb_to_gray(&frame), 11, 5.0);
    let mut group = c.benchmark_group("masks");

    for kernel in [3, 5, 7] {
        group.bench_with_input(BenchmarkId::new("erode", kernel), &kernel, |b, &kernel| {
            b.iter(|| black_box(erode(black_box(&mask), kernel)));
        });
        group.bench_with_input(BenchmarkId::new("dilate", kernel), &kernel, |b, &kernel| {
            b.iter(|| black_box(dilate(black_box(&mask), kernel)));
        });
    }

    group.bench_function("find_contours", |b| b.iter(|| black_box(find_contours(black_box(&mask)))));

    group.finish();
}

criterion_group!(benches, benchmark_color, benchmark_enhancement, benchmark_masks);
criterion_main!(benches);
