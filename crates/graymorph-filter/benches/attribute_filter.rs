//! Benchmarks for the attribute filter engine

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use graymorph_core::GrayImage;
use graymorph_filter::{attribute_open, attribute_spectrum_open, Area, FillRatio};

fn test_image(size: u32) -> GrayImage {
    // Varied surface with nested bright structures.
    let mut data = Vec::with_capacity((size * size) as usize);
    for y in 0..size {
        for x in 0..size {
            data.push(((x * 7 + y * 13) % 256) as u8);
        }
    }
    GrayImage::from_vec(size, size, data).unwrap()
}

fn bench_area_opening(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter/area_open");
    for size in [64, 128, 256] {
        let img = test_image(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| attribute_open::<Area>(black_box(&img), 50, None))
        });
    }
    group.finish();
}

fn bench_fill_ratio_opening(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter/fill_ratio_open");
    for size in [64, 128, 256] {
        let img = test_image(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| attribute_open::<FillRatio>(black_box(&img), 50, None))
        });
    }
    group.finish();
}

fn bench_area_spectrum(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter/area_spectrum");
    for size in [64, 128, 256] {
        let img = test_image(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| attribute_spectrum_open::<Area>(black_box(&img), 500, None))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_area_opening,
    bench_fill_ratio_opening,
    bench_area_spectrum
);
criterion_main!(benches);
