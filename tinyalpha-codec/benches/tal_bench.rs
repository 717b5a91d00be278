//! Performance benchmarks for tinyalpha-codec
//!
//! This benchmark suite evaluates:
//! - Encode/decode speed (pixel throughput)
//! - Output size for sprite-like and noisy rasters
//! - Cost of the palette pass on its own

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use tinyalpha_codec::{Palette, Pixel, Raster, decode, encode};

/// Type alias for raster generator functions
type RasterGenerator = fn(u32) -> Raster;

/// Square test rasters
mod test_rasters {
    use super::*;

    fn square(side: u32, f: impl Fn(u32, u32) -> Pixel) -> Raster {
        let pixels = (0..side)
            .flat_map(|y| (0..side).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();
        Raster::new(side, side, pixels).unwrap()
    }

    /// Fully transparent - one streak every 256 pixels
    pub fn transparent(side: u32) -> Raster {
        square(side, |_, _| Pixel::TRANSPARENT)
    }

    /// Sprite - a filled disc with a 4-color ring on a transparent background
    pub fn sprite(side: u32) -> Raster {
        let c = side as i64 / 2;
        square(side, move |x, y| {
            let dx = x as i64 - c;
            let dy = y as i64 - c;
            let d2 = dx * dx + dy * dy;
            let r2 = c * c * 3 / 4;
            if d2 > r2 {
                Pixel::TRANSPARENT
            } else if d2 > r2 * 3 / 4 {
                Pixel::new(0x202020FF + ((x + y) % 4) * 0x10000000)
            } else {
                Pixel::new(0xE0C040FF)
            }
        })
    }

    /// Stripes - 12 colors in vertical bands, favorites only
    pub fn stripes(side: u32) -> Raster {
        square(side, |x, _| Pixel::new(0x01000000 * (x / 8 % 12 + 1) | 0xFF))
    }

    /// Noise - 200 colors, worst case for streaks and favorites
    pub fn noise(side: u32) -> Raster {
        let mut seed: u64 = 0x123456789ABCDEF0;
        let pixels = (0..side * side)
            .map(|_| {
                // Linear congruential generator
                seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
                Pixel::new(((seed >> 33) % 200 + 1) as u32)
            })
            .collect();
        Raster::new(side, side, pixels).unwrap()
    }
}

const SIDES: [(&str, u32); 3] = [("64px", 64), ("256px", 256), ("1024px", 1024)];

const PATTERNS: [(&str, RasterGenerator); 4] = [
    ("transparent", test_rasters::transparent as RasterGenerator),
    ("sprite", test_rasters::sprite as RasterGenerator),
    ("stripes", test_rasters::stripes as RasterGenerator),
    ("noise", test_rasters::noise as RasterGenerator),
];

/// Benchmark encoding speed
fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    for (side_name, side) in SIDES {
        for (pattern_name, generator) in PATTERNS {
            let raster = generator(side);
            let id = format!("{}/{}", side_name, pattern_name);

            group.throughput(Throughput::Elements(side as u64 * side as u64));
            group.bench_with_input(BenchmarkId::from_parameter(&id), &raster, |b, raster| {
                b.iter(|| {
                    let bytes = encode(black_box(raster)).unwrap();
                    black_box(bytes);
                });
            });
        }
    }

    group.finish();
}

/// Benchmark decoding speed
fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for (side_name, side) in SIDES {
        for (pattern_name, generator) in PATTERNS {
            let bytes = encode(&generator(side)).unwrap();
            let id = format!("{}/{}", side_name, pattern_name);

            group.throughput(Throughput::Elements(side as u64 * side as u64));
            group.bench_with_input(BenchmarkId::from_parameter(&id), &bytes, |b, bytes| {
                b.iter(|| {
                    let raster = decode(black_box(bytes)).unwrap();
                    black_box(raster);
                });
            });
        }
    }

    group.finish();
}

/// Benchmark the palette pass alone
fn bench_palette(c: &mut Criterion) {
    let mut group = c.benchmark_group("palette");

    for (pattern_name, generator) in PATTERNS {
        let raster = generator(512);
        group.throughput(Throughput::Elements(512 * 512));
        group.bench_with_input(
            BenchmarkId::from_parameter(pattern_name),
            &raster,
            |b, raster| {
                b.iter(|| {
                    let palette = Palette::build(black_box(raster.pixels())).unwrap();
                    black_box(palette);
                });
            },
        );
    }

    group.finish();
}

/// Print output sizes once, relative to raw RGBA
fn bench_output_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("output_size");
    group.sample_size(10);

    for (pattern_name, generator) in PATTERNS {
        let raster = generator(256);
        let bytes = encode(&raster).unwrap();
        let raw = raster.pixels().len() * 4;
        println!(
            "{:<12} {:>8} bytes ({:.1}x smaller than RGBA)",
            pattern_name,
            bytes.len(),
            raw as f64 / bytes.len() as f64
        );

        group.bench_with_input(
            BenchmarkId::from_parameter(pattern_name),
            &raster,
            |b, raster| {
                b.iter(|| black_box(encode(black_box(raster)).unwrap().len()));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_encode,
    bench_decode,
    bench_palette,
    bench_output_size
);
criterion_main!(benches);
