use criterion::{criterion_group, criterion_main, Criterion};
use qoif::{qoi_encode_default, RawImage};
use std::hint::black_box;

fn generate_gradient_rgba(width: usize, height: usize) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        for x in 0..width {
            let r = ((x * 255) / width.max(1)) as u8;
            let g = ((y * 255) / height.max(1)) as u8;
            let b = 128;
            pixels.push(r);
            pixels.push(g);
            pixels.push(b);
            pixels.push(255); // Alpha
        }
    }
    pixels
}

fn generate_noise_rgba(width: usize, height: usize) -> Vec<u8> {
    let mut state = 0x1234_5678u32;
    (0..width * height * 4)
        .map(|_| {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            (state >> 24) as u8
        })
        .collect()
}

fn bench_encode_gradient_small(c: &mut Criterion) {
    let rgba = generate_gradient_rgba(64, 64);

    c.bench_function("encode_gradient_64x64", |b| {
        b.iter(|| {
            let image = RawImage::rgba(black_box(&rgba), 64, 64).unwrap();
            let result = qoi_encode_default(&image);
            assert!(result.is_ok());
            result
        })
    });
}

fn bench_encode_gradient_large(c: &mut Criterion) {
    let rgba = generate_gradient_rgba(1024, 768);

    c.bench_function("encode_gradient_1024x768", |b| {
        b.iter(|| {
            let image = RawImage::rgba(black_box(&rgba), 1024, 768).unwrap();
            let result = qoi_encode_default(&image);
            assert!(result.is_ok());
            result
        })
    });
}

fn bench_encode_noise(c: &mut Criterion) {
    let rgba = generate_noise_rgba(256, 256);

    c.bench_function("encode_noise_256x256", |b| {
        b.iter(|| {
            let image = RawImage::rgba(black_box(&rgba), 256, 256).unwrap();
            let result = qoi_encode_default(&image);
            assert!(result.is_ok());
            result
        })
    });
}

criterion_group!(
    benches,
    bench_encode_gradient_small,
    bench_encode_gradient_large,
    bench_encode_noise,
);
criterion_main!(benches);
