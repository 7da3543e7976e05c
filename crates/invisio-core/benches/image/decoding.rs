use criterion::{criterion_group, criterion_main, Criterion};
use image::{ImageBuffer, Rgba, RgbaImage};
use invisio_core::media::image::{LsbCodec, Placement};
use invisio_core::{BitDepth, CancellationToken, Engine, PayloadEntry};
use std::io::Read;

pub fn image_decoding(c: &mut Criterion) {
    let mut img: RgbaImage =
        ImageBuffer::from_fn(512, 512, |x, y| Rgba([x as u8, y as u8, (x ^ y) as u8, 255]));
    let entries = vec![PayloadEntry::new("report.pdf", vec![0x5a; 10_000]).unwrap()];
    let engine = Engine::default();
    engine
        .hide(&mut img, &entries, None)
        .expect("Cannot hide payload");

    c.bench_function("Image Decoding", |b| {
        let mut buf = vec![0; 64 * 1024];

        b.iter(|| {
            let placement = Placement {
                pixels: 0..512 * 512,
                skip_alpha: true,
                depth: BitDepth::One,
            };
            LsbCodec::decoder(&img, placement, CancellationToken::new())
                .read_exact(&mut buf)
                .expect("Failed to read 64 KiB");
        })
    });

    c.bench_function("Extract without password", |b| {
        b.iter(|| engine.extract(&img, None).expect("Failed to extract payload"))
    });
}

criterion_group!(benches, image_decoding);
criterion_main!(benches);
