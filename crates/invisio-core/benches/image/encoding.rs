use criterion::{criterion_group, criterion_main, Criterion};
use image::{ImageBuffer, Rgba, RgbaImage};
use invisio_core::media::image::{LsbCodec, Placement};
use invisio_core::{BitDepth, CancellationToken, Engine, PayloadEntry};
use std::io::Write;

fn carrier() -> RgbaImage {
    ImageBuffer::from_fn(512, 512, |x, y| Rgba([x as u8, y as u8, (x ^ y) as u8, 255]))
}

pub fn image_encoding(c: &mut Criterion) {
    c.bench_function("Image Encoding", |b| {
        let mut plain_image = carrier();
        let secret_message = vec![0x5a; 64 * 1024];

        b.iter(|| {
            let placement = Placement {
                pixels: 0..512 * 512,
                skip_alpha: true,
                depth: BitDepth::One,
            };
            LsbCodec::encoder(&mut plain_image, placement, CancellationToken::new())
                .write_all(&secret_message)
                .expect("Cannot write secret message");
        })
    });

    c.bench_function("Hide without password", |b| {
        let entries = vec![PayloadEntry::new("report.pdf", vec![0x5a; 10_000]).unwrap()];
        let engine = Engine::default();

        b.iter(|| {
            let mut image = carrier();
            engine
                .hide(&mut image, &entries, None)
                .expect("Cannot hide payload");
        })
    });
}

criterion_group!(benches, image_encoding);
criterion_main!(benches);
