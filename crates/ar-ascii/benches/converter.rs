use ar_ascii::converter::convert;
use ar_core::config::ConversionConfig;
use ar_core::frame::FrameBuffer;
use criterion::{Criterion, black_box, criterion_group, criterion_main};

fn gradient_frame(width: u32, height: u32) -> FrameBuffer {
    let mut frame = FrameBuffer::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let v = ((x * 255) / width) as u8;
            let w = ((y * 255) / height) as u8;
            frame.set_pixel(x, y, [v, w, 255 - v, 255]);
        }
    }
    frame
}

fn bench_convert(c: &mut Criterion) {
    let frame = gradient_frame(1920, 1080);

    let color = ConversionConfig::default();
    c.bench_function("convert_1080p_color", |b| {
        b.iter(|| convert(black_box(&frame), black_box(&color)));
    });

    let full = ConversionConfig {
        resolution: 1.0,
        grayscale: true,
        ..ConversionConfig::default()
    };
    c.bench_function("convert_1080p_full_res_grayscale", |b| {
        b.iter(|| convert(black_box(&frame), black_box(&full)));
    });
}

criterion_group!(benches, bench_convert);
criterion_main!(benches);
