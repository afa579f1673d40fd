use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{GrayImage, Luma};
use rust_binarize::{
    BernsenParams, Guide, KernelSize, NiblackParams, Otsu2DParams, SauvolaParams,
    StructuringElement, bernsen, niblack, otsu_2d, sauvola,
};

fn gradient(width: u32, height: u32) -> GrayImage {
    GrayImage::from_fn(width, height, |x, y| Luma([((x * 3 + y * 5) % 256) as u8]))
}

fn bench_bernsen_medium(c: &mut Criterion) {
    let gray = gradient(640, 480);
    let params = BernsenParams {
        kernel: StructuringElement::ellipse(KernelSize::square(31)).unwrap(),
        ..BernsenParams::default()
    };
    c.bench_function("bernsen_640x480_31", |b| {
        b.iter(|| bernsen(black_box(&gray), black_box(true), black_box(&params)))
    });
}

fn bench_niblack_medium(c: &mut Criterion) {
    let gray = gradient(640, 480);
    let params = NiblackParams {
        kernel_size: KernelSize::square(75),
        k: -0.2,
    };
    c.bench_function("niblack_640x480_75", |b| {
        b.iter(|| niblack(black_box(&gray), black_box(true), black_box(&params)))
    });
}

fn bench_sauvola_medium(c: &mut Criterion) {
    let gray = gradient(640, 480);
    let params = SauvolaParams::default();
    c.bench_function("sauvola_640x480_75", |b| {
        b.iter(|| sauvola(black_box(&gray), black_box(true), black_box(&params)))
    });
}

fn bench_sauvola_large(c: &mut Criterion) {
    let gray = gradient(1920, 1080);
    let params = SauvolaParams::default();
    c.bench_function("sauvola_1920x1080_75", |b| {
        b.iter(|| sauvola(black_box(&gray), black_box(true), black_box(&params)))
    });
}

fn bench_otsu_2d_medium(c: &mut Criterion) {
    let gray = gradient(640, 480);
    let params = Otsu2DParams {
        guide: Guide::Average(KernelSize::square(75)),
        ..Otsu2DParams::default()
    };
    c.bench_function("otsu_2d_640x480_75", |b| {
        b.iter(|| otsu_2d(black_box(&gray), black_box(true), black_box(&params)))
    });
}

criterion_group!(
    benches,
    bench_bernsen_medium,
    bench_niblack_medium,
    bench_sauvola_medium,
    bench_sauvola_large,
    bench_otsu_2d_medium
);
criterion_main!(benches);
