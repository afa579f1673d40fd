use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rust_binarize::utils::integral::{box_mean, construct_integral_and_iterate};
use rust_binarize::utils::morphology::local_extrema;
use rust_binarize::{KernelSize, Plane, StructuringElement};

fn gradient(width: usize, height: usize) -> Plane<u8> {
    Plane::from_fn(width, height, |y, x| ((x * 3 + y * 5) % 256) as u8)
}

fn bench_box_mean_small_window(c: &mut Criterion) {
    let plane = gradient(640, 480);
    c.bench_function("box_mean_640x480_3", |b| {
        b.iter(|| box_mean(black_box(&plane), black_box(KernelSize::square(3))))
    });
}

fn bench_box_mean_large_window(c: &mut Criterion) {
    let plane = gradient(640, 480);
    c.bench_function("box_mean_640x480_151", |b| {
        b.iter(|| box_mean(black_box(&plane), black_box(KernelSize::square(151))))
    });
}

fn bench_mean_stddev(c: &mut Criterion) {
    let plane: Plane<f64> = gradient(640, 480).convert();
    c.bench_function("mean_stddev_640x480_75", |b| {
        b.iter(|| {
            let mut out = plane.clone();
            construct_integral_and_iterate::<f64, 2, _>(
                &mut out,
                KernelSize::square(75),
                |_, _, ii, v| ii.mean_stddev(v).1,
            )
        })
    });
}

fn bench_local_extrema(c: &mut Criterion) {
    let plane = gradient(640, 480);
    let element = StructuringElement::ellipse(KernelSize::square(75)).unwrap();
    c.bench_function("local_extrema_640x480_ellipse75", |b| {
        b.iter(|| local_extrema(black_box(&plane), black_box(&element)))
    });
}

criterion_group!(
    benches,
    bench_box_mean_small_window,
    bench_box_mean_large_window,
    bench_mean_stddev,
    bench_local_extrema
);
criterion_main!(benches);
