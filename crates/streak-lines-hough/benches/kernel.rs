use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use streak_lines_core::GrayImage;
use streak_lines_hough::{AccumulatorKernel, HoughKernel, HoughParams, HoughService};

fn streak_frame(size: usize) -> GrayImage {
    let mut img = GrayImage::new(size, size);
    for i in 0..size {
        img.set(i, i, 255);
        img.set(size / 3, i, 255);
        img.set(size - 1 - i, i, 255);
    }
    img
}

fn bench_kernel(c: &mut Criterion) {
    let mut group = c.benchmark_group("accumulator_kernel");
    for size in [128usize, 256, 512] {
        let img = streak_frame(size);
        let mut kernel = AccumulatorKernel::new(HoughParams::default());
        group.bench_with_input(BenchmarkId::from_parameter(size), &img, |b, img| {
            b.iter(|| black_box(kernel.detect(&img.view())))
        });
    }
    group.finish();
}

fn bench_service(c: &mut Criterion) {
    let img = streak_frame(256);
    let service = HoughService::with_params(HoughParams::default()).expect("spawn service");
    c.bench_function("service_lines_256", |b| {
        b.iter(|| black_box(service.lines(&img.view(), Some(16)).expect("lines")))
    });
}

criterion_group!(benches, bench_kernel, bench_service);
criterion_main!(benches);
