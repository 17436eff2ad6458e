use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use bori_image::Image;
use bori_imgproc::{
    filter::{box_blur_with_strategy, filter3x3_with_strategy, kernels},
    parallel::ExecutionStrategy,
};

fn test_image(width: usize, height: usize) -> Image<u8, 4> {
    let data = (0..width * height * 4).map(|i| (i * 31 % 256) as u8).collect();
    Image::new([width, height].into(), data).unwrap()
}

fn bench_box_blur(c: &mut Criterion) {
    let mut group = c.benchmark_group("BoxBlur");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let image = test_image(*width, *height);

        // the sliding window keeps the cost independent of the radius
        for radius in [1, 18, 100].iter() {
            let parameter_string = format!("{width}x{height}x{radius}");

            for (name, strategy) in [
                ("serial", ExecutionStrategy::Serial),
                ("parallel", ExecutionStrategy::Parallel),
            ] {
                group.bench_with_input(
                    BenchmarkId::new(format!("box_blur_{name}"), &parameter_string),
                    &image,
                    |b, i| b.iter(|| black_box(box_blur_with_strategy(i, *radius, strategy))),
                );
            }
        }
    }

    group.finish();
}

fn bench_filter3x3(c: &mut Criterion) {
    let mut group = c.benchmark_group("Filter3x3");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{width}x{height}");
        let image = test_image(*width, *height);
        let kernel = kernels::sharpen_kernel(0.5);

        for (name, strategy) in [
            ("serial", ExecutionStrategy::Serial),
            ("parallel", ExecutionStrategy::Parallel),
        ] {
            group.bench_with_input(
                BenchmarkId::new(format!("sharpen_{name}"), &parameter_string),
                &image,
                |b, i| b.iter(|| black_box(filter3x3_with_strategy(i, &kernel, strategy))),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_box_blur, bench_filter3x3);
criterion_main!(benches);
