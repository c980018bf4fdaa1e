use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use geoaug_image::DenseImage;
use geoaug_imgproc::resize::rescale;
use ndarray::Array3;

fn bench_rescale(c: &mut Criterion) {
    let mut group = c.benchmark_group("Rescale");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let image = DenseImage::from_array3(Array3::<f32>::from_elem((*height, *width, 3), 0.5));

        for scale_factor in [0.5, 1.5] {
            let parameter_string = format!("{}x{}_{}", width, height, scale_factor);
            group.bench_with_input(
                BenchmarkId::new("rescale_f32", &parameter_string),
                &image,
                |b, i| b.iter(|| rescale(black_box(i), black_box(scale_factor))),
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_rescale);
criterion_main!(benches);
