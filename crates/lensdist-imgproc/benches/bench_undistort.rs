use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;

use lensdist_image::{Image, ImageSize};
use lensdist_imgproc::{
    calibration::{distortion::PolynomialDistortion, CameraIntrinsic},
    interpolation::InterpolationMode,
    undistort::{undistort_image_with, UndistortionMap},
};

fn random_image(size: ImageSize) -> Image<u8, 3> {
    let mut rng = rand::rng();
    let data = (0..size.width * size.height * 3)
        .map(|_| rng.random::<u8>())
        .collect();
    Image::new(size, data).unwrap()
}

fn bench_undistort(c: &mut Criterion) {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut group = c.benchmark_group("Undistort");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{}x{}", width, height);

        let image_size: ImageSize = [*width, *height].into();
        let image = random_image(image_size);

        let intrinsic = CameraIntrinsic::new(
            *width as f64,
            *width as f64,
            *width as f64 / 2.0,
            *height as f64 / 2.0,
        );
        let distortion = PolynomialDistortion::radial_tangential(-0.25, 0.05, 0.001, -0.001);
        let map = UndistortionMap::new(&intrinsic, &distortion, image_size).unwrap();

        for mode in [InterpolationMode::Nearest, InterpolationMode::Bilinear] {
            group.bench_with_input(
                BenchmarkId::new(format!("full_{mode:?}"), &parameter_string),
                &image,
                |b, src| {
                    b.iter(|| {
                        undistort_image_with(
                            black_box(src),
                            black_box(&intrinsic),
                            black_box(&distortion),
                            black_box(mode),
                        )
                    })
                },
            );

            group.bench_with_input(
                BenchmarkId::new(format!("cached_map_{mode:?}"), &parameter_string),
                &image,
                |b, src| b.iter(|| map.apply(black_box(src), black_box(mode))),
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_undistort);
criterion_main!(benches);
