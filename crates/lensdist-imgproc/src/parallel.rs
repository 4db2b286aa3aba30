use rayon::prelude::*;

use lensdist_image::Image;

/// Apply a function to each pixel for grid sampling in parallel.
///
/// The destination image is processed row by row on the rayon pool. `map_x` and
/// `map_y` are row-major slices with one entry per destination pixel; every
/// closure invocation receives the map values and the channels of one pixel.
pub fn par_iter_rows_resample<T: Send, const C: usize>(
    dst: &mut Image<T, C>,
    map_x: &[f64],
    map_y: &[f64],
    f: impl Fn(&f64, &f64, &mut [T]) + Send + Sync,
) {
    let cols = dst.cols();
    if cols == 0 || C == 0 {
        return;
    }

    dst.as_slice_mut()
        .par_chunks_exact_mut(C * cols)
        .zip(map_x.par_chunks_exact(cols))
        .zip(map_y.par_chunks_exact(cols))
        .for_each(|((dst_chunk, map_x_chunk), map_y_chunk)| {
            dst_chunk
                .chunks_exact_mut(C)
                .zip(map_x_chunk.iter().zip(map_y_chunk.iter()))
                .for_each(|(dst_pixel, (x, y))| {
                    f(x, y, dst_pixel);
                });
        });
}
