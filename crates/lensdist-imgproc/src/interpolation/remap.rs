use crate::parallel;

use super::interpolate::interpolate_pixel;
use super::InterpolationMode;
use lensdist_image::{Image, ImageDtype, ImageError};
use ndarray::{Array2, ErrorKind, ShapeError};

/// Apply generic geometric transformation to an image.
///
/// Destination pixels whose map location cannot be sampled keep their current
/// value, so `dst` should be initialized with the background value.
///
/// # Arguments
///
/// * `src` - The input image container with shape (height, width, C).
/// * `dst` - The output image container with shape (height, width, C).
/// * `map_x` - The x coordinates of the pixels to interpolate.
/// * `map_y` - The y coordinates of the pixels to interpolate.
/// * `interpolation` - The interpolation mode to use.
///
/// # Errors
///
/// * The mapx and mapy must have the same size.
/// * The output image must have the same size as the mapx and mapy.
pub fn remap<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    map_x: &Array2<f64>,
    map_y: &Array2<f64>,
    interpolation: InterpolationMode,
) -> Result<(), ImageError> {
    if map_x.dim() != map_y.dim() {
        return Err(ImageError::InvalidImageSize(
            map_x.ncols(),
            map_x.nrows(),
            map_y.ncols(),
            map_y.nrows(),
        ));
    }

    if (dst.rows(), dst.cols()) != map_x.dim() {
        return Err(ImageError::InvalidImageSize(
            dst.width(),
            dst.height(),
            map_x.ncols(),
            map_x.nrows(),
        ));
    }

    let map_x = map_x.as_standard_layout();
    let map_y = map_y.as_standard_layout();
    let layout_error = || ShapeError::from_kind(ErrorKind::IncompatibleLayout);
    let map_x = map_x.as_slice().ok_or_else(layout_error)?;
    let map_y = map_y.as_slice().ok_or_else(layout_error)?;

    // parallelize the remap operation by rows
    parallel::par_iter_rows_resample(dst, map_x, map_y, |&x, &y, dst_pixel| {
        if let Some(pixel) = interpolate_pixel(src, x, y, interpolation) {
            dst_pixel.copy_from_slice(&pixel);
        }
    });

    Ok(())
}
