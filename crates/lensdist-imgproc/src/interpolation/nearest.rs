use super::interpolate::sampling_footprint;
use lensdist_image::{Image, ImageDtype};

/// Kernel for nearest neighbor interpolation
///
/// # Arguments
///
/// * `image` - The input image container.
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
///
/// # Returns
///
/// The pixel values at `(u, v)` rounded to the nearest integer, with ties to
/// even, or `None` when `(u, v)` is outside the sampling area.
pub(crate) fn nearest_neighbor_interpolation<T: ImageDtype, const C: usize>(
    image: &Image<T, C>,
    u: f64,
    v: f64,
) -> Option<[T; C]> {
    sampling_footprint(u, v, image.cols(), image.rows())?;

    let iu = u.round_ties_even() as usize;
    let iv = v.round_ties_even() as usize;

    let mut pixel = [T::default(); C];
    pixel.copy_from_slice(image.pixel(iu, iv)?);

    Some(pixel)
}
