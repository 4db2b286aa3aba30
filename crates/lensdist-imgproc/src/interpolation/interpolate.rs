use super::bilinear::bilinear_interpolation;
use super::nearest::nearest_neighbor_interpolation;
use lensdist_image::{Image, ImageDtype};

/// Interpolation mode for the resampling operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationMode {
    /// Bilinear interpolation
    Bilinear,
    /// Nearest neighbor interpolation
    #[default]
    Nearest,
}

impl InterpolationMode {
    /// Select the mode from a `bilinear` flag.
    pub fn from_bilinear_flag(bilinear: bool) -> Self {
        if bilinear {
            InterpolationMode::Bilinear
        } else {
            InterpolationMode::Nearest
        }
    }
}

/// Top-left corner of the 2x2 sampling footprint at `(u, v)`.
///
/// Returns `None` when the footprint is not fully inside an image of
/// `cols` x `rows` pixels, including when `u` or `v` is NaN.
pub(crate) fn sampling_footprint(
    u: f64,
    v: f64,
    cols: usize,
    rows: usize,
) -> Option<(usize, usize)> {
    let (u1, v1) = (u.floor(), v.floor());

    let in_image = u1 >= 0.0 && u1 + 1.0 < cols as f64 && v1 >= 0.0 && v1 + 1.0 < rows as f64;

    in_image.then_some((u1 as usize, v1 as usize))
}

/// Kernel for interpolating a pixel value
///
/// # Arguments
///
/// * `image` - The input image container with shape (height, width, C).
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
/// * `interpolation` - The interpolation mode to use.
///
/// # Returns
///
/// The interpolated pixel values, or `None` when `(u, v)` cannot be sampled.
pub fn interpolate_pixel<T: ImageDtype, const C: usize>(
    image: &Image<T, C>,
    u: f64,
    v: f64,
    interpolation: InterpolationMode,
) -> Option<[T; C]> {
    match interpolation {
        InterpolationMode::Bilinear => bilinear_interpolation(image, u, v),
        InterpolationMode::Nearest => nearest_neighbor_interpolation(image, u, v),
    }
}
