use ndarray::{Array1, Array2};

use crate::calibration::distortion::{generate_correction_map_polynomial, PolynomialDistortion};
use crate::calibration::{CameraIntrinsic, CameraResult};
use crate::interpolation::{remap, InterpolationMode};
use lensdist_image::{Image, ImageDtype, ImageError, ImageSize};

/// A precomputed correction map for a fixed camera and image size.
///
/// Generating the map is the expensive part of undistortion; a video stream from
/// one camera can build it once and reuse it for every frame.
///
/// # Examples
///
/// ```
/// use lensdist_image::{Image, ImageSize};
/// use lensdist_imgproc::calibration::{distortion::PolynomialDistortion, CameraIntrinsic};
/// use lensdist_imgproc::interpolation::InterpolationMode;
/// use lensdist_imgproc::undistort::UndistortionMap;
///
/// let size = ImageSize { width: 64, height: 48 };
/// let intrinsic = CameraIntrinsic::new(60.0, 60.0, 32.0, 24.0);
/// let distortion = PolynomialDistortion::radial(-0.2, 0.05);
///
/// let map = UndistortionMap::new(&intrinsic, &distortion, size).unwrap();
///
/// let frame = Image::<u8, 3>::from_size_val(size, 128).unwrap();
/// let undistorted = map.apply(&frame, InterpolationMode::Bilinear).unwrap();
/// assert_eq!(undistorted.size(), size);
/// ```
#[derive(Debug, Clone)]
pub struct UndistortionMap {
    map_x: Array2<f64>,
    map_y: Array2<f64>,
    size: ImageSize,
}

impl UndistortionMap {
    /// Compute the correction map for images of the given size.
    ///
    /// # Errors
    ///
    /// Returns an error if the camera intrinsics are invalid.
    pub fn new(
        intrinsic: &CameraIntrinsic,
        distortion: &PolynomialDistortion,
        size: ImageSize,
    ) -> CameraResult<Self> {
        let (map_x, map_y) = generate_correction_map_polynomial(intrinsic, distortion, &size)?;
        Ok(Self { map_x, map_y, size })
    }

    /// The image size the map was computed for.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// The source x coordinate of every target pixel, shape (height, width).
    pub fn map_x(&self) -> &Array2<f64> {
        &self.map_x
    }

    /// The source y coordinate of every target pixel, shape (height, width).
    pub fn map_y(&self) -> &Array2<f64> {
        &self.map_y
    }

    /// Undistort an image with the precomputed map.
    ///
    /// Target pixels whose source footprint is not inside the image are set to
    /// `T::default()`.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidImageSize`] if `src` does not have the size
    /// of the map.
    pub fn apply<T: ImageDtype, const C: usize>(
        &self,
        src: &Image<T, C>,
        interpolation: InterpolationMode,
    ) -> Result<Image<T, C>, ImageError> {
        if src.size() != self.size {
            return Err(ImageError::InvalidImageSize(
                src.width(),
                src.height(),
                self.size.width,
                self.size.height,
            ));
        }

        let mut dst = Image::from_size_val(self.size, T::default())?;
        remap(src, &mut dst, &self.map_x, &self.map_y, interpolation)?;

        Ok(dst)
    }
}

/// Undistort an image with typed camera parameters.
///
/// # Arguments
///
/// * `img` - The distorted input image.
/// * `intrinsic` - The intrinsic parameters of the camera.
/// * `distortion` - The distortion parameters of the camera.
/// * `interpolation` - The interpolation mode to use.
///
/// # Returns
///
/// The undistorted image, with the same size and sample type as `img`.
pub fn undistort_image_with<T: ImageDtype, const C: usize>(
    img: &Image<T, C>,
    intrinsic: &CameraIntrinsic,
    distortion: &PolynomialDistortion,
    interpolation: InterpolationMode,
) -> CameraResult<Image<T, C>> {
    let map = UndistortionMap::new(intrinsic, distortion, img.size())?;
    Ok(map.apply(img, interpolation)?)
}

/// Undistort an image given a camera matrix and distortion coefficients.
///
/// # Arguments
///
/// * `img` - The distorted input image.
/// * `camera_matrix` - The 3x3 camera matrix.
/// * `dist_coeffs` - The distortion coefficients `(k1, k2[, p1, p2])`.
/// * `bilinear` - Use bilinear interpolation instead of nearest neighbor.
///
/// # Errors
///
/// Returns [`crate::calibration::CameraError::InvalidParameter`] for a
/// malformed camera matrix or coefficient vector.
pub fn undistort_image<T: ImageDtype, const C: usize>(
    img: &Image<T, C>,
    camera_matrix: &Array2<f64>,
    dist_coeffs: &Array1<f64>,
    bilinear: bool,
) -> CameraResult<Image<T, C>> {
    let intrinsic = CameraIntrinsic::from_matrix(camera_matrix)?;
    let distortion = PolynomialDistortion::from_array(dist_coeffs)?;

    undistort_image_with(
        img,
        &intrinsic,
        &distortion,
        InterpolationMode::from_bilinear_flag(bilinear),
    )
}
