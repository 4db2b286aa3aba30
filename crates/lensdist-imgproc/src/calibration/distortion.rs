use super::{CameraError, CameraIntrinsic, CameraResult};
use crate::interpolation::grid::meshgrid_from_fn;
use lensdist_image::ImageSize;
use ndarray::{Array1, Array2, Zip};
use serde::{Deserialize, Serialize};

/// Represents the polynomial distortion parameters of a camera
///
/// The radial terms `k1`, `k2` are always active. The tangential terms `p1`, `p2`
/// are only non-zero when the model is built from four coefficients.
///
/// # Fields
///
/// * `k1` - The first radial distortion coefficient
/// * `k2` - The second radial distortion coefficient
/// * `p1` - The first tangential distortion coefficient
/// * `p2` - The second tangential distortion coefficient
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolynomialDistortion {
    /// The first radial distortion coefficient
    pub k1: f64,
    /// The second radial distortion coefficient
    pub k2: f64,
    /// The first tangential distortion coefficient
    pub p1: f64,
    /// The second tangential distortion coefficient
    pub p2: f64,
}

impl PolynomialDistortion {
    /// Distortion parameters with all coefficients set to zero (no distortion).
    pub fn none() -> Self {
        Self::default()
    }

    /// Distortion parameters with only the two radial coefficients.
    pub fn radial(k1: f64, k2: f64) -> Self {
        Self {
            k1,
            k2,
            ..Self::default()
        }
    }

    /// Distortion parameters with radial and tangential coefficients.
    pub fn radial_tangential(k1: f64, k2: f64, p1: f64, p2: f64) -> Self {
        Self { k1, k2, p1, p2 }
    }

    /// Build the model from an ordered coefficient list `(k1, k2[, p1, p2])`.
    ///
    /// # Errors
    ///
    /// Returns [`CameraError::InvalidParameter`] unless exactly two or four
    /// coefficients are given.
    pub fn from_coeffs(coeffs: &[f64]) -> CameraResult<Self> {
        match *coeffs {
            [k1, k2] => Ok(Self::radial(k1, k2)),
            [k1, k2, p1, p2] => Ok(Self::radial_tangential(k1, k2, p1, p2)),
            _ => Err(CameraError::InvalidParameter(format!(
                "distortion coefficients must have length 2 or 4, got {}",
                coeffs.len()
            ))),
        }
    }

    /// Build the model from a coefficient vector, see [`PolynomialDistortion::from_coeffs`].
    pub fn from_array(coeffs: &Array1<f64>) -> CameraResult<Self> {
        Self::from_coeffs(&coeffs.to_vec())
    }

    /// The coefficients as `[k1, k2, p1, p2]`.
    pub fn to_coeffs(&self) -> [f64; 4] {
        [self.k1, self.k2, self.p1, self.p2]
    }

    /// Check if there is any distortion.
    pub fn has_distortion(&self) -> bool {
        self.to_coeffs().iter().any(|&c| c != 0.0)
    }

    /// Distort a point given in normalized camera-plane coordinates.
    ///
    /// # Arguments
    ///
    /// * `x` - The normalized x coordinate, i.e. `X / Z`
    /// * `y` - The normalized y coordinate, i.e. `Y / Z`
    ///
    /// # Returns
    ///
    /// The distorted normalized coordinates `(x_d, y_d)`.
    pub fn distort_normalized(&self, x: f64, y: f64) -> (f64, f64) {
        let (k1, k2, p1, p2) = (self.k1, self.k2, self.p1, self.p2);

        // calculate the radial distance
        let r2 = x * x + y * y;

        // radial distortion
        let radial = 1.0 + k1 * r2 + k2 * r2 * r2;

        // tangential distortion
        let xd = x * radial + 2.0 * p1 * x * y + p2 * (r2 + 2.0 * x * x);
        let yd = y * radial + p1 * (r2 + 2.0 * y * y) + 2.0 * p2 * x * y;

        (xd, yd)
    }
}

/// Distort a point using polynomial distortion
///
/// The point is given in pixel coordinates. It is normalized with the camera
/// intrinsics, distorted and mapped back to pixel coordinates. A model without
/// distortion returns the point unchanged.
///
/// # Arguments
///
/// * `x` - The x coordinate of the point
/// * `y` - The y coordinate of the point
/// * `intrinsic` - The intrinsic parameters of the camera
/// * `distortion` - The distortion parameters of the camera
///
/// # Returns
///
/// * `x` - The x coordinate of the distorted point
/// * `y` - The y coordinate of the distorted point
pub fn distort_point_polynomial(
    x: f64,
    y: f64,
    intrinsic: &CameraIntrinsic,
    distortion: &PolynomialDistortion,
) -> (f64, f64) {
    if !distortion.has_distortion() {
        return (x, y);
    }

    // unpack the intrinsic parameters
    let (fx, fy, cx, cy) = (intrinsic.fx, intrinsic.fy, intrinsic.cx, intrinsic.cy);

    // normalize the coordinates
    let x = (x - cx) / fx;
    let y = (y - cy) / fy;

    let (xd, yd) = distortion.distort_normalized(x, y);

    // denormalize the coordinates
    let xdst = fx * xd + cx;
    let ydst = fy * yd + cy;

    (xdst, ydst)
}

/// Distort a set of pixel coordinates.
///
/// # Arguments
///
/// * `points` - The points to distort with shape (N, 2).
/// * `dist_coeffs` - The distortion coefficients `(k1, k2[, p1, p2])`.
/// * `camera_matrix` - The 3x3 camera matrix.
///
/// # Returns
///
/// The distorted points with shape (N, 2), in the same order as the input.
///
/// # Errors
///
/// Returns [`CameraError::InvalidParameter`] for a malformed camera matrix,
/// coefficient vector or point set.
pub fn distort_points(
    points: &Array2<f64>,
    dist_coeffs: &Array1<f64>,
    camera_matrix: &Array2<f64>,
) -> CameraResult<Array2<f64>> {
    let intrinsic = CameraIntrinsic::from_matrix(camera_matrix)?;
    let distortion = PolynomialDistortion::from_array(dist_coeffs)?;

    if points.ncols() != 2 {
        return Err(CameraError::InvalidParameter(format!(
            "points must be an Nx2 array, got {:?}",
            points.shape()
        )));
    }

    let mut dst = Array2::zeros((points.nrows(), 2));
    Zip::from(dst.rows_mut())
        .and(points.rows())
        .for_each(|mut dst_row, src_row| {
            let (u, v) = distort_point_polynomial(src_row[0], src_row[1], &intrinsic, &distortion);
            dst_row[0] = u;
            dst_row[1] = v;
        });

    Ok(dst)
}

/// Generate the correction map for a polynomial distortion model
///
/// For every pixel `(x, y)` of the undistorted image the map holds the location
/// in the distorted image where that pixel has to be sampled.
///
/// # Arguments
///
/// * `intrinsic` - The intrinsic parameters of the camera
/// * `distortion` - The distortion parameters of the camera
/// * `size` - The size of the image
///
/// # Returns
///
/// * `map_x` - The x map for undistorting the image, with shape (height, width)
/// * `map_y` - The y map for undistorting the image, with shape (height, width)
pub fn generate_correction_map_polynomial(
    intrinsic: &CameraIntrinsic,
    distortion: &PolynomialDistortion,
    size: &ImageSize,
) -> CameraResult<(Array2<f64>, Array2<f64>)> {
    intrinsic.validate()?;

    log::debug!("generating correction map for {size} with {distortion:?}");

    meshgrid_from_fn(size.width, size.height, |x, y| {
        Ok(distort_point_polynomial(
            x as f64, y as f64, intrinsic, distortion,
        ))
    })
}
