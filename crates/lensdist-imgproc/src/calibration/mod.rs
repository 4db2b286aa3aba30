/// lens distortion module.
pub mod distortion;

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use distortion::PolynomialDistortion;
use lensdist_image::ImageError;

/// Error types for camera operations.
#[derive(Debug, Error, PartialEq)]
pub enum CameraError {
    /// Malformed camera matrix, distortion coefficients or point set.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A 3d point with zero depth cannot be projected.
    #[error("Point {0} has zero depth and cannot be projected")]
    DegeneratePoint(usize),

    /// Error raised by the image container.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// Error when an output array cannot be assembled.
    #[error("Invalid shape")]
    Shape(#[from] ndarray::ShapeError),
}

/// Result type for camera operations.
pub type CameraResult<T> = Result<T, CameraError>;

/// Represents the instrinsic parameters of a pinhole camera
///
/// # Fields
///
/// * `fx` - The focal length in the x direction
/// * `fy` - The focal length in the y direction
/// * `cx` - The x coordinate of the principal point
/// * `cy` - The y coordinate of the principal point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraIntrinsic {
    /// The focal length in the x direction
    pub fx: f64,
    /// The focal length in the y direction
    pub fy: f64,
    /// The x coordinate of the principal point
    pub cx: f64,
    /// The y coordinate of the principal point
    pub cy: f64,
}

impl CameraIntrinsic {
    /// Create camera intrinsics from focal lengths and principal point.
    pub fn new(fx: f64, fy: f64, cx: f64, cy: f64) -> Self {
        Self { fx, fy, cx, cy }
    }

    /// Create camera intrinsics from a 3x3 camera matrix.
    ///
    /// Only `fx = K[0, 0]`, `fy = K[1, 1]`, `cx = K[0, 2]` and `cy = K[1, 2]` are
    /// consumed; the skew and the last row are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CameraError::InvalidParameter`] when the matrix is not 3x3 or the
    /// focal lengths are not strictly positive.
    pub fn from_matrix(k: &Array2<f64>) -> CameraResult<Self> {
        if k.shape() != [3, 3] {
            return Err(CameraError::InvalidParameter(format!(
                "camera matrix must be 3x3, got {:?}",
                k.shape()
            )));
        }

        let intrinsic = Self {
            fx: k[[0, 0]],
            fy: k[[1, 1]],
            cx: k[[0, 2]],
            cy: k[[1, 2]],
        };
        intrinsic.validate()?;

        Ok(intrinsic)
    }

    /// Convert to a 3x3 camera matrix with zero skew.
    pub fn to_matrix(&self) -> Array2<f64> {
        ndarray::array![
            [self.fx, 0.0, self.cx],
            [0.0, self.fy, self.cy],
            [0.0, 0.0, 1.0]
        ]
    }

    /// Check that the focal lengths are finite and strictly positive.
    pub fn validate(&self) -> CameraResult<()> {
        let valid = |f: f64| f.is_finite() && f > 0.0;
        if !valid(self.fx) || !valid(self.fy) {
            return Err(CameraError::InvalidParameter(format!(
                "focal lengths must be positive, got fx={} fy={}",
                self.fx, self.fy
            )));
        }
        Ok(())
    }
}

/// A complete calibration: intrinsics plus lens distortion.
///
/// This is the unit collaborators load from calibration storage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraCalibration {
    /// Camera intrinsics
    pub intrinsic: CameraIntrinsic,
    /// Lens distortion
    #[serde(default)]
    pub distortion: PolynomialDistortion,
}

impl CameraCalibration {
    /// Build a calibration from a camera matrix and a distortion vector.
    pub fn from_arrays(k: &Array2<f64>, d: &ndarray::Array1<f64>) -> CameraResult<Self> {
        Ok(Self {
            intrinsic: CameraIntrinsic::from_matrix(k)?,
            distortion: PolynomialDistortion::from_array(d)?,
        })
    }
}
