use ndarray::{Array1, Array2};

use crate::calibration::distortion::{distort_point_polynomial, PolynomialDistortion};
use crate::calibration::{CameraError, CameraIntrinsic, CameraResult};

/// Project a 3d point in the camera frame to pixel coordinates.
///
/// The point is divided by its depth, distorted with the polynomial model and
/// mapped to pixels with the camera intrinsics.
///
/// # Arguments
///
/// * `point` - The 3d point `[X, Y, Z]` in the camera frame.
/// * `intrinsic` - The intrinsic parameters of the camera.
/// * `distortion` - The distortion parameters of the camera.
///
/// # Returns
///
/// The pixel coordinates `(u, v)` of the projected point.
///
/// # Errors
///
/// Returns [`CameraError::DegeneratePoint`] when `Z` is zero. A single point
/// has no row, so the reported index is always 0; [`project_points`] reports
/// the row of the offending point instead.
pub fn project_point(
    point: [f64; 3],
    intrinsic: &CameraIntrinsic,
    distortion: &PolynomialDistortion,
) -> CameraResult<(f64, f64)> {
    let [x, y, z] = point;
    if z == 0.0 {
        return Err(CameraError::DegeneratePoint(0));
    }

    let (xd, yd) = distortion.distort_normalized(x / z, y / z);

    Ok((intrinsic.fx * xd + intrinsic.cx, intrinsic.fy * yd + intrinsic.cy))
}

/// Project a set of 3d points to pixel coordinates.
///
/// Every point goes through [`project_point`]; the resulting pixel coordinates
/// then go through [`distort_point_polynomial`] once more. With distortion the
/// returned coordinates are therefore distorted twice.
///
/// # Arguments
///
/// * `points_3d` - The points in the camera frame with shape (N, 3).
/// * `camera_matrix` - The 3x3 camera matrix.
/// * `dist_coeffs` - The distortion coefficients `(k1, k2[, p1, p2])`.
///
/// # Returns
///
/// The projected points with shape (N, 2), in the same order as the input.
///
/// # Errors
///
/// * [`CameraError::InvalidParameter`] for a malformed camera matrix,
///   coefficient vector or point set.
/// * [`CameraError::DegeneratePoint`] with the row index of the first point
///   with zero depth.
pub fn project_points(
    points_3d: &Array2<f64>,
    camera_matrix: &Array2<f64>,
    dist_coeffs: &Array1<f64>,
) -> CameraResult<Array2<f64>> {
    let intrinsic = CameraIntrinsic::from_matrix(camera_matrix)?;
    let distortion = PolynomialDistortion::from_array(dist_coeffs)?;

    if points_3d.ncols() != 3 {
        return Err(CameraError::InvalidParameter(format!(
            "points must be an Nx3 array, got {:?}",
            points_3d.shape()
        )));
    }

    log::debug!("projecting {} points", points_3d.nrows());

    let mut dst = Array2::<f64>::zeros((points_3d.nrows(), 2));
    let rows = points_3d.rows().into_iter().zip(dst.rows_mut());
    for (i, (point, mut dst_row)) in rows.enumerate() {
        let (u, v) = project_point([point[0], point[1], point[2]], &intrinsic, &distortion)
            .map_err(|err| match err {
                CameraError::DegeneratePoint(_) => CameraError::DegeneratePoint(i),
                err => err,
            })?;

        let (u, v) = distort_point_polynomial(u, v, &intrinsic, &distortion);
        dst_row[0] = u;
        dst_row[1] = v;
    }

    Ok(dst)
}
