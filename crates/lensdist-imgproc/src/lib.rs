#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// camera model and lens distortion module.
pub mod calibration;

/// utilities for interpolation.
pub mod interpolation;

/// module containing parallization utilities.
pub mod parallel;

/// projection of 3d points to distorted pixel coordinates.
pub mod projection;

/// image undistortion module.
pub mod undistort;
