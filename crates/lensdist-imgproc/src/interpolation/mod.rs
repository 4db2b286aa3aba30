//! Pixel interpolation methods for image resampling.
//!
//! This module provides the sampling kernels used when an image is resampled
//! through a correction map, e.g. when undistorting an image.
//!
//! # Interpolation Modes
//!
//! - **Nearest**: Fastest, uses nearest pixel value (no interpolation)
//! - **Bilinear**: Smooth linear interpolation between adjacent pixels
//!
//! Both modes require the full 2x2 neighbourhood at `(floor(u), floor(v))` to be
//! inside the source image. Locations that fail this check are not sampled and
//! the destination keeps its background value.

mod bilinear;

/// Grid generation and coordinate mapping utilities.
///
/// Functions for generating coordinate meshgrids used by the correction maps.
pub mod grid;

pub(crate) mod interpolate;
mod nearest;
mod remap;

pub use interpolate::InterpolationMode;
pub use remap::remap;

pub use interpolate::interpolate_pixel;
