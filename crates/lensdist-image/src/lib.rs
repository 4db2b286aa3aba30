#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// image representation for computer vision purposes.
pub mod image;

/// Error types for the image module.
pub mod error;

/// sample types supported by the image container.
pub mod dtype;

pub use crate::dtype::ImageDtype;
pub use crate::error::ImageError;
pub use crate::image::{Image, ImageSize};
