#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use lensdist_image as image;

#[doc(inline)]
pub use lensdist_imgproc as imgproc;
