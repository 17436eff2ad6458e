#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use bori_image as image;

#[doc(inline)]
pub use bori_imgproc as imgproc;
