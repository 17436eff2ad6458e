#![deny(missing_docs)]
//! Image types for the bori photo editing engine

/// image representation for photo editing purposes.
pub mod image;

/// Error types for the image module.
pub mod error;

/// Typed wrappers for the pixel layouts used by the engine.
pub mod color_spaces;

pub use crate::error::ImageError;
pub use crate::image::{Image, ImageSize};
