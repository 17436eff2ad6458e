//! Filter operations
//!
//! This module provides neighborhood filter operations for image processing.

/// Filter kernels
pub mod kernels;

/// 3x3 convolution operations
mod convolution;
pub use convolution::*;

/// Sliding window box blur
mod box_blur;
pub use box_blur::*;
