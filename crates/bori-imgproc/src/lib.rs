#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// named adjustments combining the engines below.
pub mod adjust;

/// masked blur sessions and the interactive compositor.
pub mod blur;

/// color matrix transforms and luminance.
pub mod color;

/// masked blending of two images.
pub mod composite;

/// utilities to draw on images.
pub mod draw;

/// image enhancement module.
pub mod enhance;

/// image filtering module.
pub mod filter;

/// module containing parallelization utilities.
pub mod parallel;

/// utility functions for resizing images.
pub mod resize;
