mod gray;
mod matrix;

pub use gray::{gray_from_rgba, luminance, luminance_u8};
pub use matrix::{apply_color_matrix, ColorMatrix, RotationAxis, TintPreset};
