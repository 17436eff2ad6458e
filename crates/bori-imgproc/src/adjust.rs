use bori_image::{Image, ImageError};

use crate::{
    color::{apply_color_matrix, ColorMatrix, TintPreset},
    enhance,
    filter::{box_blur, sharpen},
};

/// A single editor adjustment together with its parameter.
///
/// Ranges follow the editor sliders; values outside them are not rejected, only the
/// output channels are clamped.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", content = "value"))]
pub enum Adjustment {
    /// Brightness shift in [-100, 100].
    Brightness(f32),
    /// Contrast factor in [0, 3], 1 is neutral.
    Contrast(f32),
    /// Saturation factor, 0 is grayscale and 1 is neutral.
    Saturation(f32),
    /// Hue rotation in degrees, [-180, 180].
    Hue(f32),
    /// Color temperature in [-100, 100].
    Temperature(f32),
    /// Tint toward a preset color with a strength in [0, 1].
    Tint(TintPreset, f32),
    /// Highlights in [-100, 100].
    Highlights(f32),
    /// Shadows in [-100, 100].
    Shadows(f32),
    /// Sharpen amount in [0, 1].
    Sharpen(f32),
    /// Uniform box blur with the given radius.
    Blur(usize),
    /// An arbitrary color transform.
    ColorMatrix(ColorMatrix),
}

impl Adjustment {
    /// The color transform of this adjustment, if it is one.
    pub fn color_matrix(&self) -> Option<ColorMatrix> {
        match *self {
            Adjustment::Brightness(v) => Some(ColorMatrix::brightness(v)),
            Adjustment::Contrast(v) => Some(ColorMatrix::contrast(v)),
            Adjustment::Saturation(v) => Some(ColorMatrix::saturation(v)),
            Adjustment::Hue(v) => Some(ColorMatrix::hue(v)),
            Adjustment::Temperature(v) => Some(ColorMatrix::temperature(v)),
            Adjustment::Tint(preset, strength) => Some(ColorMatrix::tint(preset.color(), strength)),
            Adjustment::ColorMatrix(m) => Some(m),
            Adjustment::Highlights(_)
            | Adjustment::Shadows(_)
            | Adjustment::Sharpen(_)
            | Adjustment::Blur(_) => None,
        }
    }

    /// Whether the parameter leaves images unchanged.
    ///
    /// A blur is never neutral since its radius is at least one pixel.
    pub fn is_identity(&self) -> bool {
        match *self {
            Adjustment::Brightness(v)
            | Adjustment::Hue(v)
            | Adjustment::Temperature(v)
            | Adjustment::Highlights(v)
            | Adjustment::Shadows(v) => v == 0.0,
            Adjustment::Contrast(v) | Adjustment::Saturation(v) => v == 1.0,
            Adjustment::Tint(_, strength) => strength == 0.0,
            Adjustment::Sharpen(amount) => amount <= 0.0,
            Adjustment::Blur(_) => false,
            Adjustment::ColorMatrix(m) => m == ColorMatrix::identity(),
        }
    }

    /// Apply the adjustment to an RGBA8 image.
    ///
    /// # Example
    ///
    /// ```
    /// use bori_image::{Image, ImageSize};
    /// use bori_imgproc::adjust::Adjustment;
    ///
    /// let image = Image::<u8, 4>::from_size_pixel(
    ///     ImageSize { width: 2, height: 2 },
    ///     [255, 255, 255, 255],
    /// )
    /// .unwrap();
    ///
    /// let out = Adjustment::Highlights(100.0).apply(&image).unwrap();
    /// assert_eq!(out.pixel(0, 0).unwrap(), &[0, 0, 0, 255]);
    /// ```
    pub fn apply(&self, src: &Image<u8, 4>) -> Result<Image<u8, 4>, ImageError> {
        if let Some(matrix) = self.color_matrix() {
            return apply_color_matrix(src, &matrix);
        }
        match *self {
            Adjustment::Highlights(v) => enhance::adjust_highlights(src, v),
            Adjustment::Shadows(v) => enhance::adjust_shadows(src, v),
            Adjustment::Sharpen(amount) => sharpen(src, amount).map(|out| out.into_owned()),
            Adjustment::Blur(radius) => box_blur(src, radius),
            _ => Ok(src.clone()),
        }
    }
}

/// Apply a list of adjustments in order, skipping neutral ones.
pub fn apply_all(src: &Image<u8, 4>, adjustments: &[Adjustment]) -> Result<Image<u8, 4>, ImageError> {
    let mut out = src.clone();
    for adjustment in adjustments.iter().filter(|a| !a.is_identity()) {
        out = adjustment.apply(&out)?;
    }
    Ok(out)
}
