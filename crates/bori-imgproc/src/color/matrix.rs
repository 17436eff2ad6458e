use crate::parallel;
use bori_image::{Image, ImageError};

use super::gray::{BW, GW, RW};

/// A 4x5 affine color transform.
///
/// The coefficients are stored row-major. For an input pixel `(r, g, b, a)` the output
/// channel `i` is `m[i][0] * r + m[i][1] * g + m[i][2] * b + m[i][3] * a + m[i][4]`, where
/// the translation column is expressed in [0, 255] units. Results are rounded and clamped
/// to [0, 255] when applied.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColorMatrix {
    m: [f32; 20],
}

/// The color axis a single-axis rotation is performed about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RotationAxis {
    /// Rotate the green/blue plane.
    Red,
    /// Rotate the red/blue plane.
    Green,
    /// Rotate the red/green plane.
    Blue,
}

impl Default for ColorMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl ColorMatrix {
    /// The identity transform.
    #[rustfmt::skip]
    pub const fn identity() -> Self {
        Self {
            m: [
                1.0, 0.0, 0.0, 0.0, 0.0,
                0.0, 1.0, 0.0, 0.0, 0.0,
                0.0, 0.0, 1.0, 0.0, 0.0,
                0.0, 0.0, 0.0, 1.0, 0.0,
            ],
        }
    }

    /// Create a matrix from row-major coefficients.
    pub const fn from_array(m: [f32; 20]) -> Self {
        Self { m }
    }

    /// The row-major coefficients.
    pub fn as_array(&self) -> &[f32; 20] {
        &self.m
    }

    /// Whether the alpha row is `[0, 0, 0, 1, 0]`.
    pub fn preserves_alpha(&self) -> bool {
        self.m[15..20] == [0.0, 0.0, 0.0, 1.0, 0.0]
    }

    /// Scale each channel independently.
    #[rustfmt::skip]
    pub fn scale(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            m: [
                r,   0.0, 0.0, 0.0, 0.0,
                0.0, g,   0.0, 0.0, 0.0,
                0.0, 0.0, b,   0.0, 0.0,
                0.0, 0.0, 0.0, a,   0.0,
            ],
        }
    }

    /// Brightness shift for `value` in [-100, 100].
    ///
    /// Adds `value / 100 * 255` to the red, green and blue channels.
    #[rustfmt::skip]
    pub fn brightness(value: f32) -> Self {
        let t = value / 100.0 * 255.0;
        Self {
            m: [
                1.0, 0.0, 0.0, 0.0, t,
                0.0, 1.0, 0.0, 0.0, t,
                0.0, 0.0, 1.0, 0.0, t,
                0.0, 0.0, 0.0, 1.0, 0.0,
            ],
        }
    }

    /// Contrast around mid-gray for `contrast` in [0, 3], where 1 is the identity.
    #[rustfmt::skip]
    pub fn contrast(contrast: f32) -> Self {
        let c = contrast;
        let t = (-0.5 * c + 0.5) * 255.0;
        Self {
            m: [
                c,   0.0, 0.0, 0.0, t,
                0.0, c,   0.0, 0.0, t,
                0.0, 0.0, c,   0.0, t,
                0.0, 0.0, 0.0, 1.0, 0.0,
            ],
        }
    }

    /// Luminance preserving saturation. 0 is grayscale, 1 the identity.
    #[rustfmt::skip]
    pub fn saturation(value: f32) -> Self {
        let inv = 1.0 - value;
        let r = RW * inv;
        let g = GW * inv;
        let b = BW * inv;
        Self {
            m: [
                r + value, g,         b,         0.0, 0.0,
                r,         g + value, b,         0.0, 0.0,
                r,         g,         b + value, 0.0, 0.0,
                0.0,       0.0,       0.0,       1.0, 0.0,
            ],
        }
    }

    /// Rotation by `degrees` about a single color axis.
    pub fn rotation(axis: RotationAxis, degrees: f32) -> Self {
        let radians = degrees.to_radians();
        let (sin, cos) = radians.sin_cos();
        let mut m = Self::identity().m;
        match axis {
            RotationAxis::Red => {
                m[6] = cos;
                m[7] = sin;
                m[11] = -sin;
                m[12] = cos;
            }
            RotationAxis::Green => {
                m[0] = cos;
                m[2] = -sin;
                m[10] = sin;
                m[12] = cos;
            }
            RotationAxis::Blue => {
                m[0] = cos;
                m[1] = sin;
                m[5] = -sin;
                m[6] = cos;
            }
        }
        Self { m }
    }

    /// Hue shift for `degrees` in [-180, 180].
    ///
    /// Rotates about the red axis, then the green axis, then the blue axis.
    pub fn hue(degrees: f32) -> Self {
        Self::rotation(RotationAxis::Red, degrees)
            .then(&Self::rotation(RotationAxis::Green, degrees))
            .then(&Self::rotation(RotationAxis::Blue, degrees))
    }

    /// Color temperature for `value` in [-100, 100].
    ///
    /// Positive values warm the image (red and green up, blue down), negative values cool it.
    pub fn temperature(value: f32) -> Self {
        let warm = value / 100.0;
        Self::scale(1.0 + warm * 0.4, 1.0 + warm * 0.2, 1.0 - warm * 0.4, 1.0)
    }

    /// Blend every color channel toward `color` by `strength` in [0, 1].
    #[rustfmt::skip]
    pub fn tint(color: [u8; 3], strength: f32) -> Self {
        let k = 1.0 - strength;
        let [r, g, b] = color.map(|c| c as f32 * strength);
        Self {
            m: [
                k,   0.0, 0.0, 0.0, r,
                0.0, k,   0.0, 0.0, g,
                0.0, 0.0, k,   0.0, b,
                0.0, 0.0, 0.0, 1.0, 0.0,
            ],
        }
    }

    /// The transform that applies `self` first and `next` afterwards.
    pub fn then(&self, next: &ColorMatrix) -> ColorMatrix {
        let a = &next.m;
        let b = &self.m;
        let mut out = [0.0f32; 20];
        for i in 0..4 {
            for j in 0..5 {
                let mut acc = 0.0;
                for k in 0..4 {
                    acc += a[i * 5 + k] * b[k * 5 + j];
                }
                if j == 4 {
                    acc += a[i * 5 + 4];
                }
                out[i * 5 + j] = acc;
            }
        }
        ColorMatrix { m: out }
    }

    /// Append `next` in place, so that it runs after the current transform.
    pub fn post_concat(&mut self, next: &ColorMatrix) {
        *self = self.then(next);
    }

    /// Prepend `prev` in place, so that it runs before the current transform.
    pub fn pre_concat(&mut self, prev: &ColorMatrix) {
        *self = prev.then(self);
    }

    /// Transform a single `[r, g, b, a]` pixel.
    #[inline]
    pub fn apply_pixel(&self, px: [u8; 4]) -> [u8; 4] {
        let v = px.map(|c| c as f32);
        let m = &self.m;
        let mut out = [0u8; 4];
        for (i, o) in out.iter_mut().enumerate() {
            let row = &m[i * 5..i * 5 + 5];
            let acc = row[0] * v[0] + row[1] * v[1] + row[2] * v[2] + row[3] * v[3] + row[4];
            *o = acc.round().clamp(0.0, 255.0) as u8;
        }
        out
    }
}

/// Apply a color matrix to every pixel of an RGBA8 image.
///
/// # Arguments
///
/// * `src` - The input RGBA8 image.
/// * `matrix` - The color transform.
///
/// # Returns
///
/// A new image with the same size as `src`.
///
/// # Example
///
/// ```
/// use bori_image::{Image, ImageSize};
/// use bori_imgproc::color::{apply_color_matrix, ColorMatrix};
///
/// let image = Image::<u8, 4>::from_size_pixel(
///     ImageSize { width: 4, height: 4 },
///     [128, 128, 128, 255],
/// )
/// .unwrap();
///
/// let bright = apply_color_matrix(&image, &ColorMatrix::brightness(50.0)).unwrap();
/// assert!(bright.as_slice().iter().all(|&v| v == 255));
/// ```
pub fn apply_color_matrix(
    src: &Image<u8, 4>,
    matrix: &ColorMatrix,
) -> Result<Image<u8, 4>, ImageError> {
    let mut dst = Image::<u8, 4>::from_size_val(src.size(), 0)?;

    parallel::par_iter_rows(src, &mut dst, |src_pixel, dst_pixel| {
        let out = matrix.apply_pixel([src_pixel[0], src_pixel[1], src_pixel[2], src_pixel[3]]);
        dst_pixel.copy_from_slice(&out);
    });

    Ok(dst)
}

/// Tint colors offered to the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TintPreset {
    /// #FFD6A5
    Warm,
    /// #A5D8FF
    Cool,
    /// #F4C2C2
    Pink,
    /// #C1E1C1
    Green,
}

impl TintPreset {
    /// All presets in display order.
    pub const ALL: [TintPreset; 4] = [
        TintPreset::Warm,
        TintPreset::Cool,
        TintPreset::Pink,
        TintPreset::Green,
    ];

    /// Display name of the preset.
    pub fn name(&self) -> &'static str {
        match self {
            TintPreset::Warm => "Warm",
            TintPreset::Cool => "Cool",
            TintPreset::Pink => "Pink",
            TintPreset::Green => "Green",
        }
    }

    /// The preset color as `[r, g, b]`.
    pub fn color(&self) -> [u8; 3] {
        match self {
            TintPreset::Warm => [0xFF, 0xD6, 0xA5],
            TintPreset::Cool => [0xA5, 0xD8, 0xFF],
            TintPreset::Pink => [0xF4, 0xC2, 0xC2],
            TintPreset::Green => [0xC1, 0xE1, 0xC1],
        }
    }
}
