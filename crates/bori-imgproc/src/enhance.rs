use bori_image::{color_spaces::OPAQUE, Image, ImageError};

use crate::{
    color::{apply_color_matrix, luminance_u8, ColorMatrix},
    parallel,
};

/// Adjust the brightness of an RGBA8 image.
///
/// # Arguments
///
/// * `src` - The input image.
/// * `value` - The brightness shift in [-100, 100]; `value / 100 * 255` is added to
///   every color channel.
///
/// # Returns
///
/// A new image with the same size as `src`. Alpha is kept.
///
/// # Example
///
/// ```
/// use bori_image::{Image, ImageSize};
/// use bori_imgproc::enhance::adjust_brightness;
///
/// let image = Image::<u8, 4>::from_size_pixel(
///     ImageSize { width: 4, height: 4 },
///     [128, 128, 128, 255],
/// )
/// .unwrap();
///
/// let bright = adjust_brightness(&image, 50.0).unwrap();
/// assert_eq!(bright.pixel(3, 3).unwrap(), &[255, 255, 255, 255]);
/// ```
pub fn adjust_brightness(src: &Image<u8, 4>, value: f32) -> Result<Image<u8, 4>, ImageError> {
    apply_color_matrix(src, &ColorMatrix::brightness(value))
}

/// Adjust the contrast of an RGBA8 image around mid-gray.
///
/// `contrast` is expected in [0, 3], where 1 leaves the image unchanged.
pub fn adjust_contrast(src: &Image<u8, 4>, contrast: f32) -> Result<Image<u8, 4>, ImageError> {
    apply_color_matrix(src, &ColorMatrix::contrast(contrast))
}

/// Adjust the saturation of an RGBA8 image, keeping luminance.
///
/// 0 gives a grayscale image, 1 leaves the image unchanged.
pub fn adjust_saturation(src: &Image<u8, 4>, saturation: f32) -> Result<Image<u8, 4>, ImageError> {
    apply_color_matrix(src, &ColorMatrix::saturation(saturation))
}

/// Shift the hue of an RGBA8 image by `degrees` in [-180, 180].
pub fn adjust_hue(src: &Image<u8, 4>, degrees: f32) -> Result<Image<u8, 4>, ImageError> {
    apply_color_matrix(src, &ColorMatrix::hue(degrees))
}

/// Warm (positive) or cool (negative) an RGBA8 image, `value` in [-100, 100].
pub fn adjust_color_temperature(
    src: &Image<u8, 4>,
    value: f32,
) -> Result<Image<u8, 4>, ImageError> {
    apply_color_matrix(src, &ColorMatrix::temperature(value))
}

/// Blend the colors of an RGBA8 image toward `color` by `strength` in [0, 1].
pub fn apply_tint(
    src: &Image<u8, 4>,
    color: [u8; 3],
    strength: f32,
) -> Result<Image<u8, 4>, ImageError> {
    apply_color_matrix(src, &ColorMatrix::tint(color, strength))
}

/// Darken (positive `value`) or lift (negative `value`) the bright regions of an image.
///
/// Each color channel becomes `c - c * (l / 255) * value / 100`, where `l` is the
/// truncated luminance of the pixel. Results are clamped and truncated; alpha is set
/// to 255.
///
/// # Arguments
///
/// * `src` - The input image.
/// * `value` - The strength in [-100, 100].
///
/// # Returns
///
/// A new image with the same size as `src`.
pub fn adjust_highlights(src: &Image<u8, 4>, value: f32) -> Result<Image<u8, 4>, ImageError> {
    let amount = value / 100.0;
    map_tone(src, |c, weight| c - c * (weight / 255.0) * amount, |l| l)
}

/// Lift (positive `value`) or crush (negative `value`) the dark regions of an image.
///
/// Each color channel becomes `c + (255 - c) * ((255 - l) / 255) * value / 100`, where
/// `l` is the truncated luminance of the pixel. Results are clamped and truncated; alpha
/// is set to 255.
///
/// # Arguments
///
/// * `src` - The input image.
/// * `value` - The strength in [-100, 100].
///
/// # Returns
///
/// A new image with the same size as `src`.
pub fn adjust_shadows(src: &Image<u8, 4>, value: f32) -> Result<Image<u8, 4>, ImageError> {
    let amount = value / 100.0;
    map_tone(
        src,
        |c, weight| c + (255.0 - c) * (weight / 255.0) * amount,
        |l| 255 - l,
    )
}

// shared pixel loop of the tone adjustments
fn map_tone(
    src: &Image<u8, 4>,
    tone: impl Fn(f32, f32) -> f32 + Send + Sync,
    weight: impl Fn(u8) -> u8 + Send + Sync,
) -> Result<Image<u8, 4>, ImageError> {
    let mut dst = Image::<u8, 4>::from_size_val(src.size(), 0)?;

    parallel::par_iter_rows(src, &mut dst, |src_pixel, dst_pixel| {
        let w = weight(luminance_u8(src_pixel[0], src_pixel[1], src_pixel[2])) as f32;
        for ch in 0..3 {
            dst_pixel[ch] = tone(src_pixel[ch] as f32, w).clamp(0.0, 255.0) as u8;
        }
        dst_pixel[3] = OPAQUE;
    });

    Ok(dst)
}
