use crate::parallel;
use bori_image::{Image, ImageError};

/// Define the RGB weights for the luminance computation.
pub(crate) const RW: f32 = 0.299;
pub(crate) const GW: f32 = 0.587;
pub(crate) const BW: f32 = 0.114;

/// Perceptual luminance of an RGB triplet.
///
/// Y = 0.299 * R + 0.587 * G + 0.114 * B
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> f32 {
    RW * r as f32 + GW * g as f32 + BW * b as f32
}

/// Luminance truncated to an integer in [0, 255].
///
/// Computed in fixed point (weights in thousandths) so that the truncation is exact,
/// e.g. pure white maps to 255 rather than 254.
#[inline]
pub fn luminance_u8(r: u8, g: u8, b: u8) -> u8 {
    let y = 299 * r as u32 + 587 * g as u32 + 114 * b as u32;
    (y / 1000) as u8
}

/// Convert an RGBA8 image to a single channel luminance image.
///
/// The alpha channel is ignored and the luminance is truncated.
///
/// # Arguments
///
/// * `src` - The input RGBA8 image.
/// * `dst` - The output grayscale image.
///
/// Precondition: the input and output images must have the same size.
///
/// # Example
///
/// ```
/// use bori_image::{Image, ImageSize};
/// use bori_imgproc::color::gray_from_rgba;
///
/// let image = Image::<u8, 4>::from_size_pixel(
///     ImageSize {
///         width: 4,
///         height: 5,
///     },
///     [255, 255, 255, 255],
/// )
/// .unwrap();
///
/// let mut gray = Image::<u8, 1>::from_size_val(image.size(), 0).unwrap();
///
/// gray_from_rgba(&image, &mut gray).unwrap();
/// assert!(gray.as_slice().iter().all(|&v| v == 255));
/// ```
pub fn gray_from_rgba(src: &Image<u8, 4>, dst: &mut Image<u8, 1>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    // parallelize the luminance conversion by rows
    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        dst_pixel[0] = luminance_u8(src_pixel[0], src_pixel[1], src_pixel[2]);
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use bori_image::{Image, ImageError, ImageSize};

    #[test]
    fn luminance_weights() {
        approx::assert_relative_eq!(super::luminance(255, 0, 0), 76.245, epsilon = 1e-3);
        approx::assert_relative_eq!(super::luminance(0, 255, 0), 149.685, epsilon = 1e-3);
        approx::assert_relative_eq!(super::luminance(0, 0, 255), 29.07, epsilon = 1e-3);
        assert_eq!(super::luminance_u8(255, 0, 0), 76);
        assert_eq!(super::luminance_u8(255, 255, 255), 255);
    }

    #[test]
    fn gray_from_rgba_regression() -> Result<(), ImageError> {
        #[rustfmt::skip]
        let image = Image::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![
                255, 0, 0, 255,
                0, 255, 0, 255,
                0, 0, 255, 255,
                0, 0, 0, 0,
            ],
        )?;

        let mut gray = Image::<u8, 1>::from_size_val(image.size(), 0)?;
        super::gray_from_rgba(&image, &mut gray)?;

        assert_eq!(gray.as_slice(), &[76, 149, 29, 0]);

        Ok(())
    }

    #[test]
    fn gray_from_rgba_size_mismatch() -> Result<(), ImageError> {
        let image = Image::<u8, 4>::from_size_val([2, 2].into(), 0)?;
        let mut gray = Image::<u8, 1>::from_size_val([1, 2].into(), 0)?;
        assert_eq!(
            super::gray_from_rgba(&image, &mut gray),
            Err(ImageError::InvalidImageSize(2, 2, 1, 2))
        );
        Ok(())
    }
}
