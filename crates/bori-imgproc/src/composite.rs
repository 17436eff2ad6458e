use bori_image::{Image, ImageError};

use crate::parallel;

/// Blend `overlay` over `base` weighted by a coverage mask.
///
/// For every channel, including alpha:
///
/// dst = (overlay * m + base * (255 - m) + 127) / 255
///
/// so a zero mask gives `base` and a full mask gives `overlay` exactly.
///
/// # Arguments
///
/// * `base` - The image shown where the mask is empty.
/// * `overlay` - The image shown where the mask is full.
/// * `mask` - The per pixel coverage of `overlay`.
///
/// # Errors
///
/// Returns [`ImageError::InvalidImageSize`] if the three images differ in size.
///
/// # Example
///
/// ```
/// use bori_image::{Image, ImageSize};
/// use bori_imgproc::composite::blend_masked;
///
/// let size = ImageSize { width: 2, height: 1 };
/// let base = Image::<u8, 4>::from_size_pixel(size, [0, 0, 0, 255]).unwrap();
/// let overlay = Image::<u8, 4>::from_size_pixel(size, [200, 100, 50, 255]).unwrap();
/// let mask = Image::<u8, 1>::new(size, vec![0, 255]).unwrap();
///
/// let out = blend_masked(&base, &overlay, &mask).unwrap();
/// assert_eq!(out.as_slice(), &[0, 0, 0, 255, 200, 100, 50, 255]);
/// ```
pub fn blend_masked(
    base: &Image<u8, 4>,
    overlay: &Image<u8, 4>,
    mask: &Image<u8, 1>,
) -> Result<Image<u8, 4>, ImageError> {
    for other in [overlay.size(), mask.size()] {
        if base.size() != other {
            return Err(ImageError::InvalidImageSize(
                base.width(),
                base.height(),
                other.width,
                other.height,
            ));
        }
    }

    let mut dst = base.clone();

    parallel::par_iter_rows_two(overlay, mask, &mut dst, |overlay_pixel, m, dst_pixel| {
        let m = m[0] as u32;
        let inv = 255 - m;
        for (d, &o) in dst_pixel.iter_mut().zip(overlay_pixel) {
            *d = ((o as u32 * m + *d as u32 * inv + 127) / 255) as u8;
        }
    });

    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bori_image::ImageSize;

    #[test]
    fn test_blend_masked_extremes() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 3,
            height: 2,
        };
        let base = Image::<u8, 4>::new(size, (0..24).map(|v| v * 10).collect())?;
        let overlay = Image::<u8, 4>::from_size_pixel(size, [7, 8, 9, 10])?;

        let empty = Image::<u8, 1>::from_size_val(size, 0)?;
        assert_eq!(blend_masked(&base, &overlay, &empty)?, base);

        let full = Image::<u8, 1>::from_size_val(size, 255)?;
        assert_eq!(blend_masked(&base, &overlay, &full)?, overlay);
        Ok(())
    }

    #[test]
    fn test_blend_masked_half() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 1,
            height: 1,
        };
        let base = Image::<u8, 4>::from_size_pixel(size, [0, 100, 255, 255])?;
        let overlay = Image::<u8, 4>::from_size_pixel(size, [255, 200, 0, 0])?;
        let mask = Image::<u8, 1>::from_size_val(size, 128)?;

        let out = blend_masked(&base, &overlay, &mask)?;
        // (255 * 128 + 127) / 255 = 128, (200 * 128 + 100 * 127 + 127) / 255 = 150
        assert_eq!(out.pixel(0, 0)?, &[128, 150, 127, 127]);
        Ok(())
    }

    #[test]
    fn test_blend_masked_size_mismatch() -> Result<(), ImageError> {
        let base = Image::<u8, 4>::from_size_val([2, 2].into(), 0)?;
        let overlay = Image::<u8, 4>::from_size_val([2, 3].into(), 0)?;
        let mask = Image::<u8, 1>::from_size_val([2, 2].into(), 0)?;
        assert_eq!(
            blend_masked(&base, &overlay, &mask),
            Err(ImageError::InvalidImageSize(2, 2, 2, 3))
        );

        let small_mask = Image::<u8, 1>::from_size_val([1, 2].into(), 0)?;
        assert_eq!(
            blend_masked(&base, &base, &small_mask),
            Err(ImageError::InvalidImageSize(2, 2, 1, 2))
        );
        Ok(())
    }
}
