use std::borrow::Cow;

use bori_image::{color_spaces::OPAQUE, Image, ImageError};

use super::kernels::{self, KERNEL_3X3_LEN};
use crate::parallel::{self, ExecutionStrategy};

/// Apply a 3x3 kernel to an RGBA8 image.
///
/// Uses `ExecutionStrategy::Auto`. For explicit control, use [`filter3x3_with_strategy`].
///
/// # Arguments
///
/// * `src` - The source image.
/// * `kernel` - Nine row-major weights, center at index 4. No normalization is applied.
///
/// # Returns
///
/// A new image where every interior pixel holds the clamped weighted sum of its 3x3
/// neighborhood per color channel and an opaque alpha. The one pixel wide border is left
/// at `[0, 0, 0, 0]`; images narrower or shorter than 3 pixels come back fully zeroed.
///
/// # Errors
///
/// Returns [`ImageError::InvalidKernelLength`] if `kernel` does not have 9 weights.
///
/// # Example
///
/// ```
/// use bori_image::{Image, ImageSize};
/// use bori_imgproc::filter::{filter3x3, kernels};
///
/// let image = Image::<u8, 4>::from_size_pixel(
///     ImageSize { width: 3, height: 3 },
///     [10, 20, 30, 255],
/// )
/// .unwrap();
///
/// let out = filter3x3(&image, &kernels::identity_kernel()).unwrap();
/// assert_eq!(out.pixel(1, 1).unwrap(), &[10, 20, 30, 255]);
/// assert_eq!(out.pixel(0, 0).unwrap(), &[0, 0, 0, 0]);
/// ```
pub fn filter3x3(src: &Image<u8, 4>, kernel: &[f32]) -> Result<Image<u8, 4>, ImageError> {
    filter3x3_with_strategy(src, kernel, ExecutionStrategy::Auto)
}

/// Apply a 3x3 kernel to an RGBA8 image with execution strategy control.
///
/// See [`filter3x3`] for the semantics. Every strategy gives the same output.
pub fn filter3x3_with_strategy(
    src: &Image<u8, 4>,
    kernel: &[f32],
    strategy: ExecutionStrategy,
) -> Result<Image<u8, 4>, ImageError> {
    if kernel.len() != KERNEL_3X3_LEN {
        return Err(ImageError::InvalidKernelLength(
            kernel.len(),
            KERNEL_3X3_LEN,
        ));
    }

    let mut dst = Image::<u8, 4>::from_size_val(src.size(), 0)?;

    let rows = src.rows();
    let cols = src.cols();
    if rows < 3 || cols < 3 {
        return Ok(dst);
    }

    let src_data = src.as_slice();

    parallel::for_each_row(strategy, rows * cols, dst.as_slice_mut(), cols * 4, |r, row| {
        // border rows keep the default value
        if r == 0 || r == rows - 1 {
            return;
        }
        for c in 1..cols - 1 {
            let mut acc = [0.0f32; 3];
            let mut idx = 0;
            for y in r - 1..=r + 1 {
                for x in c - 1..=c + 1 {
                    let p = (y * cols + x) * 4;
                    let k = kernel[idx];
                    acc[0] += src_data[p] as f32 * k;
                    acc[1] += src_data[p + 1] as f32 * k;
                    acc[2] += src_data[p + 2] as f32 * k;
                    idx += 1;
                }
            }

            let out = c * 4;
            for (ch, &v) in acc.iter().enumerate() {
                row[out + ch] = v.clamp(0.0, 255.0) as u8;
            }
            row[out + 3] = OPAQUE;
        }
    });

    Ok(dst)
}

/// Map a 0..=100 slider value to a sharpen amount in [0, 1].
pub fn sharpen_amount_from_percent(percent: u8) -> f32 {
    percent.min(100) as f32 / 100.0
}

/// Sharpen an RGBA8 image.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `amount` - The sharpen strength in [0, 1].
///
/// # Returns
///
/// `Cow::Borrowed(src)` when `amount <= 0`, otherwise the result of [`filter3x3`] with
/// [`kernels::sharpen_kernel`].
pub fn sharpen(src: &Image<u8, 4>, amount: f32) -> Result<Cow<'_, Image<u8, 4>>, ImageError> {
    if amount <= 0.0 {
        return Ok(Cow::Borrowed(src));
    }
    let kernel = kernels::sharpen_kernel(amount);
    filter3x3(src, &kernel).map(Cow::Owned)
}
