use bori_image::{Image, ImageError};

use crate::parallel::{self, ExecutionStrategy};

/// Resize an 8-bit image to the size of `dst` with bilinear interpolation.
///
/// Pixel centers are aligned, so a destination pixel `(x, y)` samples the source at
/// `((x + 0.5) * sx - 0.5, (y + 0.5) * sy - 0.5)` where `sx` and `sy` are the source to
/// destination size ratios. Sample positions are clamped to the source and the
/// interpolated values are rounded.
///
/// # Arguments
///
/// * `src` - The input image.
/// * `dst` - The output image. Its size selects the target size.
///
/// # Errors
///
/// Returns [`ImageError::InvalidImageSize`] if `src` is empty and `dst` is not.
///
/// # Example
///
/// ```
/// use bori_image::{Image, ImageSize};
/// use bori_imgproc::resize::resize_bilinear;
///
/// let image = Image::<u8, 4>::from_size_pixel(
///     ImageSize { width: 8, height: 4 },
///     [10, 20, 30, 255],
/// )
/// .unwrap();
///
/// let mut small = Image::<u8, 4>::from_size_val(ImageSize { width: 2, height: 1 }, 0).unwrap();
/// resize_bilinear(&image, &mut small).unwrap();
///
/// assert_eq!(small.pixel(1, 0).unwrap(), &[10, 20, 30, 255]);
/// ```
pub fn resize_bilinear<const C: usize>(
    src: &Image<u8, C>,
    dst: &mut Image<u8, C>,
) -> Result<(), ImageError> {
    if dst.is_empty() {
        return Ok(());
    }

    if src.is_empty() {
        return Err(ImageError::InvalidImageSize(
            src.width(),
            src.height(),
            dst.width(),
            dst.height(),
        ));
    }

    let (src_rows, src_cols) = (src.rows(), src.cols());
    let (dst_rows, dst_cols) = (dst.rows(), dst.cols());

    let scale_x = src_cols as f32 / dst_cols as f32;
    let scale_y = src_rows as f32 / dst_rows as f32;

    let max_x = (src_cols - 1) as f32;
    let max_y = (src_rows - 1) as f32;

    let data = src.as_slice();

    parallel::for_each_row(
        ExecutionStrategy::Auto,
        dst_rows * dst_cols,
        dst.as_slice_mut(),
        dst_cols * C,
        |y, row| {
            let v = ((y as f32 + 0.5) * scale_y - 0.5).clamp(0.0, max_y);
            let iv0 = v.trunc() as usize;
            let iv1 = (iv0 + 1).min(src_rows - 1);
            let frac_v = v - iv0 as f32;

            for (x, out) in row.chunks_exact_mut(C).enumerate() {
                let u = ((x as f32 + 0.5) * scale_x - 0.5).clamp(0.0, max_x);
                let iu0 = u.trunc() as usize;
                let iu1 = (iu0 + 1).min(src_cols - 1);
                let frac_u = u - iu0 as f32;

                let w00 = (1.0 - frac_u) * (1.0 - frac_v);
                let w01 = frac_u * (1.0 - frac_v);
                let w10 = (1.0 - frac_u) * frac_v;
                let w11 = frac_u * frac_v;

                let p00 = &data[(iv0 * src_cols + iu0) * C..][..C];
                let p01 = &data[(iv0 * src_cols + iu1) * C..][..C];
                let p10 = &data[(iv1 * src_cols + iu0) * C..][..C];
                let p11 = &data[(iv1 * src_cols + iu1) * C..][..C];

                for k in 0..C {
                    let value = p00[k] as f32 * w00
                        + p01[k] as f32 * w01
                        + p10[k] as f32 * w10
                        + p11[k] as f32 * w11;
                    out[k] = value.round().clamp(0.0, 255.0) as u8;
                }
            }
        },
    );

    Ok(())
}
