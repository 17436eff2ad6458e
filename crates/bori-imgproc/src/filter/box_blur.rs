use bori_image::{color_spaces::OPAQUE, Image, ImageError};

use crate::parallel::{self, ExecutionStrategy};

/// Smallest radius accepted by [`box_blur`]; smaller values are raised to it.
pub const MIN_BLUR_RADIUS: usize = 1;

/// Largest radius accepted by [`box_blur`]; larger values are lowered to it.
pub const MAX_BLUR_RADIUS: usize = 100;

/// Lookup table replacing the division of a window sum by the window size.
///
/// `table[i] == i / (2 * radius + 1)` for every sum a window of 8-bit values can reach.
struct DivideTable {
    table: Vec<u8>,
}

impl DivideTable {
    fn new(radius: usize) -> Self {
        let div = 2 * radius + 1;
        let table = (0..256 * div).map(|i| (i / div) as u8).collect();
        Self { table }
    }

    #[inline]
    fn lookup(&self, sum: u32) -> u8 {
        self.table[sum as usize]
    }
}

/// Blur an RGBA8 image with a flat box kernel of size `2 * radius + 1`.
///
/// Uses `ExecutionStrategy::Auto`. For explicit control, use [`box_blur_with_strategy`].
///
/// # Arguments
///
/// * `src` - The source image.
/// * `radius` - The half size of the window, clamped to
///   [`MIN_BLUR_RADIUS`, `MAX_BLUR_RADIUS`].
///
/// # Returns
///
/// A new image with every color channel replaced by the truncated mean of the window
/// around it and an opaque alpha. Samples outside the image are clamped to the nearest
/// edge pixel.
///
/// # Example
///
/// ```
/// use bori_image::{Image, ImageSize};
/// use bori_imgproc::filter::box_blur;
///
/// let image = Image::<u8, 4>::from_size_pixel(
///     ImageSize { width: 8, height: 6 },
///     [40, 80, 120, 255],
/// )
/// .unwrap();
///
/// let blurred = box_blur(&image, 18).unwrap();
/// assert_eq!(blurred, image);
/// ```
pub fn box_blur(src: &Image<u8, 4>, radius: usize) -> Result<Image<u8, 4>, ImageError> {
    box_blur_with_strategy(src, radius, ExecutionStrategy::Auto)
}

/// Blur an RGBA8 image with a flat box kernel and execution strategy control.
///
/// The horizontal pass keeps a running sum per row, the vertical pass a running sum per
/// column, so the cost per pixel does not depend on `radius`.
pub fn box_blur_with_strategy(
    src: &Image<u8, 4>,
    radius: usize,
    strategy: ExecutionStrategy,
) -> Result<Image<u8, 4>, ImageError> {
    let radius = radius.clamp(MIN_BLUR_RADIUS, MAX_BLUR_RADIUS);
    let mut dst = Image::<u8, 4>::from_size_val(src.size(), 0)?;

    let rows = src.rows();
    let cols = src.cols();
    if rows == 0 || cols == 0 {
        return Ok(dst);
    }

    let dv = DivideTable::new(radius);
    let num_pixels = rows * cols;
    let src_data = src.as_slice();

    // horizontal pass into row-major rgb planes
    let mut horizontal = vec![0u8; num_pixels * 3];
    parallel::for_each_row(strategy, num_pixels, &mut horizontal, cols * 3, |r, row| {
        let src_row = &src_data[r * cols * 4..(r + 1) * cols * 4];
        slide_window(
            cols,
            radius,
            &dv,
            |i, ch| src_row[i * 4 + ch],
            |i, ch, v| row[i * 3 + ch] = v,
        );
    });

    // vertical pass into column-major rgb planes
    let mut vertical = vec![0u8; num_pixels * 3];
    let horizontal = &horizontal;
    parallel::for_each_row(strategy, num_pixels, &mut vertical, rows * 3, |c, column| {
        slide_window(
            rows,
            radius,
            &dv,
            |i, ch| horizontal[(i * cols + c) * 3 + ch],
            |i, ch, v| column[i * 3 + ch] = v,
        );
    });

    // pack the planes back into opaque rgba pixels
    let vertical = &vertical;
    parallel::for_each_row(strategy, num_pixels, dst.as_slice_mut(), cols * 4, |r, row| {
        for (c, px) in row.chunks_exact_mut(4).enumerate() {
            let idx = (c * rows + r) * 3;
            px[0] = vertical[idx];
            px[1] = vertical[idx + 1];
            px[2] = vertical[idx + 2];
            px[3] = OPAQUE;
        }
    });

    Ok(dst)
}

/// Run a moving window sum of size `2 * radius + 1` over a line of `len` rgb samples.
///
/// Indices outside `[0, len)` are clamped to the nearest end of the line.
#[inline]
fn slide_window(
    len: usize,
    radius: usize,
    dv: &DivideTable,
    read: impl Fn(usize, usize) -> u8,
    mut write: impl FnMut(usize, usize, u8),
) {
    let last = len - 1;
    let mut sum = [0u32; 3];

    // initial window centered on the first sample
    for i in -(radius as isize)..=radius as isize {
        let idx = i.clamp(0, last as isize) as usize;
        for (ch, s) in sum.iter_mut().enumerate() {
            *s += read(idx, ch) as u32;
        }
    }

    for i in 0..len {
        for (ch, &s) in sum.iter().enumerate() {
            write(i, ch, dv.lookup(s));
        }

        let incoming = (i + radius + 1).min(last);
        let outgoing = i.saturating_sub(radius);
        for (ch, s) in sum.iter_mut().enumerate() {
            *s += read(incoming, ch) as u32;
            *s -= read(outgoing, ch) as u32;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bori_image::ImageSize;

    /// Direct O(radius) per pixel reference with the same edge clamping.
    fn naive_box_blur(src: &Image<u8, 4>, radius: usize) -> Image<u8, 4> {
        let (rows, cols) = (src.rows() as isize, src.cols() as isize);
        let r = radius as isize;
        let div = (2 * radius + 1) as u32;
        let data = src.as_slice();

        let mut tmp = vec![0u8; data.len()];
        for y in 0..rows {
            for x in 0..cols {
                for ch in 0..3 {
                    let mut sum = 0u32;
                    for k in -r..=r {
                        let sx = (x + k).clamp(0, cols - 1);
                        sum += data[((y * cols + sx) * 4) as usize + ch] as u32;
                    }
                    tmp[((y * cols + x) * 4) as usize + ch] = (sum / div) as u8;
                }
            }
        }

        let mut out = vec![0u8; data.len()];
        for y in 0..rows {
            for x in 0..cols {
                for ch in 0..3 {
                    let mut sum = 0u32;
                    for k in -r..=r {
                        let sy = (y + k).clamp(0, rows - 1);
                        sum += tmp[((sy * cols + x) * 4) as usize + ch] as u32;
                    }
                    out[((y * cols + x) * 4) as usize + ch] = (sum / div) as u8;
                }
                out[((y * cols + x) * 4) as usize + 3] = 255;
            }
        }
        Image::new(src.size(), out).unwrap()
    }

    fn gradient(size: ImageSize) -> Result<Image<u8, 4>, ImageError> {
        let data = (0..size.area())
            .flat_map(|i| {
                let (x, y) = (i % size.width, i / size.width);
                [(x * 23 % 256) as u8, (y * 41 % 256) as u8, ((x + y) * 7 % 256) as u8, 255]
            })
            .collect();
        Image::new(size, data)
    }

    #[test]
    fn test_divide_table() {
        let dv = DivideTable::new(2);
        assert_eq!(dv.table.len(), 256 * 5);
        assert_eq!(dv.lookup(0), 0);
        assert_eq!(dv.lookup(4), 0);
        assert_eq!(dv.lookup(5), 1);
        assert_eq!(dv.lookup(255 * 5), 255);
    }

    #[test]
    fn test_box_blur_uniform_is_identity() -> Result<(), ImageError> {
        let img = Image::<u8, 4>::from_size_pixel([7, 5].into(), [13, 200, 77, 255])?;
        for radius in [1, 2, 3, 18, 50, 100] {
            assert_eq!(box_blur(&img, radius)?, img);
        }
        Ok(())
    }

    #[test]
    fn test_box_blur_single_pixel() -> Result<(), ImageError> {
        let mut img = Image::<u8, 4>::from_size_pixel([5, 5].into(), [0, 0, 0, 255])?;
        img.set_pixel(2, 2, [225, 90, 9, 255])?;

        let dst = box_blur(&img, 1)?;

        // 225 / 3 = 75 horizontally, then 75 / 3 = 25 vertically
        #[rustfmt::skip]
        let expected_red = [
            0,  0,  0,  0, 0,
            0, 25, 25, 25, 0,
            0, 25, 25, 25, 0,
            0, 25, 25, 25, 0,
            0,  0,  0,  0, 0,
        ];
        let red: Vec<u8> = dst.as_slice().chunks_exact(4).map(|px| px[0]).collect();
        assert_eq!(red, expected_red);
        assert_eq!(dst.pixel(2, 2)?, &[25, 10, 1, 255]);
        Ok(())
    }

    #[test]
    fn test_box_blur_matches_naive() -> Result<(), ImageError> {
        let img = gradient(ImageSize {
            width: 13,
            height: 9,
        })?;
        for radius in [1, 2, 4, 7, 20] {
            assert_eq!(box_blur(&img, radius)?, naive_box_blur(&img, radius));
        }
        Ok(())
    }

    #[test]
    fn test_box_blur_radius_is_clamped() -> Result<(), ImageError> {
        let img = gradient(ImageSize {
            width: 6,
            height: 4,
        })?;
        assert_eq!(box_blur(&img, 0)?, box_blur(&img, 1)?);
        assert_eq!(box_blur(&img, 500)?, box_blur(&img, 100)?);
        Ok(())
    }

    #[test]
    fn test_box_blur_forces_opaque() -> Result<(), ImageError> {
        let img = Image::<u8, 4>::from_size_pixel([3, 3].into(), [10, 10, 10, 0])?;
        let dst = box_blur(&img, 1)?;
        assert!(dst.as_slice().chunks_exact(4).all(|px| px == [10, 10, 10, 255]));
        Ok(())
    }

    #[test]
    fn test_box_blur_degenerate() -> Result<(), ImageError> {
        let empty = Image::<u8, 4>::new(ImageSize::default(), vec![])?;
        assert!(box_blur(&empty, 5)?.is_empty());

        let line = Image::<u8, 4>::new([3, 1].into(), vec![0, 0, 0, 255, 90, 90, 90, 255, 0, 0, 0, 255])?;
        let dst = box_blur(&line, 1)?;
        assert_eq!(dst.as_slice(), &[30, 30, 30, 255, 30, 30, 30, 255, 30, 30, 30, 255]);
        Ok(())
    }

    #[test]
    fn test_box_blur_strategies_match() -> Result<(), ImageError> {
        let img = gradient(ImageSize {
            width: 31,
            height: 17,
        })?;
        let serial = box_blur_with_strategy(&img, 5, ExecutionStrategy::Serial)?;
        let parallel = box_blur_with_strategy(&img, 5, ExecutionStrategy::Parallel)?;
        assert_eq!(serial, parallel);
        Ok(())
    }
}
