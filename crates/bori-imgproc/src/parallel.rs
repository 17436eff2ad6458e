use rayon::prelude::*;

use bori_image::Image;

/// Images with at least this many pixels are processed in parallel under
/// [`ExecutionStrategy::Auto`].
pub const AUTO_PARALLEL_THRESHOLD: usize = 100_000;

/// Controls how row-based operations are executed.
///
/// Every strategy produces bit-identical output; they differ only in scheduling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecutionStrategy {
    /// Run sequentially on the current thread.
    ///
    /// Useful for small images, debugging, or when the overhead of parallelization
    /// outweighs the benefits.
    Serial,

    /// Use the global Rayon thread pool to process rows in parallel.
    Parallel,

    /// Parallel for images of at least [`AUTO_PARALLEL_THRESHOLD`] pixels, serial otherwise.
    #[default]
    Auto,
}

impl ExecutionStrategy {
    /// Whether an image with `num_pixels` pixels should be processed in parallel.
    pub fn is_parallel(&self, num_pixels: usize) -> bool {
        match self {
            ExecutionStrategy::Serial => false,
            ExecutionStrategy::Parallel => true,
            ExecutionStrategy::Auto => num_pixels >= AUTO_PARALLEL_THRESHOLD,
        }
    }
}

/// Apply a function to each pixel in the image in parallel.
pub fn par_iter_rows<T1, const C1: usize, T2, const C2: usize>(
    src: &Image<T1, C1>,
    dst: &mut Image<T2, C2>,
    f: impl Fn(&[T1], &mut [T2]) + Send + Sync,
) where
    T1: Send + Sync,
    T2: Send + Sync,
{
    // zero-sized chunks are not allowed by rayon
    if src.cols() == 0 {
        return;
    }
    src.as_slice()
        .par_chunks_exact(C1 * src.cols())
        .zip(dst.as_slice_mut().par_chunks_exact_mut(C2 * src.cols()))
        .for_each(|(src_chunk, dst_chunk)| {
            src_chunk
                .chunks_exact(C1)
                .zip(dst_chunk.chunks_exact_mut(C2))
                .for_each(|(src_pixel, dst_pixel)| {
                    f(src_pixel, dst_pixel);
                });
        });
}

/// Apply a function to each pair of pixels of two images in parallel.
pub fn par_iter_rows_two<T1, const C1: usize, T2, const C2: usize, T3, const C3: usize>(
    src1: &Image<T1, C1>,
    src2: &Image<T2, C2>,
    dst: &mut Image<T3, C3>,
    f: impl Fn(&[T1], &[T2], &mut [T3]) + Send + Sync,
) where
    T1: Send + Sync,
    T2: Send + Sync,
    T3: Send + Sync,
{
    let cols = src1.cols();
    if cols == 0 {
        return;
    }
    src1.as_slice()
        .par_chunks_exact(C1 * cols)
        .zip(src2.as_slice().par_chunks_exact(C2 * cols))
        .zip(dst.as_slice_mut().par_chunks_exact_mut(C3 * cols))
        .for_each(|((src1_chunk, src2_chunk), dst_chunk)| {
            src1_chunk
                .chunks_exact(C1)
                .zip(src2_chunk.chunks_exact(C2))
                .zip(dst_chunk.chunks_exact_mut(C3))
                .for_each(|((src1_pixel, src2_pixel), dst_pixel)| {
                    f(src1_pixel, src2_pixel, dst_pixel);
                });
        });
}

/// Run `f(row_index, row)` over every `row_len`-sized row of `data`.
///
/// The rows are dispatched to the Rayon pool when `strategy` says so for `num_pixels`.
pub fn for_each_row<T>(
    strategy: ExecutionStrategy,
    num_pixels: usize,
    data: &mut [T],
    row_len: usize,
    f: impl Fn(usize, &mut [T]) + Send + Sync,
) where
    T: Send,
{
    if row_len == 0 {
        return;
    }
    if strategy.is_parallel(num_pixels) {
        data.par_chunks_mut(row_len)
            .enumerate()
            .for_each(|(r, row)| f(r, row));
    } else {
        data.chunks_mut(row_len)
            .enumerate()
            .for_each(|(r, row)| f(r, row));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bori_image::{ImageError, ImageSize};

    #[test]
    fn test_strategy_is_parallel() {
        assert!(!ExecutionStrategy::Serial.is_parallel(usize::MAX));
        assert!(ExecutionStrategy::Parallel.is_parallel(1));
        assert!(!ExecutionStrategy::Auto.is_parallel(AUTO_PARALLEL_THRESHOLD - 1));
        assert!(ExecutionStrategy::Auto.is_parallel(AUTO_PARALLEL_THRESHOLD));
    }

    #[test]
    fn test_par_iter_rows() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 2,
            height: 2,
        };
        let src = Image::<u8, 4>::new(size, (0..16).collect())?;
        let mut dst = Image::<u8, 1>::from_size_val(size, 0)?;
        par_iter_rows(&src, &mut dst, |s, d| d[0] = s[3]);
        assert_eq!(dst.as_slice(), &[3, 7, 11, 15]);
        Ok(())
    }

    #[test]
    fn test_par_iter_rows_two() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 3,
            height: 1,
        };
        let a = Image::<u8, 1>::new(size, vec![1, 2, 3])?;
        let b = Image::<u8, 1>::new(size, vec![10, 20, 30])?;
        let mut dst = Image::<u8, 1>::from_size_val(size, 0)?;
        par_iter_rows_two(&a, &b, &mut dst, |x, y, d| d[0] = x[0] + y[0]);
        assert_eq!(dst.as_slice(), &[11, 22, 33]);
        Ok(())
    }

    #[test]
    fn test_for_each_row_serial_and_parallel_match() {
        let mut serial = vec![0usize; 12];
        let mut parallel = vec![0usize; 12];
        for_each_row(ExecutionStrategy::Serial, 12, &mut serial, 4, |r, row| {
            row.iter_mut().enumerate().for_each(|(c, v)| *v = r * 10 + c)
        });
        for_each_row(ExecutionStrategy::Parallel, 12, &mut parallel, 4, |r, row| {
            row.iter_mut().enumerate().for_each(|(c, v)| *v = r * 10 + c)
        });
        assert_eq!(serial, parallel);
        assert_eq!(serial[4..8], [10, 11, 12, 13]);
    }
}
