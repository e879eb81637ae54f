use rayon::prelude::*;

use segaug_image::Image;

/// Apply a function to each pixel of `src` and the matching pixel of `dst` in parallel.
///
/// Rows are distributed over the rayon global pool. `src` and `dst` must have the
/// same spatial size.
pub fn par_iter_rows<T1, const C1: usize, T2, const C2: usize>(
    src: &Image<T1, C1>,
    dst: &mut Image<T2, C2>,
    f: impl Fn(&[T1], &mut [T2]) + Send + Sync,
) where
    T1: Send + Sync,
    T2: Send + Sync,
{
    let cols = src.cols();
    if cols == 0 || C1 == 0 || C2 == 0 {
        return;
    }

    src.as_slice()
        .par_chunks_exact(C1 * cols)
        .zip(dst.as_slice_mut().par_chunks_exact_mut(C2 * cols))
        .for_each(|(src_chunk, dst_chunk)| {
            src_chunk
                .chunks_exact(C1)
                .zip(dst_chunk.chunks_exact_mut(C2))
                .for_each(|(src_pixel, dst_pixel)| {
                    f(src_pixel, dst_pixel);
                });
        });
}

/// Apply a function to the matching pixels of `src1`, `src2` and `dst` in parallel.
///
/// All three images must have the same spatial size.
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
    if cols == 0 || C1 == 0 || C2 == 0 || C3 == 0 {
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

/// Apply a function to each pixel of `dst` in parallel, passing its `(x, y)` coordinates.
///
/// Used by the resampling operations, where every output pixel reads from an
/// arbitrary source location.
pub fn par_iter_rows_indexed<T, const C: usize>(
    dst: &mut Image<T, C>,
    f: impl Fn(usize, usize, &mut [T]) + Send + Sync,
) where
    T: Send + Sync,
{
    let cols = dst.cols();
    if cols == 0 || C == 0 {
        return;
    }

    dst.as_slice_mut()
        .par_chunks_exact_mut(C * cols)
        .enumerate()
        .for_each(|(y, dst_row)| {
            dst_row
                .chunks_exact_mut(C)
                .enumerate()
                .for_each(|(x, dst_pixel)| f(x, y, dst_pixel));
        });
}

#[cfg(test)]
mod tests {
    use segaug_image::{Image, ImageError, ImageSize};

    #[test]
    fn test_par_iter_rows() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 2,
            height: 2,
        };
        let src = Image::<u8, 3>::new(size, (0..12).collect())?;
        let mut dst = Image::<u8, 1>::from_size_val(size, 0)?;

        super::par_iter_rows(&src, &mut dst, |src_pixel, dst_pixel| {
            dst_pixel[0] = src_pixel[2];
        });

        assert_eq!(dst.as_slice(), &[2, 5, 8, 11]);

        Ok(())
    }

    #[test]
    fn test_par_iter_rows_two() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 3,
            height: 1,
        };
        let src1 = Image::<u8, 1>::new(size, vec![1, 2, 3])?;
        let src2 = Image::<u8, 1>::new(size, vec![10, 20, 30])?;
        let mut dst = Image::<u8, 1>::from_size_val(size, 0)?;

        super::par_iter_rows_two(&src1, &src2, &mut dst, |a, b, out| {
            out[0] = a[0] + b[0];
        });

        assert_eq!(dst.as_slice(), &[11, 22, 33]);

        Ok(())
    }

    #[test]
    fn test_par_iter_rows_indexed() -> Result<(), ImageError> {
        let mut dst = Image::<usize, 1>::from_size_val(
            ImageSize {
                width: 3,
                height: 2,
            },
            0,
        )?;

        super::par_iter_rows_indexed(&mut dst, |x, y, pixel| {
            pixel[0] = y * 10 + x;
        });

        assert_eq!(dst.as_slice(), &[0, 1, 2, 10, 11, 12]);

        Ok(())
    }
}
