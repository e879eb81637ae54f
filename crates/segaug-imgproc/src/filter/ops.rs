use rayon::prelude::*;
use segaug_image::{Image, ImageDtype, ImageError};

use super::{kernels, separable_filter};

/// Blur an image using a gaussian blur filter
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `kernel_size` - The size of the kernel (kernel_x, kernel_y).
/// * `sigma` - The sigma of the gaussian kernel.
///
/// PRECONDITION: `src` and `dst` must have the same shape.
pub fn gaussian_blur<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    kernel_size: (usize, usize),
    sigma: (f32, f32),
) -> Result<(), ImageError>
where
    T: ImageDtype,
{
    let kernel_x = kernels::gaussian_kernel_1d(kernel_size.0, sigma.0);
    let kernel_y = kernels::gaussian_kernel_1d(kernel_size.1, sigma.1);
    separable_filter(src, dst, &kernel_x, &kernel_y)?;
    Ok(())
}

/// Filter an image with a 3x3 kernel, keeping the border pixels unchanged.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `kernel` - The 3x3 kernel, indexed `[row][col]`.
///
/// # Errors
///
/// Returns an error if `src` and `dst` differ in size.
pub fn filter_3x3<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    kernel: &[[f32; 3]; 3],
) -> Result<(), ImageError>
where
    T: ImageDtype,
{
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let (rows, cols) = (src.rows(), src.cols());
    if rows == 0 || cols == 0 {
        return Ok(());
    }

    let row_stride = cols * C;
    let src_data = src.as_slice();

    dst.as_slice_mut()
        .par_chunks_exact_mut(row_stride)
        .enumerate()
        .for_each(|(r, dst_row)| {
            let src_row = &src_data[r * row_stride..(r + 1) * row_stride];
            dst_row.copy_from_slice(src_row);

            if r == 0 || r + 1 >= rows {
                return;
            }

            for c in 1..cols.saturating_sub(1) {
                for ch in 0..C {
                    let mut acc = 0.0f32;
                    for (dy, kernel_row) in kernel.iter().enumerate() {
                        let y = r + dy - 1;
                        for (dx, &k) in kernel_row.iter().enumerate() {
                            let x = c + dx - 1;
                            let val: f32 = src_data[y * row_stride + x * C + ch].into();
                            acc += val * k;
                        }
                    }
                    dst_row[c * C + ch] = T::from_f32(acc);
                }
            }
        });

    Ok(())
}

/// Smooth an image with the 3x3 kernel from [`kernels::smooth_kernel_3x3`].
///
/// Border pixels are copied unchanged.
pub fn smooth_3x3<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
) -> Result<(), ImageError>
where
    T: ImageDtype,
{
    filter_3x3(src, dst, &kernels::smooth_kernel_3x3())
}
